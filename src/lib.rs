//! Newswatch - server-rendered analytics dashboard for a news-monitoring product
//!
//! The service authenticates a single operator, queries the news database for
//! aggregated counts (by category, by source outlet, by province/region) and
//! serves them as a JSON API consumed by the embedded dashboard pages.
//!
//! # Architecture
//! - `core`: pure province resolution and bucket aggregation
//! - `repository`: `NewsStore` trait and the sea-orm backend
//! - `api`: HTTP services, session gate middleware, JWT handling
//! - `config`: environment-driven configuration
//! - `errors`: crate-wide error type

pub mod api;
pub mod config;
pub mod core;
pub mod errors;
pub mod repository;
pub mod utils;
