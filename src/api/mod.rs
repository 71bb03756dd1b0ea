//! HTTP surface: session tokens, route guard middleware and JSON services.

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
