//! JSON services behind the api prefix, plus the embedded pages.

pub mod auth;
pub mod dashboard;
pub mod frontend;
pub mod helpers;
pub mod routes;
pub mod types;

pub use routes::api_scope;
