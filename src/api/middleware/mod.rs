pub mod auth;

pub use auth::SessionGate;
