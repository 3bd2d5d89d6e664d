//! Application Layer
//!
//! The authentication core and its configuration.

pub mod auth;
pub mod config;

// Re-exports
pub use auth::{Auth, OP_IS_ADMIN, OP_LOGIN, OP_REGISTER_NEW_USER};
pub use config::AuthConfig;
