//! Domain Layer
//!
//! Entities, the credential store contract, and the hashing/signing
//! contracts the authentication core depends on.

pub mod entity;
pub mod repository;
pub mod service;

// Re-exports
pub use entity::{app::App, user::User};
pub use repository::{CredentialStore, LocalCredentialStore};
pub use service::{PasswordHasher, TokenIssuer};
