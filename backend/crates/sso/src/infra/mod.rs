//! Infrastructure Layer
//!
//! Credential store adapters and the concrete hasher/issuer.

pub mod argon2;
pub mod jwt;
pub mod memory;
pub mod sqlite;

pub use jwt::JwtTokenIssuer;
pub use memory::InMemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;
