//! SSO (Single Sign-On) Identity Core
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the credential store contract, hasher/issuer contracts
//! - `application/` - The authentication core (login, registration, admin check)
//! - `infra/` - SQLite and in-memory stores, Argon2 hasher, JWT issuer
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Email + password login returning a token scoped to a registered app
//! - Registration with store-enforced email uniqueness
//! - Live admin-flag lookup (never cached in tokens)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, compared in constant time
//! - Unknown email and wrong password are indistinguishable to callers
//! - Tokens are stateless HS256 JWTs signed with the app's own secret
//! - Passwords and hashes are never logged

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{Auth, config::AuthConfig};
pub use error::{AuthError, AuthResult, StoreError, StoreResult};
pub use infra::{InMemoryCredentialStore, JwtTokenIssuer, SqliteCredentialStore};
pub use presentation::router::auth_router;

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
