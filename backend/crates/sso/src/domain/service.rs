//! Hashing and Signing Contracts
//!
//! Synchronous, CPU-bound collaborators of the authentication core. The core
//! moves calls to [`PasswordHasher`] onto the blocking pool.

use std::time::Duration;

use platform::password::{ClearTextPassword, PasswordHashError};
use platform::token::TokenError;

use crate::domain::entity::{app::App, user::User};

/// One-way salted password hashing
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce a self-contained digest (salt and parameters embedded)
    fn hash(&self, password: &ClearTextPassword) -> Result<Vec<u8>, PasswordHashError>;

    /// Constant-time check of `password` against `digest`.
    ///
    /// A mismatch is `Ok(false)`; `Err` means the digest itself is unusable.
    fn verify(&self, digest: &[u8], password: &ClearTextPassword)
    -> Result<bool, PasswordHashError>;
}

/// Issues signed access tokens
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign a token for `user` scoped to `app`, expiring `ttl` after issuance
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}
