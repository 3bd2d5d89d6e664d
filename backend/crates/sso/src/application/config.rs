//! Application Configuration
//!
//! Resolved once at startup and never mutated afterwards.

use std::time::Duration;

pub use platform::password::WorkFactor;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued tokens, whole seconds
    pub token_ttl: Duration,
    /// Argon2id cost for newly registered passwords
    pub work_factor: WorkFactor,
}
