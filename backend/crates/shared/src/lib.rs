//! Shared Kernel
//!
//! Vocabulary that every SSO crate agrees on:
//! - Error classification and the unified [`error::app_error::AppError`]
//! - Typed integer identifiers for users and registered applications
//!
//! Nothing here knows about passwords, tokens or storage.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
