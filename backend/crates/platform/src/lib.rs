//! Platform Crate - Technical Infrastructure
//!
//! Cryptographic building blocks used by the SSO core:
//! - Password hashing (Argon2id, PHC string digests)
//! - Compact signed tokens (HS256 JWT)
//!
//! Nothing in here knows about users, apps or storage.

pub mod password;
pub mod token;
