//! Password Hashing and Verification
//!
//! Argon2id hashing with self-describing PHC digests:
//! - Random 128-bit salt per hash
//! - Parameters (work factor) embedded in the digest, so verification keeps
//!   working after the configured work factor changes
//! - Constant-time comparison inside `argon2`
//! - Zeroization of clear text on drop

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Largest clear text accepted by [`Argon2Hasher::hash`], in bytes.
pub const MAX_PASSWORD_BYTES: usize = 1024;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
///
/// A wrong password is *not* an error: [`Argon2Hasher::verify`] returns
/// `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Clear text exceeds [`MAX_PASSWORD_BYTES`]
    #[error("Password must be at most {max} bytes (got {actual})")]
    InputTooLong { max: usize, actual: usize },

    /// Work factor rejected by argon2
    #[error("Invalid work factor: {0}")]
    InvalidParams(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest is not a valid PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Work Factor
// ============================================================================

/// Argon2id cost parameters.
///
/// The default is the OWASP baseline: 19 MiB of memory, 2 passes, 1 lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl WorkFactor {
    /// Cheapest parameters argon2 accepts. Tests only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory when dropped.
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Digest in PHC string format (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Parse a digest stored as raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasswordHashError> {
        let s = std::str::from_utf8(bytes).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Self::from_phc_string(s)
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.hash.into_bytes()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to a fixed work factor.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(work_factor: WorkFactor) -> Result<Self, PasswordHashError> {
        Ok(Self {
            params: work_factor.params()?,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let bytes = password.as_bytes();
        if bytes.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::InputTooLong {
                max: MAX_PASSWORD_BYTES,
                actual: bytes.len(),
            });
        }

        let salt = SaltString::generate(OsRng);
        let hash = self
            .argon2()
            .hash_password(bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify clear text against a digest.
    ///
    /// Recomputes with the salt and parameters embedded in `hashed`, not the
    /// ones this hasher was built with.
    pub fn verify(
        &self,
        hashed: &HashedPassword,
        password: &ClearTextPassword,
    ) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(&hashed.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::HashingFailed(e.to_string())),
        }
    }
}
