//! Argon2id password hasher adapter

use platform::password::{Argon2Hasher, ClearTextPassword, HashedPassword, PasswordHashError};

use crate::domain::service::PasswordHasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<Vec<u8>, PasswordHashError> {
        Argon2Hasher::hash(self, password).map(HashedPassword::into_bytes)
    }

    fn verify(
        &self,
        digest: &[u8],
        password: &ClearTextPassword,
    ) -> Result<bool, PasswordHashError> {
        let hashed = HashedPassword::from_bytes(digest)?;
        Argon2Hasher::verify(self, &hashed, password)
    }
}
