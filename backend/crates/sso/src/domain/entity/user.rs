//! User Entity

use std::fmt;

use kernel::id::UserId;

/// Registered user as held by the credential store.
///
/// The core only ever holds one of these for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Case-sensitive, exactly as stored
    pub email: String,
    /// Opaque self-describing digest, never the clear text
    pub pass_hash: Vec<u8>,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, pass_hash: Vec<u8>) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"[HASH]")
            .finish()
    }
}
