//! App Entity
//!
//! A registered application tokens can be issued for. Provisioned outside
//! this service; read-only here.

use std::fmt;

use kernel::id::AppId;

#[derive(Clone, PartialEq, Eq)]
pub struct App {
    pub id: AppId,
    pub name: String,
    /// HMAC signing key for tokens issued to this app
    pub secret: String,
}

impl App {
    pub fn new(id: AppId, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
