//! Credential Store Contract
//!
//! Persistence boundary for users and apps. Implementations live in the
//! infrastructure layer and are responsible for translating their own
//! failures into [`StoreError`](crate::error::StoreError):
//! unique-constraint hits become `UserExists`, missing rows `NotFound`,
//! everything else `Internal`.

use kernel::id::{AppId, UserId};

use crate::domain::entity::{app::App, user::User};
use crate::error::StoreResult;

/// Credential store trait
///
/// Concurrent `save_user` calls with the same email must yield exactly one
/// success; the rest fail with `UserExists`.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Persist a new user and return its assigned id
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> StoreResult<UserId>;

    /// Find user by exact email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<User>;

    /// Admin flag of the user
    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool>;

    /// Find a registered app
    async fn find_app(&self, app_id: AppId) -> StoreResult<App>;
}
