//! In-Memory Credential Store
//!
//! Backs tests and local runs without a database file. A single write lock
//! makes the email check and the insert one step.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{AppId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::CredentialStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug)]
struct UserRecord {
    user: User,
    is_admin: bool,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, UserRecord>,
    by_email: HashMap<String, UserId>,
    apps: HashMap<AppId, App>,
    last_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an app (apps are provisioned out of band)
    pub async fn insert_app(&self, app: App) {
        self.state.write().await.apps.insert(app.id, app);
    }

    /// Set the admin flag. Returns `NotFound` for an unknown user.
    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let record = state.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        record.is_admin = is_admin;
        Ok(())
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> StoreResult<UserId> {
        let mut state = self.state.write().await;

        if state.by_email.contains_key(email) {
            return Err(StoreError::UserExists);
        }

        state.last_id += 1;
        let id = UserId::new(state.last_id);

        state.by_email.insert(email.to_string(), id);
        state.users.insert(
            id,
            UserRecord {
                user: User::new(id, email, pass_hash.to_vec()),
                is_admin: false,
            },
        );

        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let state = self.state.read().await;

        state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .map(|record| record.user.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        let state = self.state.read().await;

        state
            .users
            .get(&user_id)
            .map(|record| record.is_admin)
            .ok_or(StoreError::NotFound)
    }

    async fn find_app(&self, app_id: AppId) -> StoreResult<App> {
        let state = self.state.read().await;
        state.apps.get(&app_id).cloned().ok_or(StoreError::NotFound)
    }
}
