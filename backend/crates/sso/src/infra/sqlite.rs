//! SQLite Credential Store

use std::path::Path;

use kernel::id::{AppId, UserId};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::CredentialStore;
use crate::error::{StoreError, StoreResult};

/// SQLite-backed credential store
///
/// Email uniqueness is enforced by the `users.email` unique index, so
/// concurrent registrations race inside the database, not here.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open an existing database file. Does not create it.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Ok(Self::new(pool))
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CredentialStore for SqliteCredentialStore {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> StoreResult<UserId> {
        let result = sqlx::query("INSERT INTO users (email, pass_hash) VALUES (?, ?)")
            .bind(email)
            .bind(pass_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::UserExists,
                other => StoreError::from(other),
            })?;

        Ok(UserId::new(result.last_insert_rowid()))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, pass_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).ok_or(StoreError::NotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        let flag = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?;

        flag.ok_or(StoreError::NotFound)
    }

    async fn find_app(&self, app_id: AppId) -> StoreResult<App> {
        let row = sqlx::query_as::<_, AppRow>("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(app_id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AppRow::into_app).ok_or(StoreError::NotFound)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
}

impl UserRow {
    fn into_user(self) -> User {
        User::new(UserId::new(self.id), self.email, self.pass_hash)
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl AppRow {
    fn into_app(self) -> App {
        App::new(AppId::new(self.id), self.name, self.secret)
    }
}
