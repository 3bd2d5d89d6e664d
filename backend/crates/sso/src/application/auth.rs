//! Authentication Core
//!
//! Login, registration and admin check on top of the credential store, the
//! password hasher and the token issuer. Holds no mutable state; every call
//! is an independent request/response.

use std::sync::Arc;
use std::time::Duration;

use kernel::id::{AppId, UserId};
use platform::password::ClearTextPassword;

use crate::domain::repository::CredentialStore;
use crate::domain::service::{PasswordHasher, TokenIssuer};
use crate::error::{AuthError, AuthResult, StoreError};

pub const OP_LOGIN: &str = "auth.login";
pub const OP_REGISTER_NEW_USER: &str = "auth.register_new_user";
pub const OP_IS_ADMIN: &str = "auth.is_admin";

/// Authentication core
pub struct Auth<S, H, T>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: Arc<T>,
    token_ttl: Duration,
}

impl<S, H, T> Clone for Auth<S, H, T>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
            issuer: Arc::clone(&self.issuer),
            token_ttl: self.token_ttl,
        }
    }
}

impl<S, H, T> Auth<S, H, T>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(store: Arc<S>, hasher: Arc<H>, issuer: Arc<T>, token_ttl: Duration) -> Self {
        Self {
            store,
            hasher,
            issuer,
            token_ttl,
        }
    }

    /// Check credentials and return a token scoped to `app_id`.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    /// A missing app is a deployment problem and fails with `Internal`.
    pub async fn login(
        &self,
        email: &str,
        password: ClearTextPassword,
        app_id: AppId,
    ) -> AuthResult<String> {
        let op = OP_LOGIN;

        tracing::info!(op, email = %email, app_id = %app_id, "Login attempt");

        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                tracing::warn!(op, email = %email, "User not found");
                return Err(AuthError::InvalidCredentials { op });
            }
            Err(e) => {
                tracing::error!(op, email = %email, error = %e, "Failed to get user");
                return Err(AuthError::internal(op, e));
            }
        };

        let hasher = Arc::clone(&self.hasher);
        let digest = user.pass_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| {
                tracing::error!(op, user_id = %user.id, error = %e, "Password check aborted");
                AuthError::internal(op, e)
            })?
            .map_err(|e| {
                tracing::error!(op, user_id = %user.id, error = %e, "Stored password hash is unusable");
                AuthError::internal(op, e)
            })?;

        if !verified {
            tracing::info!(op, user_id = %user.id, "Invalid password");
            return Err(AuthError::InvalidCredentials { op });
        }

        let app = self.store.find_app(app_id).await.map_err(|e| {
            tracing::error!(op, app_id = %app_id, error = %e, "Failed to get app");
            AuthError::internal(op, e)
        })?;

        let token = self.issuer.issue(&user, &app, self.token_ttl).map_err(|e| {
            tracing::error!(op, user_id = %user.id, app_id = %app_id, error = %e, "Failed to generate token");
            AuthError::internal(op, e)
        })?;

        tracing::info!(op, user_id = %user.id, app_id = %app_id, "User logged in");

        Ok(token)
    }

    /// Hash the password and persist a new user, returning the assigned id.
    pub async fn register_new_user(
        &self,
        email: &str,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        let op = OP_REGISTER_NEW_USER;

        tracing::info!(op, email = %email, "Registering new user");

        let hasher = Arc::clone(&self.hasher);
        let pass_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                tracing::error!(op, email = %email, error = %e, "Password hashing aborted");
                AuthError::internal(op, e)
            })?
            .map_err(|e| {
                tracing::error!(op, email = %email, error = %e, "Failed to hash password");
                AuthError::internal(op, e)
            })?;

        let user_id = match self.store.save_user(email, &pass_hash).await {
            Ok(id) => id,
            Err(StoreError::UserExists) => {
                tracing::warn!(op, email = %email, "User already exists");
                return Err(AuthError::UserExists { op });
            }
            Err(e) => {
                tracing::error!(op, email = %email, error = %e, "Failed to save user");
                return Err(AuthError::internal(op, e));
            }
        };

        tracing::info!(op, user_id = %user_id, "User registered");

        Ok(user_id)
    }

    /// Live admin-flag lookup.
    ///
    /// A missing record is reported as `InvalidAppId`; existing callers rely
    /// on that kind.
    pub async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
        let op = OP_IS_ADMIN;

        tracing::info!(op, user_id = %user_id, "Checking if user is admin");

        let is_admin = match self.store.is_admin(user_id).await {
            Ok(flag) => flag,
            Err(StoreError::NotFound) => {
                tracing::warn!(op, user_id = %user_id, "Admin lookup found no record");
                return Err(AuthError::InvalidAppId { op });
            }
            Err(e) => {
                tracing::error!(op, user_id = %user_id, error = %e, "Failed to check admin flag");
                return Err(AuthError::internal(op, e));
            }
        };

        tracing::info!(op, user_id = %user_id, is_admin, "Checked if user is admin");

        Ok(is_admin)
    }
}
