//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::error::app_error::AppResult;
use kernel::id::{AppId, UserId};
use platform::password::ClearTextPassword;

use crate::application::Auth;
use crate::domain::repository::CredentialStore;
use crate::domain::service::{PasswordHasher, TokenIssuer};
use crate::presentation::dto::{
    IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, require_id,
};

/// Shared state for auth handlers
pub struct AuthAppState<S, H, T>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub auth: Auth<S, H, T>,
}

impl<S, H, T> Clone for AuthAppState<S, H, T>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<S, H, T>(
    State(state): State<AuthAppState<S, H, T>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    req.validate()?;

    let token = state
        .auth
        .login(
            &req.email,
            ClearTextPassword::new(req.password),
            AppId::new(req.app_id),
        )
        .await?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<S, H, T>(
    State(state): State<AuthAppState<S, H, T>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    req.validate()?;

    let user_id = state
        .auth
        .register_new_user(&req.email, ClearTextPassword::new(req.password))
        .await?;

    Ok(Json(RegisterResponse {
        user_id: user_id.get(),
    }))
}

// ============================================================================
// Is Admin
// ============================================================================

/// GET /api/auth/users/{user_id}/is-admin
pub async fn is_admin<S, H, T>(
    State(state): State<AuthAppState<S, H, T>>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<IsAdminResponse>>
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    require_id(user_id, "user_id")?;

    let is_admin = state.auth.is_admin(UserId::new(user_id)).await?;

    Ok(Json(IsAdminResponse { is_admin }))
}
