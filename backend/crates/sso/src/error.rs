//! SSO Error Types
//!
//! Two layers:
//! - [`StoreError`] is the taxonomy every credential store adapter speaks.
//! - [`AuthError`] is what the authentication core returns. Each variant
//!   carries the `op` tag of the operation that failed; `Internal` also keeps
//!   the underlying cause for logs without rendering it to callers.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type AuthResult<T> = Result<T, AuthError>;

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Store errors
// ============================================================================

/// Credential store failures, already translated from the backend's own errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email is already stored
    #[error("user already exists")]
    UserExists,

    /// The requested user or app record does not exist
    #[error("record not found")]
    NotFound,

    /// Connection, query or any other backend failure
    #[error("storage failure: {0}")]
    Internal(#[source] BoxError),
}

impl StoreError {
    pub fn internal(err: impl Into<BoxError>) -> Self {
        StoreError::Internal(err.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::internal(other),
        }
    }
}

// ============================================================================
// Auth errors
// ============================================================================

/// Domain-level outcome of a failed authentication core operation
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately not told apart
    #[error("{op}: invalid credentials")]
    InvalidCredentials { op: &'static str },

    #[error("{op}: user already exists")]
    UserExists { op: &'static str },

    /// Admin lookup found no backing record
    #[error("{op}: invalid app id")]
    InvalidAppId { op: &'static str },

    /// Storage, hashing or signing failure
    #[error("{op}: internal error")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AuthError {
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        AuthError::Internal {
            op,
            source: source.into(),
        }
    }

    /// Operation that produced this error
    pub fn op(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { op }
            | AuthError::UserExists { op }
            | AuthError::InvalidAppId { op }
            | AuthError::Internal { op, .. } => op,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials { .. } => ErrorKind::Unauthorized,
            AuthError::UserExists { .. } => ErrorKind::Conflict,
            AuthError::InvalidAppId { .. } => ErrorKind::BadRequest,
            AuthError::Internal { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Caller-facing message. Never includes the internal cause.
    fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "Invalid email or password",
            AuthError::UserExists { .. } => "User already exists",
            AuthError::InvalidAppId { .. } => "Invalid app id",
            AuthError::Internal { .. } => "Internal error",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

// Already logged where it was detected.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kinds() {
        assert_eq!(
            AuthError::InvalidCredentials { op: "x" }.kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(AuthError::UserExists { op: "x" }.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::InvalidAppId { op: "x" }.kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AuthError::internal("x", StoreError::NotFound).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_op_tag_in_display() {
        let err = AuthError::InvalidCredentials { op: "auth.login" };
        assert_eq!(err.op(), "auth.login");
        assert_eq!(err.to_string(), "auth.login: invalid credentials");
    }

    #[test]
    fn test_internal_keeps_cause_out_of_display() {
        let cause = StoreError::internal(std::io::Error::other("connection reset"));
        let err = AuthError::internal("auth.register_new_user", cause);

        assert_eq!(err.to_string(), "auth.register_new_user: internal error");
        assert!(err.source().unwrap().to_string().contains("connection reset"));

        let app_err = err.to_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("connection reset"));
    }

    #[test]
    fn test_into_response_status_codes() {
        let cases: Vec<(AuthError, u16)> = vec![
            (AuthError::InvalidCredentials { op: "x" }, 401),
            (AuthError::UserExists { op: "x" }, 409),
            (AuthError::InvalidAppId { op: "x" }, 400),
            (AuthError::internal("x", StoreError::NotFound), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status().as_u16(), expected);
        }
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Internal(_)
        ));
    }
}
