//! API DTOs (Data Transfer Objects)
//!
//! Request types hold clear-text passwords and deliberately do not derive
//! `Debug`.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: i64,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_credentials(&self.email, &self.password)?;
        require_id(self.app_id, "appId")
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_credentials(&self.email, &self.password)
    }
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

// ============================================================================
// Is Admin
// ============================================================================

/// Admin check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

// ============================================================================
// Validation
// ============================================================================

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::bad_request("email is required"));
    }
    if password.is_empty() {
        return Err(AppError::bad_request("password is required"));
    }
    Ok(())
}

pub(crate) fn require_id(id: i64, field: &'static str) -> AppResult<()> {
    if id == 0 {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_login_request_camel_case() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw","appId":1}"#).unwrap();
        assert_eq!(req.app_id, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_validation() {
        let cases = [
            r#"{"email":"","password":"pw","appId":1}"#,
            r#"{"email":"a@x.com","password":"","appId":1}"#,
            r#"{"email":"a@x.com","password":"pw","appId":0}"#,
        ];

        for body in cases {
            let req: LoginRequest = serde_json::from_str(body).unwrap();
            let err = req.validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "{body}");
        }
    }

    #[test]
    fn test_register_validation() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert_eq!(req.validate().unwrap_err().message(), "password is required");
    }

    #[test]
    fn test_responses_camel_case() {
        let json = serde_json::to_value(RegisterResponse { user_id: 7 }).unwrap();
        assert_eq!(json["userId"], 7);

        let json = serde_json::to_value(IsAdminResponse { is_admin: true }).unwrap();
        assert_eq!(json["isAdmin"], true);
    }
}
