//! Signed Access Tokens
//!
//! HS256 JWTs carrying the identity of a user and the application the token
//! was issued for. The key is the per-application secret, so a token signed
//! for one app does not verify under another.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims encoded in every token.
///
/// Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, as a decimal string
    pub sub: String,
    pub email: String,
    pub app_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing key material is empty
    #[error("Signing key is empty")]
    EmptyKey,

    #[error("Token signing failed")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, malformed token, or expired
    #[error("Token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Sign `claims` with `secret`.
///
/// Deterministic: the same claims and secret always produce the same token.
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptyKey);
    }

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(TokenError::Sign)
}

/// Check signature and expiry, returning the claims.
///
/// No leeway is applied: a token is rejected as soon as `exp` has passed.
pub fn verify(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptyKey);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
}
