//! JWT token issuer
//!
//! Signs with the requesting app's secret. `iat`/`exp` have one-second
//! resolution, so two tokens for the same user and app issued within the
//! same second are identical.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::token::{self, Claims, TokenError};

use crate::domain::entity::{app::App, user::User};
use crate::domain::service::TokenIssuer;

#[derive(Debug, Clone, Copy, Default)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue as of `now`. `exp` is exactly `now + ttl` (whole seconds).
    pub fn issue_at(
        &self,
        user: &User,
        app: &App,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            app_id: app.id.get(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        };

        token::sign(&claims, app.secret.as_bytes())
    }

    /// Check a token against the app it claims to be issued for.
    pub fn verify(&self, token: &str, app: &App) -> Result<Claims, TokenError> {
        token::verify(token, app.secret.as_bytes())
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(user, app, ttl, Utc::now())
    }
}
