//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::Auth;
use crate::domain::repository::CredentialStore;
use crate::domain::service::{PasswordHasher, TokenIssuer};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the auth router for any store/hasher/issuer combination.
///
/// Mount under `/api/auth`.
pub fn auth_router<S, H, T>(auth: Auth<S, H, T>) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
    H: PasswordHasher,
    T: TokenIssuer,
{
    let state = AuthAppState { auth };

    Router::new()
        .route("/login", post(handlers::login::<S, H, T>))
        .route("/register", post(handlers::register::<S, H, T>))
        .route("/users/{user_id}/is-admin", get(handlers::is_admin::<S, H, T>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kernel::id::AppId;
    use platform::password::{Argon2Hasher, WorkFactor};
    use tower::ServiceExt;

    use crate::domain::entity::app::App;
    use crate::infra::{InMemoryCredentialStore, JwtTokenIssuer};

    async fn app() -> (Router, InMemoryCredentialStore) {
        let store = InMemoryCredentialStore::new();
        store
            .insert_app(App::new(AppId::new(1), "test", "test-secret"))
            .await;

        let auth = Auth::new(
            Arc::new(store.clone()),
            Arc::new(Argon2Hasher::new(WorkFactor::minimal()).unwrap()),
            Arc::new(JwtTokenIssuer::new()),
            Duration::from_secs(3600),
        );

        (auth_router(auth), store)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (router, _) = app().await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "a@x.com", "password": "pw1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["userId"], 1);

        let response = router
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "a@x.com", "password": "pw1", "appId": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let (router, _) = app().await;

        router
            .clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "a@x.com", "password": "pw1"}),
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "a@x.com", "password": "wrong", "appId": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["detail"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let (router, _) = app().await;
        let body = serde_json::json!({"email": "a@x.com", "password": "pw1"});

        router
            .clone()
            .oneshot(post_json("/register", body.clone()))
            .await
            .unwrap();
        let response = router.oneshot(post_json("/register", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_validation_rejects_before_core() {
        let (router, _) = app().await;

        let requests = [
            post_json("/register", serde_json::json!({"email": "", "password": "pw"})),
            post_json(
                "/login",
                serde_json::json!({"email": "a@x.com", "password": "pw", "appId": 0}),
            ),
            get("/users/0/is-admin"),
        ];

        for request in requests {
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_is_admin() {
        let (router, store) = app().await;

        router
            .clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "a@x.com", "password": "pw1"}),
            ))
            .await
            .unwrap();

        let response = router.clone().oneshot(get("/users/1/is-admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["isAdmin"], false);

        store
            .set_admin(kernel::id::UserId::new(1), true)
            .await
            .unwrap();

        let response = router.clone().oneshot(get("/users/1/is-admin")).await.unwrap();
        assert_eq!(json_body(response).await["isAdmin"], true);

        let response = router.oneshot(get("/users/999/is-admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_app_is_internal_error() {
        let (router, _) = app().await;

        router
            .clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "a@x.com", "password": "pw1"}),
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "a@x.com", "password": "pw1", "appId": 2}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["detail"], "Internal error");
    }
}
