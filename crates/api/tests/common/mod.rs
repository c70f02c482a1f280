#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::auth::jwt::JwtConfig;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::types::DbId;
use folio_events::EventBus;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Provider URLs point at an unroutable port so a test that forgets to mock
/// them fails fast instead of calling the real APIs.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_base_url: "https://folio.test".to_string(),
        github_api_url: "http://127.0.0.1:9".to_string(),
        linkedin_api_url: "http://127.0.0.1:9".to_string(),
        token_encryption_key: "test-token-key".to_string(),
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// State over `pool` with the test configuration and a fresh event bus.
pub fn test_state(pool: PgPool, config: ServerConfig) -> AppState {
    AppState::new(pool, Arc::new(config), Arc::new(EventBus::default()))
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = test_state(pool, config.clone());
    build_app_router(state, &config)
}

/// Like [`build_test_app`] but with a caller-supplied state, for tests that
/// subscribe to the event bus or override provider URLs.
pub fn build_app_with_state(state: AppState) -> Router {
    let config = (*state.config).clone();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// A signed-up user and their access token.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

/// Sign up through the API and return the new user's id and access token.
pub async fn signup(app: Router, email: &str, display_name: Option<&str>) -> TestUser {
    let body = serde_json::json!({
        "email": email,
        "password": TEST_PASSWORD,
        "display_name": display_name,
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["user"]["id"].as_i64().unwrap(),
        token: json["data"]["access_token"].as_str().unwrap().to_string(),
    }
}

/// Set a user's tier directly in the database.
pub async fn set_tier(pool: &PgPool, user_id: DbId, tier: &str) {
    assert!(folio_db::repositories::UserRepo::update_user_role(pool, user_id, tier)
        .await
        .unwrap());
}

/// Create a portfolio through the API and return its id.
pub async fn create_portfolio(app: Router, token: &str, title: &str, is_public: bool) -> DbId {
    let body = serde_json::json!({ "title": title, "is_public": is_public });
    let response = post_json_auth(app, "/api/v1/portfolios", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
