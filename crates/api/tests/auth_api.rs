//! HTTP-level integration tests for sign-up, sign-in, token refresh, logout
//! and the account endpoints under `/me`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_auth, post_json, post_json_auth, put_json_auth, signup,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_returns_tokens_and_free_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "email": "  Ada@Example.com ",
        "password": TEST_PASSWORD,
        "display_name": "Ada",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["expires_in"], 15 * 60);
    assert_eq!(data["user"]["email"], "ada@example.com");
    assert_eq!(data["user"]["display_name"], "Ada");
    assert_eq!(data["user"]["tier"], "free");
    assert!(data["user"]["last_sign_in_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "dup@example.com", None).await;

    let body = json!({ "email": "DUP@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "short@example.com", "password": "abc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "not-an-email", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "login@example.com", None).await;

    let response = login(app, "LOGIN@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert!(json["data"]["access_token"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_and_unknown_email_look_alike(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "wrongpw@example.com", None).await;

    let wrong = login(app.clone(), "wrongpw@example.com", "incorrect-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = login(app, "nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["error"], unknown["error"]);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "rotate@example.com", None).await;

    let json = body_json(login(app.clone(), "rotate@example.com", TEST_PASSWORD).await).await;
    let original = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"], original.as_str());

    // The presented token was revoked by the exchange.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "logout@example.com", None).await;

    let json = body_json(login(app.clone(), "logout@example.com", TEST_PASSWORD).await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(app.clone(), "/api/v1/auth/logout", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_me_changes_display_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "rename@example.com", Some("Old")).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/me",
        json!({ "display_name": "  New Name " }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["display_name"], "New Name");

    let json = body_json(get_auth(app, "/api/v1/me", &user.token).await).await;
    assert_eq!(json["data"]["display_name"], "New Name");
    assert_eq!(json["data"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upgrade_moves_free_to_premium_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "upgrade@example.com", None).await;

    let response = post_json_auth(app.clone(), "/api/v1/me/upgrade", json!({}), &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["tier"], "premium");

    let response = post_auth(app, "/api/v1/me/upgrade", &user.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
