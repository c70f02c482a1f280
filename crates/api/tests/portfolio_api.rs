//! HTTP-level integration tests for portfolios, the template gate, public
//! share links and the community feed.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_portfolio, delete_auth, get, get_auth, post_auth, post_json_auth,
    put_json_auth, set_tier, signup,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_templates_mark_premium_unselectable_for_free_users(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "tpl@example.com", None).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/templates", &user.token).await).await;
    let templates = json["data"].as_array().unwrap();
    assert_eq!(templates.len(), 6);
    for t in templates {
        assert_eq!(t["selectable"], !t["is_premium"].as_bool().unwrap(), "{}", t["id"]);
    }

    // Anonymous callers see the catalog as a free user would.
    let json = body_json(get(app, "/api/v1/templates").await).await;
    assert_eq!(json["data"][0]["id"], "minimal");
    assert_eq!(json["data"][0]["selectable"], true);
}

// ---------------------------------------------------------------------------
// Create / read / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_uses_default_template_and_normalized_content(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "create@example.com", None).await;

    let response = post_json_auth(
        app,
        "/api/v1/portfolios",
        json!({
            "title": "  My Work ",
            "category": "Developer",
            "skills": ["Rust", "rust", " SQL "],
        }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "My Work");
    assert_eq!(data["template_id"], "minimal");
    assert_eq!(data["is_public"], false);
    assert_eq!(data["user_id"], user.id);
    assert!(data["content"]["personalInfo"].is_object());
    assert_eq!(data["content"]["projects"], json!([]));
    assert_eq!(data["content"]["workExperience"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_keeps_keys_outside_the_schema(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user = signup(app.clone(), "themed@example.com", None).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/portfolios",
        json!({
            "title": "Themed",
            "content": {
                "personalInfo": { "fullName": "Ada", "email": "ada@example.com" },
                "theme": "dark",
            },
        }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let stored: serde_json::Value =
        sqlx::query_scalar("SELECT content FROM portfolios WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored["theme"], "dark");
    assert_eq!(stored["education"], "");

    let uri = format!("/api/v1/portfolios/{id}");
    let data = body_json(get_auth(app.clone(), &uri, &user.token).await).await["data"].clone();
    assert_eq!(data["content"]["theme"], "dark");
    assert_eq!(data["content"]["personalInfo"]["fullName"], "Ada");

    // An update that rewrites the content keeps whatever extra keys it sends.
    let response = put_json_auth(
        app,
        &uri,
        json!({ "content": { "theme": "light", "awards": "Turing" } }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let content = body_json(response).await["data"]["content"].clone();
    assert_eq!(content["theme"], "light");
    assert_eq!(content["awards"], "Turing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_blank_title_and_unknown_template(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "invalid@example.com", None).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/portfolios",
        json!({ "title": "   " }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/portfolios",
        json!({ "title": "Mine", "template_id": "brutalist" }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_premium_template_requires_premium_tier(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user = signup(app.clone(), "gate@example.com", None).await;
    let body = json!({ "title": "Fancy", "template_id": "premium-modern" });

    let response =
        post_json_auth(app.clone(), "/api/v1/portfolios", body.clone(), &user.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The gate reads the stored tier, so the existing token picks up the change.
    set_tier(&pool, user.id, "premium").await;
    let response =
        post_json_auth(app.clone(), "/api/v1/portfolios", body.clone(), &user.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    set_tier(&pool, user.id, "admin").await;
    let response = post_json_auth(app, "/api/v1/portfolios", body, &user.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_hidden_from_other_users_but_not_admins(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = signup(app.clone(), "owner@example.com", None).await;
    let other = signup(app.clone(), "other@example.com", None).await;
    let admin = signup(app.clone(), "admin@example.com", None).await;
    set_tier(&pool, admin.id, "admin").await;

    let id = create_portfolio(app.clone(), &owner.token, "Private", false).await;
    let uri = format!("/api/v1/portfolios/{id}");

    let response = get_auth(app.clone(), &uri, &other.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app.clone(), &uri, json!({ "title": "Hijack" }), &other.token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &other.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_untouched_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "update@example.com", None).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/portfolios",
        json!({ "title": "Before", "description": "Keep me", "category": "designer" }),
        &user.token,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/portfolios/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({
            "title": "After",
            "category": "",
            "content": { "education": "BSc", "projects": [{ "name": "folio" }] },
        }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "After");
    assert_eq!(data["description"], "Keep me");
    assert!(data["category"].is_null());
    assert_eq!(data["content"]["education"], "BSc");
    assert_eq!(data["content"]["projects"][0]["name"], "folio");
    assert_eq!(data["content"]["projects"][0]["technologies"], json!([]));

    let list = body_json(get_auth(app, "/api/v1/portfolios", &user.token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["title"], "After");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_portfolio(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "delete@example.com", None).await;
    let id = create_portfolio(app.clone(), &user.token, "Doomed", true).await;
    let uri = format!("/api/v1/portfolios/{id}");

    let response = delete_auth(app.clone(), &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_link_only_for_public_portfolios(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "share@example.com", None).await;
    let id = create_portfolio(app.clone(), &user.token, "Shared", false).await;
    let share = format!("/api/v1/share/{id}");

    let response = get(app.clone(), &share).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "This portfolio is not publicly available"
    );

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/portfolios/{id}/visibility"),
        json!({ "is_public": true }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), &share).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["share_url"], format!("https://folio.test/portfolio/view/{id}"));
    assert_eq!(data["title"], "Shared");

    let response = get(app, "/api/v1/share/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Community feed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_lists_public_portfolios_with_counts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = signup(app.clone(), "feed@example.com", Some("Feeder")).await;
    let fan = signup(app.clone(), "fan@example.com", None).await;

    let public_id = create_portfolio(app.clone(), &owner.token, "Visible", true).await;
    create_portfolio(app.clone(), &owner.token, "Hidden", false).await;

    let response = post_auth(
        app.clone(),
        &format!("/api/v1/portfolios/{public_id}/like"),
        &fan.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/community/portfolios").await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], public_id);
    assert_eq!(entries[0]["owner_display_name"], "Feeder");
    assert_eq!(entries[0]["like_count"], 1);
    assert_eq!(entries[0]["comment_count"], 0);

    let json = body_json(get(app, "/api/v1/community/portfolios?search=nothing-matches").await)
        .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_filters_by_category_and_skill(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "filter@example.com", None).await;

    for (title, category, skills) in [
        ("Backend", "developer", json!(["Rust", "Postgres"])),
        ("Posters", "designer", json!(["Figma"])),
    ] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/portfolios",
            json!({ "title": title, "category": category, "skills": skills, "is_public": true }),
            &user.token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.clone(), "/api/v1/community/portfolios?category=Developer").await)
        .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Backend");

    let json = body_json(get(app, "/api/v1/community/portfolios?skill=figma&limit=5").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Posters");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_entry_detail_refuses_private(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(app.clone(), "detail@example.com", None).await;
    let public_id = create_portfolio(app.clone(), &user.token, "Open", true).await;
    let private_id = create_portfolio(app.clone(), &user.token, "Closed", false).await;

    let response = get(app.clone(), &format!("/api/v1/community/portfolios/{public_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert!(data["content"].is_object());
    assert!(data["share_url"].as_str().unwrap().ends_with(&public_id.to_string()));

    let response = get(app, &format!("/api/v1/community/portfolios/{private_id}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
