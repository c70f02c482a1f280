//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use folio_db::models::portfolio::{CreatePortfolio, Portfolio};
use folio_db::models::user::{CreateUser, User};
use folio_db::repositories::{PortfolioRepo, UserRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, email: &str, display_name: Option<&str>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            display_name: display_name.map(str::to_string),
        },
    )
    .await
    .unwrap()
}

pub fn new_portfolio(title: &str, is_public: bool) -> CreatePortfolio {
    CreatePortfolio {
        title: title.to_string(),
        description: None,
        template_id: "minimal".to_string(),
        is_public,
        category: None,
        skills: Vec::new(),
        content: serde_json::json!({}),
    }
}

pub async fn create_portfolio(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    is_public: bool,
) -> Portfolio {
    PortfolioRepo::create(pool, user_id, &new_portfolio(title, is_public))
        .await
        .unwrap()
}
