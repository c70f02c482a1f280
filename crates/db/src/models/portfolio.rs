//! Portfolio entity model, DTOs and list shapes.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `portfolios` table.
///
/// `content` is the raw stored document; run it through
/// `folio_core::content::safe_parse_portfolio_content` before use.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Portfolio {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub template_id: String,
    pub is_public: bool,
    pub category: Option<String>,
    pub skills: Vec<String>,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for a new portfolio.
pub struct CreatePortfolio {
    pub title: String,
    pub description: Option<String>,
    pub template_id: String,
    pub is_public: bool,
    pub category: Option<String>,
    pub skills: Vec<String>,
    pub content: serde_json::Value,
}

/// Validated partial update. `None` leaves a column unchanged; for the
/// nullable columns `Some(None)` clears it.
#[derive(Default)]
pub struct UpdatePortfolio {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub template_id: Option<String>,
    pub category: Option<Option<String>>,
    pub skills: Option<Vec<String>>,
    pub content: Option<serde_json::Value>,
}

/// A public portfolio as shown in the community feed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedPortfolio {
    pub id: DbId,
    pub user_id: DbId,
    pub owner_display_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub template_id: String,
    pub is_public: bool,
    pub category: Option<String>,
    pub skills: Vec<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for the community feed. `search` is an `ILIKE` pattern.
#[derive(Debug, Default)]
pub struct FeedFilter<'a> {
    pub category: Option<&'a str>,
    pub skill: Option<&'a str>,
    pub search: Option<&'a str>,
}

/// A portfolio in the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminPortfolioRow {
    pub id: DbId,
    pub user_id: DbId,
    pub owner_email: String,
    pub owner_display_name: Option<String>,
    pub title: String,
    pub template_id: String,
    pub is_public: bool,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for the admin portfolio list. `search` is an `ILIKE` pattern.
#[derive(Debug, Default)]
pub struct AdminPortfolioFilter<'a> {
    pub is_public: Option<bool>,
    pub category: Option<&'a str>,
    pub search: Option<&'a str>,
}
