//! Admin dashboard aggregates.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `admin_dashboard_metrics` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardMetricsRow {
    pub total_users: i64,
    pub premium_users: i64,
    pub admin_users: i64,
    pub public_portfolios: i64,
}

/// A row from the `template_usage_stats` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateUsage {
    pub template_id: String,
    pub portfolio_count: i64,
    pub unique_user_count: i64,
}

/// A recently created portfolio for the activity panel.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentPortfolio {
    pub id: DbId,
    pub title: String,
    pub user_id: DbId,
    pub owner_display_name: Option<String>,
    pub created_at: Timestamp,
}
