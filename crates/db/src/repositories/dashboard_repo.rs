//! Admin dashboard reads over the reporting views.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardMetricsRow, RecentPortfolio, TemplateUsage};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts from the `admin_dashboard_metrics` view.
    pub async fn metrics(pool: &PgPool) -> Result<DashboardMetricsRow, sqlx::Error> {
        sqlx::query_as::<_, DashboardMetricsRow>(
            "SELECT total_users, premium_users, admin_users, public_portfolios \
             FROM admin_dashboard_metrics",
        )
        .fetch_one(pool)
        .await
    }

    /// Users who signed in within the last `days` days.
    pub async fn active_users_since_days(pool: &PgPool, days: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE last_sign_in_at >= NOW() - make_interval(days => $1)",
        )
        .bind(days)
        .fetch_one(pool)
        .await
    }

    pub async fn recent_portfolios(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentPortfolio>, sqlx::Error> {
        sqlx::query_as::<_, RecentPortfolio>(
            "SELECT p.id, p.title, p.user_id, u.display_name AS owner_display_name, p.created_at \
             FROM portfolios p JOIN users u ON u.id = p.user_id \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// The `template_usage_stats` view, most used first.
    pub async fn template_usage(pool: &PgPool) -> Result<Vec<TemplateUsage>, sqlx::Error> {
        sqlx::query_as::<_, TemplateUsage>(
            "SELECT template_id, portfolio_count, unique_user_count \
             FROM template_usage_stats \
             ORDER BY portfolio_count DESC, template_id",
        )
        .fetch_all(pool)
        .await
    }
}
