use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    folio_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_sessions",
        "portfolios",
        "portfolio_likes",
        "portfolio_comments",
        "user_connections",
        "notifications",
        "user_notification_settings",
        "support_tickets",
        "support_messages",
        "content_reports",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The reporting views answer on an empty database.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_views_exist(pool: PgPool) {
    let metrics = folio_db::repositories::DashboardRepo::metrics(&pool)
        .await
        .unwrap();
    assert_eq!(metrics.total_users, 0);
    assert_eq!(metrics.public_portfolios, 0);

    let usage = folio_db::repositories::DashboardRepo::template_usage(&pool)
        .await
        .unwrap();
    assert!(usage.is_empty());
}
