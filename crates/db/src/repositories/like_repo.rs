//! Repository for the `portfolio_likes` table.

use folio_core::types::DbId;
use sqlx::PgPool;

pub struct LikeRepo;

impl LikeRepo {
    /// Exact like count for a portfolio.
    pub async fn count(pool: &PgPool, portfolio_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM portfolio_likes WHERE portfolio_id = $1")
            .bind(portfolio_id)
            .fetch_one(pool)
            .await
    }

    pub async fn exists(
        pool: &PgPool,
        portfolio_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM portfolio_likes WHERE portfolio_id = $1 AND user_id = $2)",
        )
        .bind(portfolio_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a like. A duplicate hits `uq_portfolio_likes_portfolio_user`
    /// and is ignored.
    pub async fn insert(pool: &PgPool, portfolio_id: DbId, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO portfolio_likes (portfolio_id, user_id) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_portfolio_likes_portfolio_user DO NOTHING",
        )
        .bind(portfolio_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, portfolio_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_likes WHERE portfolio_id = $1 AND user_id = $2")
            .bind(portfolio_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
