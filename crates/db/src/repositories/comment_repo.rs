//! Repository for the `portfolio_comments` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::engagement::{Comment, CommentWithAuthor};

const COLUMNS: &str = "id, portfolio_id, user_id, content, created_at, updated_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        portfolio_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_comments (portfolio_id, user_id, content) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(portfolio_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a portfolio with author names, newest first.
    pub async fn list_for_portfolio(
        pool: &PgPool,
        portfolio_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.portfolio_id, c.user_id, c.content, \
                    u.display_name AS author_display_name, c.created_at, c.updated_at \
             FROM portfolio_comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.portfolio_id = $1 \
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(portfolio_id)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
