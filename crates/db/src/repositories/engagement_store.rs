//! Postgres-backed [`EngagementStore`].

use folio_core::engagement::{CommentRecord, EngagementStore};
use folio_core::types::DbId;
use sqlx::PgPool;

use super::{CommentRepo, LikeRepo};

/// Borrowing adapter from the pool to the core engagement seam.
#[derive(Clone, Copy)]
pub struct PgEngagementStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgEngagementStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl EngagementStore for PgEngagementStore<'_> {
    type Error = sqlx::Error;

    async fn count_likes(&self, portfolio_id: DbId) -> Result<i64, sqlx::Error> {
        LikeRepo::count(self.pool, portfolio_id).await
    }

    async fn has_liked(&self, portfolio_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        LikeRepo::exists(self.pool, portfolio_id, user_id).await
    }

    async fn insert_like(&self, portfolio_id: DbId, user_id: DbId) -> Result<(), sqlx::Error> {
        LikeRepo::insert(self.pool, portfolio_id, user_id).await
    }

    async fn delete_like(&self, portfolio_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        LikeRepo::delete(self.pool, portfolio_id, user_id).await
    }

    async fn list_comments(&self, portfolio_id: DbId) -> Result<Vec<CommentRecord>, sqlx::Error> {
        let rows = CommentRepo::list_for_portfolio(self.pool, portfolio_id).await?;
        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }
}
