//! Like and comment rows.

use folio_core::engagement::CommentRecord;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `portfolio_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub portfolio_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub portfolio_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub author_display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentWithAuthor> for CommentRecord {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.id,
            portfolio_id: c.portfolio_id,
            user_id: c.user_id,
            content: c.content,
            author_display_name: c.author_display_name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
