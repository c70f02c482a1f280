//! Likes and comments on portfolios.
//!
//! The read path is a point-in-time snapshot assembled from three independent
//! store reads: the like count, whether the viewer liked the portfolio, and
//! the comment list. Nothing is cached and no counter is kept; the count is
//! always derived from the like rows themselves.
//!
//! Storage is abstracted behind [`EngagementStore`] so the aggregation and
//! toggle logic can be exercised without a database.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a comment in characters.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A comment row joined with its author's display name, as the store sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: DbId,
    pub portfolio_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub author_display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment with its author name resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: DbId,
    pub portfolio_id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentRecord> for CommentView {
    fn from(r: CommentRecord) -> Self {
        Self {
            display_name: display_name_or_fallback(r.author_display_name.as_deref(), r.user_id),
            id: r.id,
            portfolio_id: r.portfolio_id,
            user_id: r.user_id,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Like state for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub like_count: i64,
    pub user_liked: bool,
}

/// Everything the portfolio view needs about engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementSnapshot {
    pub like_count: i64,
    pub user_liked: bool,
    pub comments: Vec<CommentView>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Persistence operations the engagement logic relies on.
pub trait EngagementStore: Send + Sync {
    type Error: Send;

    /// Exact number of likes on a portfolio.
    fn count_likes(
        &self,
        portfolio_id: DbId,
    ) -> impl std::future::Future<Output = Result<i64, Self::Error>> + Send;

    /// Whether `user_id` currently likes the portfolio.
    fn has_liked(
        &self,
        portfolio_id: DbId,
        user_id: DbId,
    ) -> impl std::future::Future<Output = Result<bool, Self::Error>> + Send;

    /// Record a like. Inserting an existing like is a no-op.
    fn insert_like(
        &self,
        portfolio_id: DbId,
        user_id: DbId,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;

    /// Remove a like, returning whether one existed.
    fn delete_like(
        &self,
        portfolio_id: DbId,
        user_id: DbId,
    ) -> impl std::future::Future<Output = Result<bool, Self::Error>> + Send;

    /// Comments on a portfolio, newest first.
    fn list_comments(
        &self,
        portfolio_id: DbId,
    ) -> impl std::future::Future<Output = Result<Vec<CommentRecord>, Self::Error>> + Send;
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Assemble the engagement snapshot for `viewer` (anonymous when `None`).
pub async fn load_snapshot<S: EngagementStore>(
    store: &S,
    portfolio_id: DbId,
    viewer: Option<DbId>,
) -> Result<EngagementSnapshot, S::Error> {
    let like_count = store.count_likes(portfolio_id).await?;
    let user_liked = match viewer {
        Some(user_id) => store.has_liked(portfolio_id, user_id).await?,
        None => false,
    };
    let comments = store
        .list_comments(portfolio_id)
        .await?
        .into_iter()
        .map(CommentView::from)
        .collect();
    Ok(EngagementSnapshot {
        like_count,
        user_liked,
        comments,
    })
}

/// Flip the viewer's like and return the fresh state.
///
/// Delete-or-insert is chosen from the state read just before. Two
/// concurrent toggles by the same user may both observe the same state; the
/// unique constraint keeps at most one like row either way.
pub async fn toggle_like<S: EngagementStore>(
    store: &S,
    portfolio_id: DbId,
    user_id: DbId,
) -> Result<LikeState, S::Error> {
    if store.has_liked(portfolio_id, user_id).await? {
        store.delete_like(portfolio_id, user_id).await?;
    } else {
        store.insert_like(portfolio_id, user_id).await?;
    }
    Ok(LikeState {
        like_count: store.count_likes(portfolio_id).await?,
        user_liked: store.has_liked(portfolio_id, user_id).await?,
    })
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// `display_name`, or `"User "` plus the first four characters of the id.
pub fn display_name_or_fallback(display_name: Option<&str>, user_id: DbId) -> String {
    match display_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => {
            let id = user_id.to_string();
            let prefix: String = id.chars().take(4).collect();
            format!("User {prefix}")
        }
    }
}

/// Validate comment text: trimmed, non-empty, within the length limit.
pub fn validate_comment(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Comment cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Engagement is open on public portfolios, and to the owner or an admin
/// on private ones.
pub fn can_engage(is_public: bool, owner_id: DbId, viewer_id: Option<DbId>, viewer_is_admin: bool) -> bool {
    is_public || viewer_is_admin || viewer_id == Some(owner_id)
}

/// Comments may be deleted by their author or by an admin.
pub fn can_delete_comment(author_id: DbId, actor_id: DbId, actor_is_admin: bool) -> bool {
    actor_is_admin || author_id == actor_id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
