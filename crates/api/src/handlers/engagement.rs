//! Handlers for likes and comments on portfolios.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::engagement::{
    can_delete_comment, can_engage, display_name_or_fallback, load_snapshot, toggle_like,
    validate_comment, CommentRecord, CommentView, EngagementSnapshot, LikeState,
};
use folio_core::error::CoreError;
use folio_core::portfolio::NOT_PUBLIC_MESSAGE;
use folio_core::types::DbId;
use folio_db::models::portfolio::Portfolio;
use folio_db::repositories::{CommentRepo, UserRepo};
use folio_db::PgEngagementStore;
use folio_events::event_types::{ENTITY_PORTFOLIO, PORTFOLIO_COMMENTED, PORTFOLIO_LIKED};
use folio_events::PlatformEvent;
use serde::Deserialize;

use super::portfolio::ensure_portfolio_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /portfolios/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Load the portfolio and check the viewer may see its engagement.
async fn ensure_engageable(
    state: &AppState,
    portfolio_id: DbId,
    viewer: Option<DbId>,
) -> AppResult<Portfolio> {
    let portfolio = ensure_portfolio_exists(state, portfolio_id).await?;
    if portfolio.is_public || viewer == Some(portfolio.user_id) {
        return Ok(portfolio);
    }
    let viewer_is_admin = match viewer {
        Some(id) => UserRepo::is_admin(&state.pool, id).await?,
        None => false,
    };
    if !can_engage(portfolio.is_public, portfolio.user_id, viewer, viewer_is_admin) {
        return Err(AppError::Core(CoreError::Forbidden(
            NOT_PUBLIC_MESSAGE.into(),
        )));
    }
    Ok(portfolio)
}

fn activity_event(event_type: &str, portfolio: &Portfolio, actor: DbId) -> PlatformEvent {
    PlatformEvent::new(event_type)
        .with_source(ENTITY_PORTFOLIO, portfolio.id)
        .with_actor(actor)
        .with_payload(serde_json::json!({
            "owner_id": portfolio.user_id,
            "title": portfolio.title,
        }))
}

/// GET /api/v1/portfolios/{id}/engagement
///
/// Like count, the viewer's like, and comments newest first.
pub async fn get_engagement(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EngagementSnapshot>>> {
    ensure_engageable(&state, id, viewer.user_id()).await?;
    let snapshot = load_snapshot(&PgEngagementStore::new(&state.pool), id, viewer.user_id()).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/portfolios/{id}/like
///
/// Toggle the caller's like and return the fresh state.
pub async fn toggle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeState>>> {
    let portfolio = ensure_engageable(&state, id, Some(auth.user_id)).await?;
    let like = toggle_like(&PgEngagementStore::new(&state.pool), id, auth.user_id).await?;

    tracing::info!(
        portfolio_id = id,
        user_id = auth.user_id,
        liked = like.user_liked,
        like_count = like.like_count,
        "Like toggled"
    );
    if like.user_liked {
        state
            .event_bus
            .publish(activity_event(PORTFOLIO_LIKED, &portfolio, auth.user_id));
    }
    Ok(Json(DataResponse { data: like }))
}

/// GET /api/v1/portfolios/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentView>>>> {
    ensure_engageable(&state, id, viewer.user_id()).await?;
    let comments = CommentRepo::list_for_portfolio(&state.pool, id)
        .await?
        .into_iter()
        .map(|c| CommentView::from(CommentRecord::from(c)))
        .collect();
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/portfolios/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentView>>)> {
    let text = validate_comment(&input.content)?;
    let portfolio = ensure_engageable(&state, id, Some(auth.user_id)).await?;

    let comment = CommentRepo::create(&state.pool, id, auth.user_id, &text).await?;
    let author = UserRepo::find_by_id(&state.pool, auth.user_id).await?;

    tracing::info!(
        comment_id = comment.id,
        portfolio_id = id,
        user_id = auth.user_id,
        "Comment added"
    );
    state
        .event_bus
        .publish(activity_event(PORTFOLIO_COMMENTED, &portfolio, auth.user_id));

    let view = CommentView {
        display_name: display_name_or_fallback(
            author.as_ref().and_then(|u| u.display_name.as_deref()),
            auth.user_id,
        ),
        id: comment.id,
        portfolio_id: comment.portfolio_id,
        user_id: comment.user_id,
        content: comment.content,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// DELETE /api/v1/comments/{id}
///
/// Allowed for the comment's author and for admins.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    let is_admin = comment.user_id != auth.user_id
        && UserRepo::is_admin(&state.pool, auth.user_id).await?;
    if !can_delete_comment(comment.user_id, auth.user_id, is_admin) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin can delete this comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    tracing::info!(
        comment_id = id,
        portfolio_id = comment.portfolio_id,
        user_id = auth.user_id,
        "Comment deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
