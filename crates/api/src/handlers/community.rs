//! Handlers for the public community feed.

use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::content::{safe_parse_portfolio_content, PortfolioContent};
use folio_core::error::CoreError;
use folio_core::portfolio::{ensure_publicly_visible, share_url};
use folio_core::search::{
    clamp_limit, clamp_offset, ilike_contains, non_blank, DEFAULT_FEED_LIMIT, MAX_LIST_LIMIT,
};
use folio_core::types::DbId;
use folio_db::models::portfolio::{FeedFilter, FeedPortfolio};
use folio_db::repositories::PortfolioRepo;
use serde::{Deserialize, Serialize};

use super::portfolio::ensure_portfolio_exists;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /community/portfolios`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub category: Option<String>,
    /// Exact skill tag, compared case-insensitively.
    pub skill: Option<String>,
    /// Free text matched against title and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A feed entry with its content, for the community detail view.
#[derive(Debug, Serialize)]
pub struct FeedDetail {
    #[serde(flatten)]
    pub entry: FeedPortfolio,
    pub content: PortfolioContent,
    pub share_url: String,
}

/// GET /api/v1/community/portfolios
pub async fn list_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> AppResult<Json<DataResponse<Vec<FeedPortfolio>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_FEED_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let category = non_blank(params.category.as_deref()).map(str::to_lowercase);
    let search = params.search.as_deref().and_then(ilike_contains);

    let filter = FeedFilter {
        category: category.as_deref(),
        skill: non_blank(params.skill.as_deref()),
        search: search.as_deref(),
    };
    let entries = PortfolioRepo::list_public_feed(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/community/portfolios/{id}
pub async fn get_feed_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<FeedDetail>>> {
    let entry = PortfolioRepo::find_feed_entry(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }))?;
    ensure_publicly_visible(entry.is_public)?;

    let portfolio = ensure_portfolio_exists(&state, id).await?;
    Ok(Json(DataResponse {
        data: FeedDetail {
            content: safe_parse_portfolio_content(&portfolio.content),
            share_url: share_url(&state.config.public_base_url, id),
            entry,
        },
    }))
}
