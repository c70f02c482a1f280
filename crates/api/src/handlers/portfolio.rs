//! Handlers for the owner's `/portfolios` resource and the public share path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::content::{safe_parse_optional, safe_parse_portfolio_content, PortfolioContent};
use folio_core::error::CoreError;
use folio_core::portfolio::{
    ensure_publicly_visible, normalize_skills, share_url, validate_category,
    validate_description, validate_title,
};
use folio_core::template::{authorize_selection, DEFAULT_TEMPLATE_ID};
use folio_core::types::{DbId, Timestamp};
use folio_db::models::portfolio::{CreatePortfolio, Portfolio, UpdatePortfolio};
use folio_db::repositories::{PortfolioRepo, UserRepo};
use serde::{Deserialize, Serialize};

use super::template::current_tier;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /portfolios`.
#[derive(Debug, Deserialize)]
pub struct CreatePortfolioRequest {
    pub title: String,
    pub description: Option<String>,
    pub template_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub category: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub content: Option<serde_json::Value>,
}

/// Request body for `PUT /portfolios/{id}`. Absent fields are left alone;
/// a blank `description` or `category` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePortfolioRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub template_id: Option<String>,
    pub category: Option<String>,
    pub skills: Option<Vec<String>>,
    pub content: Option<serde_json::Value>,
}

/// Request body for `PUT /portfolios/{id}/visibility`.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub is_public: bool,
}

/// A portfolio with its content normalized to the current schema.
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub template_id: String,
    pub is_public: bool,
    pub category: Option<String>,
    pub skills: Vec<String>,
    pub content: PortfolioContent,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(p: Portfolio) -> Self {
        Self {
            content: safe_parse_portfolio_content(&p.content),
            id: p.id,
            user_id: p.user_id,
            title: p.title,
            description: p.description,
            template_id: p.template_id,
            is_public: p.is_public,
            category: p.category,
            skills: p.skills,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Public view returned by `GET /share/{id}`.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    #[serde(flatten)]
    pub portfolio: PortfolioResponse,
    pub share_url: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn ensure_portfolio_exists(state: &AppState, id: DbId) -> AppResult<Portfolio> {
    PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }))
}

/// Load a portfolio the caller owns. Other users' portfolios read as absent.
async fn ensure_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Portfolio> {
    let portfolio = ensure_portfolio_exists(state, id).await?;
    if portfolio.user_id != user_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }));
    }
    Ok(portfolio)
}

/// Resolve the template against the caller's stored tier.
async fn authorize_template(state: &AppState, user_id: DbId, template_id: &str) -> AppResult<String> {
    let tier = current_tier(state, user_id).await?;
    let template = authorize_selection(template_id, tier)?;
    Ok(template.id.to_string())
}

// ---------------------------------------------------------------------------
// Owner handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/portfolios
///
/// The caller's portfolios, most recently updated first.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PortfolioResponse>>>> {
    let portfolios = PortfolioRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: portfolios.into_iter().map(PortfolioResponse::from).collect(),
    }))
}

/// POST /api/v1/portfolios
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePortfolioRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PortfolioResponse>>)> {
    let title = validate_title(&input.title)?;
    let description = validate_description(input.description.as_deref())?;
    let category = validate_category(input.category.as_deref())?;
    let skills = normalize_skills(&input.skills)?;
    let template_id = authorize_template(
        &state,
        auth.user_id,
        input.template_id.as_deref().unwrap_or(DEFAULT_TEMPLATE_ID),
    )
    .await?;
    let content = safe_parse_optional(input.content.as_ref()).to_stored_value();

    let portfolio = PortfolioRepo::create(
        &state.pool,
        auth.user_id,
        &CreatePortfolio {
            title,
            description,
            template_id,
            is_public: input.is_public,
            category,
            skills,
            content,
        },
    )
    .await?;

    tracing::info!(
        portfolio_id = portfolio.id,
        user_id = auth.user_id,
        template_id = %portfolio.template_id,
        "Portfolio created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: portfolio.into(),
        }),
    ))
}

/// GET /api/v1/portfolios/{id}
///
/// Visible to the owner and to admins.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PortfolioResponse>>> {
    let portfolio = ensure_portfolio_exists(&state, id).await?;
    if portfolio.user_id != auth.user_id && !UserRepo::is_admin(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }));
    }
    Ok(Json(DataResponse {
        data: portfolio.into(),
    }))
}

/// PUT /api/v1/portfolios/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePortfolioRequest>,
) -> AppResult<Json<DataResponse<PortfolioResponse>>> {
    ensure_owned(&state, id, auth.user_id).await?;

    let template_id = match input.template_id.as_deref() {
        Some(t) => Some(authorize_template(&state, auth.user_id, t).await?),
        None => None,
    };
    let changes = UpdatePortfolio {
        title: input.title.as_deref().map(validate_title).transpose()?,
        description: input
            .description
            .as_deref()
            .map(|d| validate_description(Some(d)))
            .transpose()?,
        template_id,
        category: input
            .category
            .as_deref()
            .map(|c| validate_category(Some(c)))
            .transpose()?,
        skills: input.skills.as_deref().map(normalize_skills).transpose()?,
        content: input
            .content
            .as_ref()
            .map(|c| safe_parse_portfolio_content(c).to_stored_value()),
    };

    let portfolio = PortfolioRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }))?;

    tracing::info!(portfolio_id = id, user_id = auth.user_id, "Portfolio updated");
    Ok(Json(DataResponse {
        data: portfolio.into(),
    }))
}

/// PUT /api/v1/portfolios/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<VisibilityRequest>,
) -> AppResult<Json<DataResponse<PortfolioResponse>>> {
    ensure_owned(&state, id, auth.user_id).await?;
    let portfolio = PortfolioRepo::set_visibility(&state.pool, id, input.is_public)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }))?;

    tracing::info!(
        portfolio_id = id,
        user_id = auth.user_id,
        is_public = input.is_public,
        "Portfolio visibility changed"
    );
    Ok(Json(DataResponse {
        data: portfolio.into(),
    }))
}

/// DELETE /api/v1/portfolios/{id}
///
/// Likes and comments of the portfolio go with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owned(&state, id, auth.user_id).await?;
    PortfolioRepo::delete(&state.pool, id).await?;
    tracing::info!(portfolio_id = id, user_id = auth.user_id, "Portfolio deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Public share
// ---------------------------------------------------------------------------

/// GET /api/v1/share/{id}
///
/// No authentication. Private portfolios answer 403.
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShareResponse>>> {
    let portfolio = ensure_portfolio_exists(&state, id).await?;
    ensure_publicly_visible(portfolio.is_public)?;

    Ok(Json(DataResponse {
        data: ShareResponse {
            share_url: share_url(&state.config.public_base_url, id),
            portfolio: portfolio.into(),
        },
    }))
}
