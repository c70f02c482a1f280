//! Admin console handlers: dashboard, users, portfolios and the report
//! queue.
//!
//! Every handler requires [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::moderation::{self, ensure_actionable, ReportAction, TARGET_COMMENT};
use folio_core::search::{ilike_contains, non_blank};
use folio_core::tier::UserTier;
use folio_core::types::DbId;
use folio_db::models::dashboard::{DashboardMetricsRow, RecentPortfolio, TemplateUsage};
use folio_db::models::portfolio::{AdminPortfolioFilter, AdminPortfolioRow};
use folio_db::models::report::{ContentReport, ReportGroup};
use folio_db::models::user::AdminUserRow;
use folio_db::repositories::{CommentRepo, DashboardRepo, PortfolioRepo, ReportRepo, UserRepo};
use folio_events::event_types::{ENTITY_USER, USER_TIER_CHANGED};
use folio_events::PlatformEvent;
use serde::{Deserialize, Serialize};

use super::portfolio::{ensure_portfolio_exists, PortfolioResponse, VisibilityRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, StatusFilterParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Window for the "active users" figure.
const ACTIVE_USER_WINDOW_DAYS: i32 = 7;

/// Number of portfolios in the recent-activity panel.
const RECENT_PORTFOLIO_COUNT: i64 = 5;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub metrics: DashboardMetricsRow,
    pub active_users: i64,
    pub recent_portfolios: Vec<RecentPortfolio>,
}

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    /// Matched against email and display name.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub tier: String,
}

/// Query parameters for `GET /admin/portfolios`.
#[derive(Debug, Default, Deserialize)]
pub struct PortfolioListQuery {
    pub is_public: Option<bool>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/reports/{id}/action`.
#[derive(Debug, Deserialize)]
pub struct ReportActionRequest {
    pub action: ReportAction,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard/metrics
pub async fn dashboard_metrics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let metrics = DashboardRepo::metrics(&state.pool).await?;
    let active_users =
        DashboardRepo::active_users_since_days(&state.pool, ACTIVE_USER_WINDOW_DAYS).await?;
    let recent_portfolios =
        DashboardRepo::recent_portfolios(&state.pool, RECENT_PORTFOLIO_COUNT).await?;

    Ok(Json(DataResponse {
        data: DashboardResponse {
            metrics,
            active_users,
            recent_portfolios,
        },
    }))
}

/// GET /api/v1/admin/dashboard/template-usage
pub async fn template_usage(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<TemplateUsage>>>> {
    let usage = DashboardRepo::template_usage(&state.pool).await?;
    Ok(Json(DataResponse { data: usage }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminUserRow>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let search = params.search.as_deref().and_then(ilike_contains);
    let users =
        UserRepo::list_with_portfolio_counts(&state.pool, search.as_deref(), limit, offset)
            .await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Admins cannot change their own tier.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RoleRequest>,
) -> AppResult<StatusCode> {
    let tier = UserTier::parse_strict(&input.tier)?;
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot change your own role".into()));
    }

    if !UserRepo::update_user_role(&state.pool, id, tier.as_str()).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, admin_id = admin.user_id, tier = %tier, "User tier changed");
    state.event_bus.publish(
        PlatformEvent::new(USER_TIER_CHANGED)
            .with_source(ENTITY_USER, id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "new_tier": tier.as_str() })),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id}
///
/// Removes the account and everything it owns.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot delete your own account".into()));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Portfolios
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/portfolios
pub async fn list_portfolios(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PortfolioListQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminPortfolioRow>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let category = non_blank(params.category.as_deref()).map(str::to_lowercase);
    let search = params.search.as_deref().and_then(ilike_contains);

    let filter = AdminPortfolioFilter {
        is_public: params.is_public,
        category: category.as_deref(),
        search: search.as_deref(),
    };
    let rows = PortfolioRepo::list_admin(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// PUT /api/v1/admin/portfolios/{id}/visibility
pub async fn set_portfolio_visibility(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<VisibilityRequest>,
) -> AppResult<Json<DataResponse<PortfolioResponse>>> {
    let portfolio = PortfolioRepo::set_visibility(&state.pool, id, input.is_public)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio",
            id,
        }))?;
    tracing::info!(
        portfolio_id = id,
        admin_id = admin.user_id,
        is_public = input.is_public,
        "Portfolio visibility changed by admin"
    );
    Ok(Json(DataResponse {
        data: portfolio.into(),
    }))
}

/// DELETE /api/v1/admin/portfolios/{id}
pub async fn delete_portfolio(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_portfolio_exists(&state, id).await?;
    PortfolioRepo::delete(&state.pool, id).await?;
    tracing::info!(portfolio_id = id, admin_id = admin.user_id, "Portfolio deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/reports
///
/// Reports grouped by target and status.
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<ReportGroup>>>> {
    if let Some(status) = params.status.as_deref() {
        moderation::validate_status(status)?;
    }
    let (limit, offset) = params.pagination().resolve();
    let groups =
        ReportRepo::list_grouped(&state.pool, params.status.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/admin/reports/{id}/action
///
/// `delete` removes the reported item and settles every pending report on
/// it. `resolve` and `ignore` settle this report only.
pub async fn act_on_report(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReportActionRequest>,
) -> AppResult<Json<DataResponse<ContentReport>>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;
    ensure_actionable(&report.status)?;

    let status = input.action.resulting_status();
    let settled = ReportRepo::settle(&state.pool, id, status, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Report was settled concurrently".into()))
        })?;

    if input.action.removes_target() {
        let removed = if report.target_type == TARGET_COMMENT {
            CommentRepo::delete(&state.pool, report.target_id).await?
        } else {
            PortfolioRepo::delete(&state.pool, report.target_id).await?
        };
        let others = ReportRepo::settle_pending_for_target(
            &state.pool,
            &report.target_type,
            report.target_id,
            status,
            admin.user_id,
        )
        .await?;
        tracing::info!(
            report_id = id,
            target_type = %report.target_type,
            target_id = report.target_id,
            removed,
            other_reports_settled = others,
            admin_id = admin.user_id,
            "Reported content deleted"
        );
    } else {
        tracing::info!(
            report_id = id,
            status,
            admin_id = admin.user_id,
            "Report settled"
        );
    }

    Ok(Json(DataResponse { data: settled }))
}
