//! Handler for user-filed moderation reports.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::moderation::{validate_reason, validate_target_type, TARGET_COMMENT};
use folio_core::types::DbId;
use folio_db::models::report::{ContentReport, CreateReport};
use folio_db::repositories::{CommentRepo, PortfolioRepo, ReportRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reports`.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    /// `portfolio` or `comment`.
    pub target_type: String,
    pub target_id: DbId,
    pub reason: String,
}

/// Whether the reported item currently exists.
pub(crate) async fn target_exists(
    state: &AppState,
    target_type: &str,
    target_id: DbId,
) -> AppResult<bool> {
    let found = if target_type == TARGET_COMMENT {
        CommentRepo::find_by_id(&state.pool, target_id).await?.is_some()
    } else {
        PortfolioRepo::find_by_id(&state.pool, target_id).await?.is_some()
    };
    Ok(found)
}

/// POST /api/v1/reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContentReport>>)> {
    validate_target_type(&input.target_type)?;
    let reason = validate_reason(&input.reason)?;

    if !target_exists(&state, &input.target_type, input.target_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: if input.target_type == TARGET_COMMENT {
                "Comment"
            } else {
                "Portfolio"
            },
            id: input.target_id,
        }));
    }

    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            reporter_id: auth.user_id,
            target_type: input.target_type,
            target_id: input.target_id,
            reason,
        },
    )
    .await?;

    tracing::info!(
        report_id = report.id,
        target_type = %report.target_type,
        target_id = report.target_id,
        user_id = auth.user_id,
        "Content reported"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}
