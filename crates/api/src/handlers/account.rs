//! Handlers for the signed-in user's own account (`/me`).

use axum::extract::State;
use axum::Json;
use folio_core::account::validate_display_name;
use folio_core::error::CoreError;
use folio_core::tier::validate_upgrade;
use folio_core::types::DbId;
use folio_db::models::user::{User, UserResponse};
use folio_db::repositories::UserRepo;
use folio_events::event_types::{ENTITY_USER, USER_TIER_CHANGED};
use folio_events::PlatformEvent;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /me`.
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    /// New display name. Blank or absent clears it.
    pub display_name: Option<String>,
}

async fn ensure_user_exists(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// GET /api/v1/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = ensure_user_exists(&state, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let display_name = validate_display_name(input.display_name.as_deref())?;
    let user = UserRepo::update_display_name(&state.pool, auth.user_id, display_name.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/v1/me/upgrade
///
/// Move a free account to the premium plan. The current tier is read from
/// the database, not the token.
pub async fn upgrade(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = ensure_user_exists(&state, auth.user_id).await?;
    let next = validate_upgrade(user.tier())?;

    UserRepo::update_user_role(&state.pool, user.id, next.as_str()).await?;
    let user = ensure_user_exists(&state, user.id).await?;

    tracing::info!(user_id = user.id, tier = %next, "Account upgraded");
    state.event_bus.publish(
        PlatformEvent::new(USER_TIER_CHANGED)
            .with_source(ENTITY_USER, user.id)
            .with_actor(user.id)
            .with_payload(serde_json::json!({ "new_tier": next.as_str() })),
    );

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
