//! Handler for the template catalog.

use axum::extract::State;
use axum::Json;
use folio_core::template::{can_select, Template, TEMPLATES};
use folio_core::tier::UserTier;
use folio_core::types::DbId;
use folio_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::OptionalAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A catalog entry with the viewer's access to it.
#[derive(Debug, Serialize)]
pub struct TemplateListing {
    #[serde(flatten)]
    pub template: Template,
    pub selectable: bool,
}

/// Tier currently stored for `user_id`. Missing users count as free.
pub(crate) async fn current_tier(state: &AppState, user_id: DbId) -> AppResult<UserTier> {
    Ok(UserRepo::find_tier(&state.pool, user_id)
        .await?
        .map(|t| UserTier::parse_lenient(&t))
        .unwrap_or_default())
}

/// GET /api/v1/templates
///
/// Anonymous viewers see the catalog as a free account would.
pub async fn list_templates(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
) -> AppResult<Json<DataResponse<Vec<TemplateListing>>>> {
    let tier = match viewer.user_id() {
        Some(id) => current_tier(&state, id).await?,
        None => UserTier::Free,
    };

    let listings = TEMPLATES
        .iter()
        .map(|t| TemplateListing {
            template: *t,
            selectable: can_select(t, tier),
        })
        .collect();

    Ok(Json(DataResponse { data: listings }))
}
