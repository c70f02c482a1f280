//! Handlers for linked provider accounts and importing their data.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::connection::{ProviderProfile, ServiceName};
use folio_core::content::{safe_parse_portfolio_content, PortfolioContent};
use folio_core::error::CoreError;
use folio_core::import::{available_options, build_patch, ContentPatch, ImportKind, ImportOption};
use folio_core::types::{DbId, Timestamp};
use folio_db::models::connection::{ConnectionResponse, UpsertConnection};
use folio_db::models::portfolio::UpdatePortfolio;
use folio_db::repositories::{ConnectionRepo, PortfolioRepo, UserRepo};
use serde::{Deserialize, Serialize};

use super::portfolio::ensure_portfolio_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::oauth::{GithubClient, LinkedinClient};
use crate::response::DataResponse;
use crate::state::AppState;

const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one data source to import.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /connections/{service}/link`.
///
/// Carries the provider tokens obtained by the client-side OAuth exchange.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds, as reported by the provider.
    pub expires_in: Option<i64>,
}

/// Request body for `POST /connections/import`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Import option ids, e.g. `github-projects`.
    #[serde(default)]
    pub selections: Vec<String>,
    /// When set, the patch is applied to this portfolio and saved.
    pub portfolio_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub patch: ContentPatch,
    /// The saved content, present when a portfolio was targeted.
    pub content: Option<PortfolioContent>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Profiles stored for the user's linked services.
async fn linked_profiles(state: &AppState, user_id: DbId) -> AppResult<Vec<ProviderProfile>> {
    let connections = ConnectionRepo::list_for_user(&state.pool, user_id).await?;
    Ok(connections.iter().filter_map(|c| c.profile()).collect())
}

async fn fetch_profile(
    state: &AppState,
    service: ServiceName,
    user_id: DbId,
    access_token: &str,
) -> AppResult<ProviderProfile> {
    let profile = match service {
        ServiceName::Github => {
            let client = GithubClient::new(state.http.clone(), state.config.github_api_url.clone());
            ProviderProfile::Github(client.fetch_profile(access_token).await?)
        }
        ServiceName::Linkedin => {
            let email = UserRepo::find_by_id(&state.pool, user_id)
                .await?
                .map(|u| u.email);
            let client =
                LinkedinClient::new(state.http.clone(), state.config.linkedin_api_url.clone());
            ProviderProfile::Linkedin(
                client
                    .fetch_profile_or_fallback(access_token, email.as_deref())
                    .await,
            )
        }
    };
    Ok(profile)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/connections
///
/// Tokens are never part of the response.
pub async fn list_connections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ConnectionResponse>>>> {
    let connections = ConnectionRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: connections.iter().map(ConnectionResponse::from).collect(),
    }))
}

/// POST /api/v1/connections/{service}/link
///
/// Read the provider profile with the given token and store the
/// connection, replacing any earlier link to the same service.
pub async fn link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(service): Path<String>,
    Json(input): Json<LinkRequest>,
) -> AppResult<Json<DataResponse<ConnectionResponse>>> {
    let service = ServiceName::parse(&service)?;
    if input.access_token.trim().is_empty() {
        return Err(AppError::BadRequest("access_token is required".into()));
    }

    let token_expires_at = input
        .expires_in
        .filter(|secs| *secs > 0)
        .map(token_expiry)
        .transpose()?;

    let profile = fetch_profile(&state, service, auth.user_id, &input.access_token).await?;

    let access_token = state.token_cipher.encrypt(&input.access_token)?;
    let refresh_token = input
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| state.token_cipher.encrypt(t))
        .transpose()?;

    let connection = ConnectionRepo::upsert(
        &state.pool,
        &UpsertConnection {
            user_id: auth.user_id,
            service_name: service.as_str().to_string(),
            service_user_id: profile.service_user_id(),
            access_token,
            refresh_token,
            token_expires_at,
            profile_data: profile.to_stored(),
        },
    )
    .await?;

    tracing::info!(
        connection_id = connection.id,
        user_id = auth.user_id,
        service = %service,
        "Service linked"
    );
    Ok(Json(DataResponse {
        data: ConnectionResponse::from(&connection),
    }))
}

/// Absolute expiry for a provider token valid for `secs` seconds.
fn token_expiry(secs: i64) -> AppResult<Timestamp> {
    chrono::Duration::try_seconds(secs)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| AppError::BadRequest("expires_in is out of range".into()))
}

/// DELETE /api/v1/connections/{id}
pub async fn unlink(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConnectionRepo::delete_for_user(&state.pool, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id,
        }));
    }
    tracing::info!(connection_id = id, user_id = auth.user_id, "Service unlinked");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/connections/import-options
pub async fn import_options(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ImportOption>>>> {
    let linked: Vec<ServiceName> = linked_profiles(&state, auth.user_id)
        .await?
        .iter()
        .map(ProviderProfile::service)
        .collect();
    Ok(Json(DataResponse {
        data: available_options(&linked),
    }))
}

/// POST /api/v1/connections/import
///
/// Build a content patch from the selected sources. With `portfolio_id`
/// the patch is also applied to that portfolio.
pub async fn import(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ImportRequest>,
) -> AppResult<Json<DataResponse<ImportResponse>>> {
    if input.selections.is_empty() {
        return Err(AppError::BadRequest(EMPTY_SELECTION_MESSAGE.into()));
    }
    let selected = input
        .selections
        .iter()
        .map(|s| ImportKind::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let profiles = linked_profiles(&state, auth.user_id).await?;
    let patch = build_patch(&selected, &profiles);

    let content = match input.portfolio_id {
        Some(portfolio_id) => {
            let portfolio = ensure_portfolio_exists(&state, portfolio_id).await?;
            if portfolio.user_id != auth.user_id {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Portfolio",
                    id: portfolio_id,
                }));
            }

            let mut content = safe_parse_portfolio_content(&portfolio.content);
            patch.apply_to(&mut content);
            PortfolioRepo::update(
                &state.pool,
                portfolio_id,
                &UpdatePortfolio {
                    content: Some(content.to_stored_value()),
                    ..Default::default()
                },
            )
            .await?;
            tracing::info!(
                portfolio_id,
                user_id = auth.user_id,
                selections = selected.len(),
                "Imported data into portfolio"
            );
            Some(content)
        }
        None => None,
    };

    Ok(Json(DataResponse {
        data: ImportResponse { patch, content },
    }))
}
