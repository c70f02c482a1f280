//! Handlers for support tickets, for both the requesting user and admins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::engagement::display_name_or_fallback;
use folio_core::error::CoreError;
use folio_core::support::{
    is_active, validate_message, validate_status, validate_transition, STATUS_CLOSED,
    STATUS_IN_PROGRESS,
};
use folio_core::tier::UserTier;
use folio_core::types::{DbId, Timestamp};
use folio_db::models::support::{MessageWithSender, SupportMessage, SupportTicket, TicketSummary};
use folio_db::repositories::{SupportRepo, UserRepo};
use folio_events::event_types::{ENTITY_SUPPORT_TICKET, SUPPORT_MESSAGE_SENT};
use folio_events::PlatformEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /support/tickets`.
#[derive(Debug, Default, Deserialize)]
pub struct OpenTicketRequest {
    /// Optional first message.
    pub message: Option<String>,
}

/// Request body for the message-sending endpoints.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// A message with its sender resolved for display.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: DbId,
    pub ticket_id: DbId,
    pub sender_id: DbId,
    pub sender_name: String,
    pub from_admin: bool,
    pub message: String,
    pub created_at: Timestamp,
}

impl From<MessageWithSender> for MessageView {
    fn from(m: MessageWithSender) -> Self {
        Self {
            sender_name: display_name_or_fallback(m.sender_display_name.as_deref(), m.sender_id),
            from_admin: UserTier::parse_lenient(&m.sender_tier).is_admin(),
            id: m.id,
            ticket_id: m.ticket_id,
            sender_id: m.sender_id,
            message: m.message,
            created_at: m.created_at,
        }
    }
}

/// Result of `POST /support/messages`.
#[derive(Debug, Serialize)]
pub struct SentMessage {
    pub ticket: SupportTicket,
    pub message: SupportMessage,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_ticket_exists(state: &AppState, id: DbId) -> AppResult<SupportTicket> {
    SupportRepo::find_ticket(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))
}

/// Load a ticket the caller may read: their own, or any ticket for an
/// admin. Returns the ticket and whether the caller is acting as admin.
async fn ensure_ticket_access(
    state: &AppState,
    ticket_id: DbId,
    user_id: DbId,
) -> AppResult<(SupportTicket, bool)> {
    let ticket = ensure_ticket_exists(state, ticket_id).await?;
    let is_admin = UserRepo::is_admin(&state.pool, user_id).await?;
    if ticket.user_id != user_id && !is_admin {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id: ticket_id,
        }));
    }
    Ok((ticket, is_admin))
}

/// Append a message and announce it on the event bus.
async fn post_message(
    state: &AppState,
    ticket: &SupportTicket,
    sender_id: DbId,
    from_admin: bool,
    text: &str,
) -> AppResult<SupportMessage> {
    let message = SupportRepo::add_message(&state.pool, ticket.id, sender_id, text).await?;

    tracing::info!(
        ticket_id = ticket.id,
        message_id = message.id,
        user_id = sender_id,
        from_admin,
        "Support message sent"
    );
    state.event_bus.publish(
        PlatformEvent::new(SUPPORT_MESSAGE_SENT)
            .with_source(ENTITY_SUPPORT_TICKET, ticket.id)
            .with_actor(sender_id)
            .with_payload(serde_json::json!({
                "ticket_owner_id": ticket.user_id,
                "from_admin": from_admin,
            })),
    );
    Ok(message)
}

// ---------------------------------------------------------------------------
// User handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/support/tickets
pub async fn list_my_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TicketSummary>>>> {
    let tickets = SupportRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// POST /api/v1/support/tickets
///
/// A user has at most one active ticket; opening another answers 409.
pub async fn open_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<OpenTicketRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SupportTicket>>)> {
    let first_message = input
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(validate_message)
        .transpose()?;

    if let Some(active) = SupportRepo::find_active_for_user(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Support ticket {} is still open",
            active.id
        ))));
    }

    let mut ticket = SupportRepo::create_ticket(&state.pool, auth.user_id).await?;
    tracing::info!(ticket_id = ticket.id, user_id = auth.user_id, "Support ticket opened");

    if let Some(text) = first_message {
        post_message(&state, &ticket, auth.user_id, false, &text).await?;
        ticket = ensure_ticket_exists(&state, ticket.id).await?;
    }
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// POST /api/v1/support/messages
///
/// Write to the caller's active ticket, opening one if there is none.
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SentMessage>>)> {
    let text = validate_message(&input.message)?;

    let ticket = match SupportRepo::find_active_for_user(&state.pool, auth.user_id).await? {
        Some(ticket) => ticket,
        None => {
            let ticket = SupportRepo::create_ticket(&state.pool, auth.user_id).await?;
            tracing::info!(ticket_id = ticket.id, user_id = auth.user_id, "Support ticket opened");
            ticket
        }
    };

    let message = post_message(&state, &ticket, auth.user_id, false, &text).await?;
    let ticket = ensure_ticket_exists(&state, ticket.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SentMessage { ticket, message },
        }),
    ))
}

/// GET /api/v1/support/tickets/{id}/messages
///
/// Oldest first. The ticket owner and admins only.
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MessageView>>>> {
    ensure_ticket_access(&state, ticket_id, auth.user_id).await?;
    let messages = SupportRepo::list_messages(&state.pool, ticket_id)
        .await?
        .into_iter()
        .map(MessageView::from)
        .collect();
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/support/tickets/{id}/messages
///
/// Closed tickets do not accept messages.
pub async fn reply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SupportMessage>>)> {
    let text = validate_message(&input.message)?;
    let (ticket, is_admin) = ensure_ticket_access(&state, ticket_id, auth.user_id).await?;
    if !is_active(&ticket.status) {
        return Err(AppError::Core(CoreError::Conflict(
            "This ticket is closed".into(),
        )));
    }

    let from_admin = is_admin && ticket.user_id != auth.user_id;
    let message = post_message(&state, &ticket, auth.user_id, from_admin, &text).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/support/tickets
pub async fn admin_list_tickets(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<TicketSummary>>>> {
    if let Some(status) = params.status.as_deref() {
        validate_status(status)?;
    }
    let (limit, offset) = params.pagination().resolve();
    let tickets =
        SupportRepo::list_all(&state.pool, params.status.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// POST /api/v1/admin/support/tickets/{id}/assign
///
/// Assign the ticket to the calling admin and mark it in progress. An
/// in-progress ticket may be taken over by another admin.
pub async fn assign(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SupportTicket>>> {
    let ticket = ensure_ticket_exists(&state, id).await?;
    if ticket.status != STATUS_IN_PROGRESS {
        validate_transition(&ticket.status, STATUS_IN_PROGRESS)?;
    }

    let ticket = SupportRepo::assign(&state.pool, id, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;
    tracing::info!(ticket_id = id, admin_id = admin.user_id, "Support ticket assigned");
    Ok(Json(DataResponse { data: ticket }))
}

/// POST /api/v1/admin/support/tickets/{id}/close
pub async fn close(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SupportTicket>>> {
    let ticket = ensure_ticket_exists(&state, id).await?;
    validate_transition(&ticket.status, STATUS_CLOSED)?;

    let ticket = SupportRepo::set_status(&state.pool, id, STATUS_CLOSED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;
    tracing::info!(ticket_id = id, admin_id = admin.user_id, "Support ticket closed");
    Ok(Json(DataResponse { data: ticket }))
}
