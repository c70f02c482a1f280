//! Support ticket and message models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub admin_id: Option<DbId>,
    pub status: String,
    pub last_updated: Timestamp,
    pub created_at: Timestamp,
}

/// A ticket with requester and assignee names, for admin and owner lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub requester_email: String,
    pub requester_display_name: Option<String>,
    pub admin_id: Option<DbId>,
    pub admin_display_name: Option<String>,
    pub status: String,
    pub message_count: i64,
    pub last_updated: Timestamp,
    pub created_at: Timestamp,
}

/// A row from the `support_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportMessage {
    pub id: DbId,
    pub ticket_id: DbId,
    pub sender_id: DbId,
    pub message: String,
    pub created_at: Timestamp,
}

/// A message joined with its sender.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSender {
    pub id: DbId,
    pub ticket_id: DbId,
    pub sender_id: DbId,
    pub sender_display_name: Option<String>,
    pub sender_tier: String,
    pub message: String,
    pub created_at: Timestamp,
}
