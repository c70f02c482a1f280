//! Repository for `support_tickets` and `support_messages`.

use folio_core::support::{ACTIVE_STATUSES, STATUS_IN_PROGRESS};
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::support::{MessageWithSender, SupportMessage, SupportTicket, TicketSummary};

const TICKET_COLUMNS: &str = "id, user_id, admin_id, status, last_updated, created_at";
const MESSAGE_COLUMNS: &str = "id, ticket_id, sender_id, message, created_at";

const SUMMARY_SELECT: &str = "\
    SELECT t.id, t.user_id, u.email AS requester_email, \
           u.display_name AS requester_display_name, \
           t.admin_id, a.display_name AS admin_display_name, t.status, \
           (SELECT COUNT(*) FROM support_messages m WHERE m.ticket_id = t.id) AS message_count, \
           t.last_updated, t.created_at \
    FROM support_tickets t \
    JOIN users u ON u.id = t.user_id \
    LEFT JOIN users a ON a.id = t.admin_id";

pub struct SupportRepo;

impl SupportRepo {
    /// Open a new ticket for a user.
    pub async fn create_ticket(pool: &PgPool, user_id: DbId) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id) VALUES ($1) RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_ticket(pool: &PgPool, id: DbId) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The user's most recently active open or in-progress ticket.
    pub async fn find_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets \
             WHERE user_id = $1 AND status = ANY($2) \
             ORDER BY last_updated DESC LIMIT 1"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(ACTIVE_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// A user's own tickets, most recently active first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TicketSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE t.user_id = $1 ORDER BY t.last_updated DESC"
        );
        sqlx::query_as::<_, TicketSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All tickets for the admin queue, optionally filtered by status.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TicketSummary>, sqlx::Error> {
        let query = if status.is_some() {
            format!(
                "{SUMMARY_SELECT} WHERE t.status = $3 \
                 ORDER BY t.last_updated DESC LIMIT $1 OFFSET $2"
            )
        } else {
            format!("{SUMMARY_SELECT} ORDER BY t.last_updated DESC LIMIT $1 OFFSET $2")
        };
        let mut q = sqlx::query_as::<_, TicketSummary>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(s) = status {
            q = q.bind(s);
        }
        q.fetch_all(pool).await
    }

    /// Take a ticket: record the admin and move it to in_progress.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets \
             SET admin_id = $2, status = $3, last_updated = NOW() \
             WHERE id = $1 RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(STATUS_IN_PROGRESS)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET status = $2, last_updated = NOW() \
             WHERE id = $1 RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Append a message and bump the ticket's `last_updated`.
    pub async fn add_message(
        pool: &PgPool,
        ticket_id: DbId,
        sender_id: DbId,
        message: &str,
    ) -> Result<SupportMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_messages (ticket_id, sender_id, message) \
             VALUES ($1, $2, $3) RETURNING {MESSAGE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, SupportMessage>(&query)
            .bind(ticket_id)
            .bind(sender_id)
            .bind(message)
            .fetch_one(pool)
            .await?;

        sqlx::query("UPDATE support_tickets SET last_updated = NOW() WHERE id = $1")
            .bind(ticket_id)
            .execute(pool)
            .await?;

        Ok(created)
    }

    /// Messages of a ticket, oldest first, with sender names.
    pub async fn list_messages(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error> {
        sqlx::query_as::<_, MessageWithSender>(
            "SELECT m.id, m.ticket_id, m.sender_id, u.display_name AS sender_display_name, \
                    u.tier AS sender_tier, m.message, m.created_at \
             FROM support_messages m \
             JOIN users u ON u.id = m.sender_id \
             WHERE m.ticket_id = $1 \
             ORDER BY m.created_at ASC, m.id ASC",
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await
    }
}
