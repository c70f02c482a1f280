//! Moderation report models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `content_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentReport {
    pub id: DbId,
    pub reporter_id: DbId,
    pub target_type: String,
    pub target_id: DbId,
    pub reason: String,
    pub status: String,
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub struct CreateReport {
    pub reporter_id: DbId,
    pub target_type: String,
    pub target_id: DbId,
    pub reason: String,
}

/// Reports sharing a target and status, aggregated for the admin queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportGroup {
    pub target_type: String,
    pub target_id: DbId,
    pub status: String,
    pub report_count: i64,
    pub report_ids: Vec<DbId>,
    pub reasons: Vec<String>,
    pub first_reported_at: Timestamp,
    pub last_reported_at: Timestamp,
}
