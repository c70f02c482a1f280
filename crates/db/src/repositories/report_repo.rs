//! Repository for the `content_reports` table.

use folio_core::moderation::STATUS_PENDING;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{ContentReport, CreateReport, ReportGroup};

const COLUMNS: &str = "id, reporter_id, target_type, target_id, reason, status, \
                       resolved_by, resolved_at, created_at";

pub struct ReportRepo;

impl ReportRepo {
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<ContentReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_reports (reporter_id, target_type, target_id, reason) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentReport>(&query)
            .bind(input.reporter_id)
            .bind(&input.target_type)
            .bind(input.target_id)
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_reports WHERE id = $1");
        sqlx::query_as::<_, ContentReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reports grouped by target, most recently reported first.
    pub async fn list_grouped(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportGroup>, sqlx::Error> {
        let where_clause = if status.is_some() { "WHERE status = $3" } else { "" };
        let query = format!(
            "SELECT target_type, target_id, status, \
                    COUNT(*) AS report_count, \
                    array_agg(id ORDER BY created_at) AS report_ids, \
                    array_agg(reason ORDER BY created_at) AS reasons, \
                    MIN(created_at) AS first_reported_at, \
                    MAX(created_at) AS last_reported_at \
             FROM content_reports \
             {where_clause} \
             GROUP BY target_type, target_id, status \
             ORDER BY MAX(created_at) DESC \
             LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, ReportGroup>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(s) = status {
            q = q.bind(s);
        }
        q.fetch_all(pool).await
    }

    /// Settle a pending report. Returns `None` when it is missing or no
    /// longer pending.
    pub async fn settle(
        pool: &PgPool,
        id: DbId,
        status: &str,
        admin_id: DbId,
    ) -> Result<Option<ContentReport>, sqlx::Error> {
        let query = format!(
            "UPDATE content_reports \
             SET status = $2, resolved_by = $3, resolved_at = NOW() \
             WHERE id = $1 AND status = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentReport>(&query)
            .bind(id)
            .bind(status)
            .bind(admin_id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Settle every other pending report on the same target.
    pub async fn settle_pending_for_target(
        pool: &PgPool,
        target_type: &str,
        target_id: DbId,
        status: &str,
        admin_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_reports \
             SET status = $3, resolved_by = $4, resolved_at = NOW() \
             WHERE target_type = $1 AND target_id = $2 AND status = $5",
        )
        .bind(target_type)
        .bind(target_id)
        .bind(status)
        .bind(admin_id)
        .bind(STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
