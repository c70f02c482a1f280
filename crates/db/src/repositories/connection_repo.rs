//! Repository for the `user_connections` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::connection::{UpsertConnection, UserConnection};

const COLUMNS: &str = "id, user_id, service_name, service_user_id, access_token, refresh_token, \
                       token_expires_at, profile_data, created_at, updated_at";

pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Insert a connection, or overwrite the existing one for the same
    /// `(user_id, service_name)` in place.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertConnection,
    ) -> Result<UserConnection, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_connections \
                (user_id, service_name, service_user_id, access_token, refresh_token, \
                 token_expires_at, profile_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT ON CONSTRAINT uq_user_connections_user_service DO UPDATE \
             SET service_user_id = EXCLUDED.service_user_id, \
                 access_token = EXCLUDED.access_token, \
                 refresh_token = EXCLUDED.refresh_token, \
                 token_expires_at = EXCLUDED.token_expires_at, \
                 profile_data = EXCLUDED.profile_data \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserConnection>(&query)
            .bind(input.user_id)
            .bind(&input.service_name)
            .bind(&input.service_user_id)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(input.token_expires_at)
            .bind(&input.profile_data)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserConnection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_connections WHERE user_id = $1 ORDER BY service_name"
        );
        sqlx::query_as::<_, UserConnection>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a connection owned by `user_id`. Returns `false` when the id
    /// does not exist or belongs to someone else.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_connections WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
