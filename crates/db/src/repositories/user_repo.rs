//! Repository for the `users` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{AdminUserRow, CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, display_name, tier, \
                       last_sign_in_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user on the free tier, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, display_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercased.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Current stored tier, unnormalized. `None` when the user is gone.
    pub async fn find_tier(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT tier FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the user exists and holds the admin tier.
    pub async fn is_admin(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT is_admin($1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Set a user's tier. Returns `true` if the user exists.
    pub async fn update_user_role(
        pool: &PgPool,
        id: DbId,
        tier: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET tier = $2 WHERE id = $1")
            .bind(id)
            .bind(tier)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the display name. Returns `None` if no such user.
    pub async fn update_display_name(
        pool: &PgPool,
        id: DbId,
        display_name: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET display_name = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(display_name)
            .fetch_optional(pool)
            .await
    }

    pub async fn record_sign_in(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_sign_in_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List users with their portfolio counts, newest first.
    ///
    /// `search` is an `ILIKE` pattern matched against email and display name.
    pub async fn list_with_portfolio_counts(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminUserRow>, sqlx::Error> {
        let where_clause = if search.is_some() {
            "WHERE u.email ILIKE $3 OR u.display_name ILIKE $3"
        } else {
            ""
        };
        let query = format!(
            "SELECT u.id, u.email, u.display_name, u.tier, u.last_sign_in_at, u.created_at, \
                    COUNT(p.id) AS portfolio_count \
             FROM users u \
             LEFT JOIN portfolios p ON p.user_id = u.id \
             {where_clause} \
             GROUP BY u.id \
             ORDER BY u.created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, AdminUserRow>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(pattern) = search {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }

    /// Delete a user and, by cascade, everything they own.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
