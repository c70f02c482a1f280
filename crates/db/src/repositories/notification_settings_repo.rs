//! Repository for the `user_notification_settings` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{NotificationSettings, UpdateNotificationSettings};

const COLUMNS: &str = "id, user_id, in_app_notifications, email_notifications, \
                       portfolio_updates, reminder_notifications, created_at, updated_at";

pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<NotificationSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_notification_settings WHERE user_id = $1");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user's settings, creating the default row when absent.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<NotificationSettings, sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_notification_settings (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM user_notification_settings WHERE user_id = $1");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update, creating the row first if needed.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateNotificationSettings,
    ) -> Result<NotificationSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_notification_settings \
                (user_id, in_app_notifications, email_notifications, \
                 portfolio_updates, reminder_notifications) \
             VALUES ($1, COALESCE($2, true), COALESCE($3, false), \
                     COALESCE($4, true), COALESCE($5, true)) \
             ON CONFLICT (user_id) DO UPDATE SET \
                in_app_notifications = COALESCE($2, user_notification_settings.in_app_notifications), \
                email_notifications = COALESCE($3, user_notification_settings.email_notifications), \
                portfolio_updates = COALESCE($4, user_notification_settings.portfolio_updates), \
                reminder_notifications = COALESCE($5, user_notification_settings.reminder_notifications) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .bind(input.in_app_notifications)
            .bind(input.email_notifications)
            .bind(input.portfolio_updates)
            .bind(input.reminder_notifications)
            .fetch_one(pool)
            .await
    }
}
