//! Notification and notification-settings models.

use folio_core::notification::NotificationPreferences;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `user_notification_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub in_app_notifications: bool,
    pub email_notifications: bool,
    pub portfolio_updates: bool,
    pub reminder_notifications: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NotificationSettings {
    pub fn preferences(&self) -> NotificationPreferences {
        NotificationPreferences {
            in_app_notifications: self.in_app_notifications,
            email_notifications: self.email_notifications,
            portfolio_updates: self.portfolio_updates,
            reminder_notifications: self.reminder_notifications,
        }
    }
}

/// Partial settings update. Omitted fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNotificationSettings {
    pub in_app_notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub portfolio_updates: Option<bool>,
    pub reminder_notifications: Option<bool>,
}
