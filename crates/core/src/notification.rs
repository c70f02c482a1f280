//! Notification preferences and the text of generated notifications.

use serde::{Deserialize, Serialize};

/// A user's notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub in_app_notifications: bool,
    pub email_notifications: bool,
    pub portfolio_updates: bool,
    pub reminder_notifications: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            in_app_notifications: true,
            email_notifications: false,
            portfolio_updates: true,
            reminder_notifications: true,
        }
    }
}

impl NotificationPreferences {
    /// Likes and comments on the user's portfolios.
    pub fn wants_portfolio_activity(&self) -> bool {
        self.in_app_notifications && self.portfolio_updates
    }

    /// Support replies and account changes.
    pub fn wants_account_notices(&self) -> bool {
        self.in_app_notifications
    }
}

/// Title and body of a notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationText {
    pub title: String,
    pub message: String,
}

pub fn portfolio_liked(actor: &str, portfolio_title: &str) -> NotificationText {
    NotificationText {
        title: "New like".into(),
        message: format!("{actor} liked your portfolio \"{portfolio_title}\""),
    }
}

pub fn portfolio_commented(actor: &str, portfolio_title: &str) -> NotificationText {
    NotificationText {
        title: "New comment".into(),
        message: format!("{actor} commented on your portfolio \"{portfolio_title}\""),
    }
}

pub fn support_reply(ticket_id: i64) -> NotificationText {
    NotificationText {
        title: "Support replied".into(),
        message: format!("An admin replied to your support ticket #{ticket_id}"),
    }
}

pub fn tier_changed(new_tier: &str) -> NotificationText {
    NotificationText {
        title: "Account updated".into(),
        message: format!("Your account is now on the {new_tier} plan"),
    }
}
