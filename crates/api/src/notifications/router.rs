//! Event-to-notification routing.
//!
//! [`NotificationRouter`] consumes the platform event bus. For each event it
//! decides who (if anyone) should hear about it, checks that recipient's
//! notification settings and stores an in-app notification.

use folio_core::engagement::display_name_or_fallback;
use folio_core::notification::{self, NotificationPreferences, NotificationText};
use folio_core::types::DbId;
use folio_db::repositories::{NotificationRepo, NotificationSettingsRepo, UserRepo};
use folio_db::DbPool;
use folio_events::event_types::{
    PORTFOLIO_COMMENTED, PORTFOLIO_LIKED, SUPPORT_MESSAGE_SENT, USER_TIER_CHANGED,
};
use folio_events::PlatformEvent;
use tokio::sync::broadcast;

/// Which preference switch governs a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    PortfolioActivity,
    AccountNotice,
}

/// Recipient and preference class for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: DbId,
    pub audience: Audience,
}

impl Audience {
    fn allows(self, prefs: &NotificationPreferences) -> bool {
        match self {
            Audience::PortfolioActivity => prefs.wants_portfolio_activity(),
            Audience::AccountNotice => prefs.wants_account_notices(),
        }
    }
}

/// Decide who an event concerns, without touching the database.
///
/// Activity on a portfolio goes to its owner unless the owner is the actor.
/// Support messages notify the ticket owner only when an admin wrote them.
pub fn plan_delivery(event: &PlatformEvent) -> Option<Delivery> {
    match event.event_type.as_str() {
        PORTFOLIO_LIKED | PORTFOLIO_COMMENTED => {
            let owner = event.payload_id("owner_id")?;
            if event.actor_user_id == Some(owner) {
                return None;
            }
            Some(Delivery {
                recipient: owner,
                audience: Audience::PortfolioActivity,
            })
        }
        SUPPORT_MESSAGE_SENT => {
            let from_admin = event
                .payload
                .get("from_admin")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let owner = event.payload_id("ticket_owner_id")?;
            (from_admin && event.actor_user_id != Some(owner)).then_some(Delivery {
                recipient: owner,
                audience: Audience::AccountNotice,
            })
        }
        USER_TIER_CHANGED => event.source_entity_id.map(|user_id| Delivery {
            recipient: user_id,
            audience: Audience::AccountNotice,
        }),
        _ => None,
    }
}

/// Routes platform events to user notifications.
pub struct NotificationRouter {
    pool: DbPool,
}

impl NotificationRouter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event. Returns the created notification id, if any.
    pub async fn route_event(&self, event: &PlatformEvent) -> Result<Option<DbId>, sqlx::Error> {
        let Some(delivery) = plan_delivery(event) else {
            return Ok(None);
        };

        let prefs = NotificationSettingsRepo::find_by_user(&self.pool, delivery.recipient)
            .await?
            .map(|s| s.preferences())
            .unwrap_or_default();
        if !delivery.audience.allows(&prefs) {
            tracing::debug!(
                user_id = delivery.recipient,
                event_type = %event.event_type,
                "Recipient opted out, skipping notification"
            );
            return Ok(None);
        }

        let Some(text) = self.render(event).await? else {
            return Ok(None);
        };

        let id =
            NotificationRepo::create(&self.pool, delivery.recipient, &text.title, &text.message)
                .await?;
        tracing::debug!(
            notification_id = id,
            user_id = delivery.recipient,
            event_type = %event.event_type,
            "Notification created"
        );
        Ok(Some(id))
    }

    async fn render(&self, event: &PlatformEvent) -> Result<Option<NotificationText>, sqlx::Error> {
        let text = match event.event_type.as_str() {
            PORTFOLIO_LIKED | PORTFOLIO_COMMENTED => {
                let actor = self.actor_name(event.actor_user_id).await?;
                let title = event.payload_str("title").unwrap_or("your portfolio");
                if event.event_type == PORTFOLIO_LIKED {
                    notification::portfolio_liked(&actor, title)
                } else {
                    notification::portfolio_commented(&actor, title)
                }
            }
            SUPPORT_MESSAGE_SENT => match event.source_entity_id {
                Some(ticket_id) => notification::support_reply(ticket_id),
                None => return Ok(None),
            },
            USER_TIER_CHANGED => match event.payload_str("new_tier") {
                Some(tier) => notification::tier_changed(tier),
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(text))
    }

    async fn actor_name(&self, actor: Option<DbId>) -> Result<String, sqlx::Error> {
        let Some(id) = actor else {
            return Ok("Someone".to_string());
        };
        let user = UserRepo::find_by_id(&self.pool, id).await?;
        Ok(display_name_or_fallback(
            user.as_ref().and_then(|u| u.display_name.as_deref()),
            id,
        ))
    }
}
