//! Event names published on the bus.

/// A user signed in. Source: `user`.
pub const AUTH_SIGNED_IN: &str = "auth.signed_in";

/// A user signed out and all sessions were revoked. Source: `user`.
pub const AUTH_SIGNED_OUT: &str = "auth.signed_out";

/// A user's tier changed. Source: `user`; payload `{ "old_tier", "new_tier" }`.
pub const USER_TIER_CHANGED: &str = "user.tier_changed";

/// A portfolio received a like. Source: `portfolio`; payload `{ "owner_id", "title" }`.
pub const PORTFOLIO_LIKED: &str = "portfolio.liked";

/// A portfolio received a comment. Source: `portfolio`;
/// payload `{ "owner_id", "title", "comment_id" }`.
pub const PORTFOLIO_COMMENTED: &str = "portfolio.commented";

/// A message was posted on a support ticket. Source: `support_ticket`;
/// payload `{ "ticket_owner_id", "from_admin" }`.
pub const SUPPORT_MESSAGE_SENT: &str = "support.message_sent";

pub const ENTITY_USER: &str = "user";
pub const ENTITY_PORTFOLIO: &str = "portfolio";
pub const ENTITY_SUPPORT_TICKET: &str = "support_ticket";
