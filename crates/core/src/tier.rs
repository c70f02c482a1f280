//! Plan tiers governing feature access.
//!
//! Stored as lowercase text in `users.tier`. Lenient parsing mirrors how
//! profile rows have always been read: trimmed, case-insensitive, and
//! anything unrecognised is treated as `free`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const TIER_FREE: &str = "free";
pub const TIER_PREMIUM: &str = "premium";
pub const TIER_ADMIN: &str = "admin";

/// All valid tier names.
pub const VALID_TIERS: &[&str] = &[TIER_FREE, TIER_PREMIUM, TIER_ADMIN];

/// A user's plan classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserTier {
    #[default]
    Free,
    Premium,
    Admin,
}

impl UserTier {
    pub fn as_str(self) -> &'static str {
        match self {
            UserTier::Free => TIER_FREE,
            UserTier::Premium => TIER_PREMIUM,
            UserTier::Admin => TIER_ADMIN,
        }
    }

    /// Parse a stored tier value, falling back to [`UserTier::Free`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            TIER_ADMIN => UserTier::Admin,
            TIER_PREMIUM => UserTier::Premium,
            _ => UserTier::Free,
        }
    }

    /// Parse a tier supplied by an admin. Unknown values are rejected.
    pub fn parse_strict(raw: &str) -> Result<Self, CoreError> {
        match raw {
            TIER_FREE => Ok(UserTier::Free),
            TIER_PREMIUM => Ok(UserTier::Premium),
            TIER_ADMIN => Ok(UserTier::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid tier '{other}'. Must be one of: {}",
                VALID_TIERS.join(", ")
            ))),
        }
    }

    pub fn is_admin(self) -> bool {
        self == UserTier::Admin
    }
}

impl std::fmt::Display for UserTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a self-service upgrade. Only free accounts can upgrade.
pub fn validate_upgrade(current: UserTier) -> Result<UserTier, CoreError> {
    match current {
        UserTier::Free => Ok(UserTier::Premium),
        UserTier::Premium => Err(CoreError::Conflict(
            "Account is already on the premium plan".into(),
        )),
        UserTier::Admin => Err(CoreError::Conflict(
            "Admin accounts cannot change plan".into(),
        )),
    }
}
