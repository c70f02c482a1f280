//! User entity model and DTOs.

use folio_core::tier::UserTier;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash. Use [`UserResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub tier: String,
    pub last_sign_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Tier with lenient normalization applied.
    pub fn tier(&self) -> UserTier {
        UserTier::parse_lenient(&self.tier)
    }
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub tier: UserTier,
    pub last_sign_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            display_name: u.display_name.clone(),
            tier: u.tier(),
            last_sign_in_at: u.last_sign_in_at,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}

/// Row for the admin user list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminUserRow {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub tier: String,
    pub last_sign_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub portfolio_count: i64,
}
