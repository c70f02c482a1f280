//! Linked-account model.

use folio_core::connection::ProviderProfile;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_connections` table.
///
/// Tokens are AES-GCM sealed bytes. Never serialize this struct; use
/// [`ConnectionResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct UserConnection {
    pub id: DbId,
    pub user_id: DbId,
    pub service_name: String,
    pub service_user_id: String,
    pub access_token: Vec<u8>,
    pub refresh_token: Option<Vec<u8>>,
    pub token_expires_at: Option<Timestamp>,
    pub profile_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserConnection {
    pub fn profile(&self) -> Option<ProviderProfile> {
        self.profile_data.as_ref().and_then(ProviderProfile::from_stored)
    }
}

/// Token-free view of a connection.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionResponse {
    pub id: DbId,
    pub service_name: String,
    pub service_user_id: String,
    pub profile: Option<ProviderProfile>,
    pub token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&UserConnection> for ConnectionResponse {
    fn from(c: &UserConnection) -> Self {
        Self {
            id: c.id,
            service_name: c.service_name.clone(),
            service_user_id: c.service_user_id.clone(),
            profile: c.profile(),
            token_expires_at: c.token_expires_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Values for an insert-or-overwrite on `(user_id, service_name)`.
pub struct UpsertConnection {
    pub user_id: DbId,
    pub service_name: String,
    pub service_user_id: String,
    pub access_token: Vec<u8>,
    pub refresh_token: Option<Vec<u8>>,
    pub token_expires_at: Option<Timestamp>,
    pub profile_data: serde_json::Value,
}
