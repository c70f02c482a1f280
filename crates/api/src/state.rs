use std::sync::Arc;

use folio_core::token_crypto::TokenCipher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<folio_events::EventBus>,
    /// Seals provider tokens before they reach the database.
    pub token_cipher: Arc<TokenCipher>,
    /// Outbound client for provider APIs.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        pool: folio_db::DbPool,
        config: Arc<ServerConfig>,
        event_bus: Arc<folio_events::EventBus>,
    ) -> Self {
        let token_cipher = Arc::new(TokenCipher::from_secret(&config.token_encryption_key));
        Self {
            pool,
            config,
            event_bus,
            token_cipher,
            http: reqwest::Client::new(),
        }
    }
}
