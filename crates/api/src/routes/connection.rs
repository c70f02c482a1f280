//! Route definitions for linked services.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::connection;
use crate::state::AppState;

/// Routes mounted at `/connections`.
///
/// ```text
/// GET    /                    -> list_connections
/// DELETE /{id}                -> unlink
/// POST   /{service}/link      -> link
/// GET    /import-options      -> import_options
/// POST   /import              -> import
/// ```
///
/// `{service}` is registered under the `{id}` capture name since the
/// router rejects differently named captures in the same position.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(connection::list_connections))
        .route("/import-options", get(connection::import_options))
        .route("/import", post(connection::import))
        .route("/{id}", delete(connection::unlink))
        .route("/{id}/link", post(connection::link))
}
