//! Route definitions for the public community feed.

use axum::routing::get;
use axum::Router;

use crate::handlers::community;
use crate::state::AppState;

/// Routes mounted at `/community`. No authentication.
///
/// ```text
/// GET    /portfolios          -> list_feed
/// GET    /portfolios/{id}     -> get_feed_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolios", get(community::list_feed))
        .route("/portfolios/{id}", get(community::get_feed_entry))
}
