//! Route definitions for the signed-in user's account.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET    /          -> me
/// PUT    /          -> update_me
/// POST   /upgrade   -> upgrade
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::me).put(account::update_me))
        .route("/upgrade", post(account::upgrade))
}
