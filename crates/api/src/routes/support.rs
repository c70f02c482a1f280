//! Route definitions for user-side support.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`.
///
/// ```text
/// GET    /tickets                   -> list_my_tickets
/// POST   /tickets                   -> open_ticket
/// POST   /messages                  -> send_message
/// GET    /tickets/{id}/messages     -> list_messages
/// POST   /tickets/{id}/messages     -> reply
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tickets",
            get(support::list_my_tickets).post(support::open_ticket),
        )
        .route("/messages", post(support::send_message))
        .route(
            "/tickets/{id}/messages",
            get(support::list_messages).post(support::reply),
        )
}
