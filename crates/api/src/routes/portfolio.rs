//! Route definitions for the `/portfolios` resource, including likes and
//! comments.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{engagement, portfolio};
use crate::state::AppState;

/// Routes mounted at `/portfolios`.
///
/// ```text
/// GET    /                    -> list_mine
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// PUT    /{id}/visibility     -> set_visibility
///
/// GET    /{id}/engagement     -> get_engagement
/// POST   /{id}/like           -> toggle
/// GET    /{id}/comments       -> list_comments
/// POST   /{id}/comments       -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list_mine).post(portfolio::create))
        .route(
            "/{id}",
            get(portfolio::get_by_id)
                .put(portfolio::update)
                .delete(portfolio::delete),
        )
        .route("/{id}/visibility", put(portfolio::set_visibility))
        .route("/{id}/engagement", get(engagement::get_engagement))
        .route("/{id}/like", post(engagement::toggle))
        .route(
            "/{id}/comments",
            get(engagement::list_comments).post(engagement::add_comment),
        )
}
