//! Route definitions for the `/admin` console.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin, support};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` tier (enforced by handler extractors).
///
/// ```text
/// GET    /dashboard/metrics               -> dashboard_metrics
/// GET    /dashboard/template-usage        -> template_usage
///
/// GET    /users                           -> list_users
/// PUT    /users/{id}/role                 -> update_role
/// DELETE /users/{id}                      -> delete_user
///
/// GET    /portfolios                      -> list_portfolios
/// PUT    /portfolios/{id}/visibility      -> set_portfolio_visibility
/// DELETE /portfolios/{id}                 -> delete_portfolio
///
/// GET    /reports                         -> list_reports
/// POST   /reports/{id}/action             -> act_on_report
///
/// GET    /support/tickets                 -> admin_list_tickets
/// POST   /support/tickets/{id}/assign     -> assign
/// POST   /support/tickets/{id}/close      -> close
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/metrics", get(admin::dashboard_metrics))
        .route("/dashboard/template-usage", get(admin::template_usage))
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::update_role))
        .route("/portfolios", get(admin::list_portfolios))
        .route("/portfolios/{id}", delete(admin::delete_portfolio))
        .route(
            "/portfolios/{id}/visibility",
            put(admin::set_portfolio_visibility),
        )
        .route("/reports", get(admin::list_reports))
        .route("/reports/{id}/action", post(admin::act_on_report))
        .route("/support/tickets", get(support::admin_list_tickets))
        .route("/support/tickets/{id}/assign", post(support::assign))
        .route("/support/tickets/{id}/close", post(support::close))
}
