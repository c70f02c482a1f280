pub mod account;
pub mod admin;
pub mod auth;
pub mod community;
pub mod connection;
pub mod notification;
pub mod portfolio;
pub mod support;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /me                                              get, update own profile
/// /me/upgrade                                      free -> premium (POST)
///
/// /templates                                       catalog (optional auth)
///
/// /portfolios                                      list own, create
/// /portfolios/{id}                                 get, update, delete
/// /portfolios/{id}/visibility                      set visibility (PUT)
/// /portfolios/{id}/engagement                      likes + comments (optional auth)
/// /portfolios/{id}/like                            toggle like (POST)
/// /portfolios/{id}/comments                        list (optional auth), add
/// /comments/{id}                                   delete (author or admin)
///
/// /reports                                         file a report (POST)
///
/// /share/{id}                                      public view (no auth)
/// /community/portfolios                            public feed (no auth)
/// /community/portfolios/{id}                       public feed entry (no auth)
///
/// /connections                                     list linked services
/// /connections/{id}                                unlink (DELETE)
/// /connections/{service}/link                      link github|linkedin (POST)
/// /connections/import-options                      importable data (GET)
/// /connections/import                              import (POST)
///
/// /notifications                                   list
/// /notifications/unread-count                      unread count
/// /notifications/{id}/read                         mark read (POST)
/// /notifications/read-all                          mark all read (POST)
/// /notifications/settings                          get, update
///
/// /support/tickets                                 list own, open
/// /support/messages                                send, auto-opening a ticket
/// /support/tickets/{id}/messages                   list, reply
///
/// /admin/dashboard/metrics                         headline metrics
/// /admin/dashboard/template-usage                  portfolios per template
/// /admin/users                                     list
/// /admin/users/{id}                                delete
/// /admin/users/{id}/role                           change tier (PUT)
/// /admin/portfolios                                list
/// /admin/portfolios/{id}                           delete
/// /admin/portfolios/{id}/visibility                set visibility (PUT)
/// /admin/reports                                   grouped report queue
/// /admin/reports/{id}/action                       resolve | ignore | delete
/// /admin/support/tickets                           all tickets
/// /admin/support/tickets/{id}/assign               take ticket (POST)
/// /admin/support/tickets/{id}/close                close ticket (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", account::router())
        .route("/templates", get(handlers::template::list_templates))
        .nest("/portfolios", portfolio::router())
        .route("/comments/{id}", delete(handlers::engagement::delete_comment))
        .route("/reports", post(handlers::report::create_report))
        .route("/share/{id}", get(handlers::portfolio::share))
        .nest("/community", community::router())
        .nest("/connections", connection::router())
        .nest("/notifications", notification::router())
        .nest("/support", support::router())
        .nest("/admin", admin::router())
}
