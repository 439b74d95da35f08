pub mod admin;
pub mod auth;
pub mod health;
pub mod submissions;
pub mod tyrants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                      login (public)
///
/// /tyrants                                         ranked published list (public)
/// /tyrants/{id}                                    published entry (public)
/// /tyrants/{id}/votes                              cast vote (POST, public)
/// /tyrants/{id}/vote-status                        windowed has-voted check (public)
///
/// /submissions                                     submit report (POST, public)
///
/// /admin/tyrants                                   list all, create
/// /admin/tyrants/reconcile                         recount counters (POST)
/// /admin/tyrants/{id}                              get, update, delete
/// /admin/tyrants/{id}/publish                      publish (POST)
/// /admin/tyrants/{id}/unpublish                    unpublish (POST)
/// /admin/tyrants/{id}/votes                        ledger rows
/// /admin/votes/{id}                                revoke (DELETE)
/// /admin/submissions                               moderation queue
/// /admin/submissions/{id}                          get
/// /admin/submissions/{id}/approve                  approve + promote (POST)
/// /admin/submissions/{id}/reject                   reject (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tyrants", tyrants::router())
        .nest("/submissions", submissions::router())
        .nest("/admin", admin::router())
}
