//! Administrative routes, mounted at `/admin`.
//!
//! Every handler behind these routes takes [`RequireAdmin`](crate::middleware::rbac::RequireAdmin).

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{admin_submissions, admin_tyrants, votes};
use crate::state::AppState;

/// ```text
/// GET    /tyrants                     -> list_tyrants
/// POST   /tyrants                     -> create_tyrant
/// POST   /tyrants/reconcile           -> reconcile_counts
/// GET    /tyrants/{id}                -> get_tyrant
/// PUT    /tyrants/{id}                -> update_tyrant
/// DELETE /tyrants/{id}                -> delete_tyrant
/// POST   /tyrants/{id}/publish        -> publish_tyrant
/// POST   /tyrants/{id}/unpublish      -> unpublish_tyrant
/// GET    /tyrants/{id}/votes          -> list_tyrant_votes
/// DELETE /votes/{id}                  -> revoke_vote
/// GET    /submissions                 -> list_submissions
/// GET    /submissions/{id}            -> get_submission
/// POST   /submissions/{id}/approve    -> approve_submission
/// POST   /submissions/{id}/reject     -> reject_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tyrants",
            get(admin_tyrants::list_tyrants).post(admin_tyrants::create_tyrant),
        )
        .route("/tyrants/reconcile", post(admin_tyrants::reconcile_counts))
        .route(
            "/tyrants/{id}",
            get(admin_tyrants::get_tyrant)
                .put(admin_tyrants::update_tyrant)
                .delete(admin_tyrants::delete_tyrant),
        )
        .route("/tyrants/{id}/publish", post(admin_tyrants::publish_tyrant))
        .route(
            "/tyrants/{id}/unpublish",
            post(admin_tyrants::unpublish_tyrant),
        )
        .route("/tyrants/{id}/votes", get(votes::list_tyrant_votes))
        .route("/votes/{id}", delete(votes::revoke_vote))
        .route("/submissions", get(admin_submissions::list_submissions))
        .route("/submissions/{id}", get(admin_submissions::get_submission))
        .route(
            "/submissions/{id}/approve",
            post(admin_submissions::approve_submission),
        )
        .route(
            "/submissions/{id}/reject",
            post(admin_submissions::reject_submission),
        )
}
