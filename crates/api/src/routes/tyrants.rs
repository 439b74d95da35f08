//! Public tyrant and voting routes, mounted at `/tyrants`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{tyrants, votes};
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_tyrants
/// GET    /{id}              -> get_tyrant
/// POST   /{id}/votes        -> cast_vote
/// GET    /{id}/vote-status  -> vote_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tyrants::list_tyrants))
        .route("/{id}", get(tyrants::get_tyrant))
        .route("/{id}/votes", post(votes::cast_vote))
        .route("/{id}/vote-status", get(votes::vote_status))
}
