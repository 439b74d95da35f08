use axum::routing::post;
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// ```text
/// POST   /                  -> create_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submissions::create_submission))
}
