//! Public report intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tyrantcam_db::models::submission::CreateSubmission;
use tyrantcam_db::repositories::SubmissionRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions
///
/// Queue a report for moderation. Nothing becomes public until an admin
/// approves it.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<impl IntoResponse> {
    let category = input.validate()?;

    let submission = SubmissionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        submission_id = submission.id,
        category = %category,
        evidence_files = submission.evidence_files.len(),
        "Submission received",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}
