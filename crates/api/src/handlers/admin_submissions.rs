//! Moderation of the submission queue.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use tyrantcam_core::submission;
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::submission::{
    ApproveSubmission, RejectSubmission, Submission, SubmissionListParams,
};
use tyrantcam_db::models::tyrant::Tyrant;
use tyrantcam_db::repositories::SubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for an approval: the reviewed submission and the entry it became.
#[derive(Debug, Serialize)]
pub struct Promotion {
    pub submission: Submission,
    pub tyrant: Tyrant,
}

// ---------------------------------------------------------------------------
// GET /admin/submissions
// ---------------------------------------------------------------------------

/// List submissions, newest first, optionally filtered by status.
pub async fn list_submissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref s) = params.status {
        submission::validate_status(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let submissions =
        SubmissionRepo::list_filtered(&state.pool, params.status.as_deref(), limit, offset)
            .await?;
    Ok(Json(DataResponse { data: submissions }))
}

// ---------------------------------------------------------------------------
// GET /admin/submissions/{id}
// ---------------------------------------------------------------------------

pub async fn get_submission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Submission", id)))?;
    Ok(Json(DataResponse { data: submission }))
}

// ---------------------------------------------------------------------------
// POST /admin/submissions/{id}/approve
// ---------------------------------------------------------------------------

/// Approve a pending submission and promote it into a tyrant entry.
pub async fn approve_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveSubmission>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref notes) = input.notes {
        submission::validate_notes(notes)?;
    }

    let (submission, tyrant) = SubmissionRepo::approve_and_promote(
        &state.pool,
        id,
        admin.user_id,
        input.notes.as_deref(),
        input.publish,
    )
    .await?;

    tracing::info!(
        submission_id = id,
        tyrant_id = tyrant.id,
        admin_id = admin.user_id,
        is_published = tyrant.is_published,
        "Submission approved and promoted",
    );

    Ok(Json(DataResponse {
        data: Promotion { submission, tyrant },
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/submissions/{id}/reject
// ---------------------------------------------------------------------------

pub async fn reject_submission(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectSubmission>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref notes) = input.notes {
        submission::validate_notes(notes)?;
    }

    let submission =
        SubmissionRepo::reject(&state.pool, id, admin.user_id, input.notes.as_deref()).await?;

    tracing::info!(submission_id = id, admin_id = admin.user_id, "Submission rejected");

    Ok(Json(DataResponse { data: submission }))
}
