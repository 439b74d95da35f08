//! Handlers for the vote ledger.
//!
//! Visitors cast votes anonymously through [`ClientFingerprint`]; only admins
//! may inspect ledger rows or revoke a vote.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::fingerprint::resolve_window_hours;
use tyrantcam_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::vote::VoteEvent;
use tyrantcam_db::repositories::{TyrantRepo, VoteError, VoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::fingerprint::ClientFingerprint;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, VoteWindowParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Result of a vote attempt as seen by the visitor.
///
/// A repeat vote is not an error from the visitor's point of view; it reports
/// the current tally the same way a fresh vote does.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VoteOutcome {
    Recorded {
        vote_id: DbId,
        tyrant_id: DbId,
        shame_count: i32,
    },
    AlreadyVoted {
        tyrant_id: DbId,
        shame_count: i32,
    },
}

/// Response for `GET /tyrants/{id}/vote-status`.
#[derive(Debug, Serialize)]
pub struct VoteStatus {
    pub tyrant_id: DbId,
    pub has_voted: bool,
    pub window_hours: i32,
}

/// Response for `DELETE /admin/votes/{id}`.
#[derive(Debug, Serialize)]
pub struct RevokedVote {
    pub vote: VoteEvent,
    pub shame_count: i32,
}

// ---------------------------------------------------------------------------
// POST /tyrants/{id}/votes
// ---------------------------------------------------------------------------

/// Cast the caller's vote against a published tyrant.
///
/// 201 on a new vote, 200 with `already_voted` on a repeat.
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(tyrant_id): Path<DbId>,
    ClientFingerprint(fingerprint): ClientFingerprint,
) -> AppResult<impl IntoResponse> {
    match VoteRepo::cast(&state.pool, tyrant_id, &fingerprint).await {
        Ok(cast) => {
            tracing::info!(
                vote_id = cast.vote.id,
                tyrant_id,
                shame_count = cast.shame_count,
                "Vote recorded",
            );
            let outcome = VoteOutcome::Recorded {
                vote_id: cast.vote.id,
                tyrant_id,
                shame_count: cast.shame_count,
            };
            Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
        }
        Err(VoteError::DuplicateVote {
            tyrant_id,
            shame_count,
        }) => {
            tracing::debug!(tyrant_id, "Repeat vote ignored");
            let outcome = VoteOutcome::AlreadyVoted {
                tyrant_id,
                shame_count,
            };
            Ok((StatusCode::OK, Json(DataResponse { data: outcome })))
        }
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// GET /tyrants/{id}/vote-status
// ---------------------------------------------------------------------------

/// Whether the caller voted for this tyrant within the look-back window.
pub async fn vote_status(
    State(state): State<AppState>,
    Path(tyrant_id): Path<DbId>,
    Query(params): Query<VoteWindowParams>,
    ClientFingerprint(fingerprint): ClientFingerprint,
) -> AppResult<impl IntoResponse> {
    let window_hours =
        resolve_window_hours(params.window_hours.or(Some(state.config.vote_window_hours)))?;

    TyrantRepo::find_published_by_id(&state.pool, tyrant_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Tyrant", tyrant_id)))?;

    let has_voted = VoteRepo::has_voted(&state.pool, tyrant_id, &fingerprint, window_hours).await?;

    Ok(Json(DataResponse {
        data: VoteStatus {
            tyrant_id,
            has_voted,
            window_hours,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /admin/tyrants/{id}/votes
// ---------------------------------------------------------------------------

/// List the ledger rows behind a tyrant's counter, newest first.
pub async fn list_tyrant_votes(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tyrant_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    TyrantRepo::find_by_id(&state.pool, tyrant_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Tyrant", tyrant_id)))?;

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let votes = VoteRepo::list_for_tyrant(&state.pool, tyrant_id, limit, offset).await?;
    Ok(Json(DataResponse { data: votes }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/votes/{id}
// ---------------------------------------------------------------------------

/// Revoke a single vote and decrement its tyrant's counter.
pub async fn revoke_vote(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(vote_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let revoked = VoteRepo::revoke(&state.pool, vote_id).await?;

    tracing::info!(
        vote_id,
        tyrant_id = revoked.vote.tyrant_id,
        shame_count = revoked.shame_count,
        admin_id = admin.user_id,
        "Vote revoked",
    );

    Ok(Json(DataResponse {
        data: RevokedVote {
            vote: revoked.vote,
            shame_count: revoked.shame_count,
        },
    }))
}
