//! Admin CRUD and maintenance for tyrant entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::tyrant::{CreateTyrant, TyrantListParams, UpdateTyrant};
use tyrantcam_db::repositories::TyrantRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `POST /admin/tyrants/reconcile`.
#[derive(Debug, Serialize)]
pub struct ReconcileReport {
    /// Number of counters that disagreed with the ledger and were rewritten.
    pub corrected: u64,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Tyrant", id))
}

// ---------------------------------------------------------------------------
// GET /admin/tyrants
// ---------------------------------------------------------------------------

/// List every entry, drafts included, newest first.
pub async fn list_tyrants(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<TyrantListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category()?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let tyrants = TyrantRepo::list_all(&state.pool, category, limit, offset).await?;
    Ok(Json(DataResponse { data: tyrants }))
}

// ---------------------------------------------------------------------------
// POST /admin/tyrants
// ---------------------------------------------------------------------------

pub async fn create_tyrant(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTyrant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let tyrant = TyrantRepo::create(&state.pool, &input).await?;

    tracing::info!(
        tyrant_id = tyrant.id,
        admin_id = admin.user_id,
        is_published = tyrant.is_published,
        "Tyrant created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: tyrant })))
}

// ---------------------------------------------------------------------------
// GET /admin/tyrants/{id}
// ---------------------------------------------------------------------------

pub async fn get_tyrant(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tyrant = TyrantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: tyrant }))
}

// ---------------------------------------------------------------------------
// PUT /admin/tyrants/{id}
// ---------------------------------------------------------------------------

/// Partial update; absent fields keep their value.
pub async fn update_tyrant(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTyrant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let tyrant = TyrantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(tyrant_id = id, admin_id = admin.user_id, "Tyrant updated");

    Ok(Json(DataResponse { data: tyrant }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/tyrants/{id}
// ---------------------------------------------------------------------------

/// Delete an entry together with its votes.
pub async fn delete_tyrant(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TyrantRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(tyrant_id = id, admin_id = admin.user_id, "Tyrant deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /admin/tyrants/{id}/publish, /unpublish
// ---------------------------------------------------------------------------

pub async fn publish_tyrant(
    admin: RequireAdmin,
    state: State<AppState>,
    id: Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_published(admin, state, id, true).await
}

pub async fn unpublish_tyrant(
    admin: RequireAdmin,
    state: State<AppState>,
    id: Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_published(admin, state, id, false).await
}

async fn set_published(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    is_published: bool,
) -> AppResult<impl IntoResponse> {
    let tyrant = TyrantRepo::set_published(&state.pool, id, is_published)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        tyrant_id = id,
        admin_id = admin.user_id,
        is_published,
        "Tyrant publication changed",
    );

    Ok(Json(DataResponse { data: tyrant }))
}

// ---------------------------------------------------------------------------
// POST /admin/tyrants/reconcile
// ---------------------------------------------------------------------------

/// Recompute every shame counter from the vote ledger.
pub async fn reconcile_counts(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let corrected = TyrantRepo::reconcile_shame_counts(&state.pool).await?;

    tracing::info!(corrected, admin_id = admin.user_id, "Shame counters reconciled");

    Ok(Json(DataResponse {
        data: ReconcileReport { corrected },
    }))
}
