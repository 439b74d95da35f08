//! Public, read-only tyrant listing.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::tyrant::TyrantListParams;
use tyrantcam_db::repositories::TyrantRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tyrants
///
/// Published entries ranked by shame count, optionally filtered by category.
pub async fn list_tyrants(
    State(state): State<AppState>,
    Query(params): Query<TyrantListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category()?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let tyrants = TyrantRepo::list_published(&state.pool, category, limit, offset).await?;
    Ok(Json(DataResponse { data: tyrants }))
}

/// GET /api/v1/tyrants/{id}
///
/// Drafts are indistinguishable from missing entries.
pub async fn get_tyrant(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tyrant = TyrantRepo::find_published_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Tyrant", id)))?;
    Ok(Json(DataResponse { data: tyrant }))
}
