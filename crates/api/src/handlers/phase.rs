//! Handlers for `/projects/{id}/phases` and the phase comparison chart.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use finhealth_core::evaluation::validate_non_negative;
use finhealth_core::phase::{phase_comparison, PhaseComparison};
use finhealth_core::types::DbId;
use finhealth_db::models::phase::{CreatePhase, Phase};
use finhealth_db::repositories::PhaseRepo;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/phases
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePhase>,
) -> AppResult<(StatusCode, Json<Phase>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    validate_non_negative(input.estimated_hours, "estimated_hours")?;
    ensure_project(&state.pool, project_id).await?;

    let phase = PhaseRepo::create(&state.pool, project_id, &input).await?;
    tracing::debug!(project_id, phase_id = phase.id, "Phase created");
    Ok((StatusCode::CREATED, Json(phase)))
}

/// GET /api/v1/projects/{id}/phases
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Phase>>>> {
    ensure_project(&state.pool, project_id).await?;
    let phases = PhaseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: phases }))
}

/// GET /api/v1/projects/{id}/phase-comparison
///
/// Estimated versus logged hours for every phase, in display order.
pub async fn comparison(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PhaseComparison>>>> {
    ensure_project(&state.pool, project_id).await?;
    let rows = PhaseRepo::hours_by_phase(&state.pool, project_id).await?;
    let data = rows
        .into_iter()
        .map(|row| phase_comparison(row.id, row.name, row.estimated_hours, row.actual_hours))
        .collect();
    Ok(Json(DataResponse { data }))
}
