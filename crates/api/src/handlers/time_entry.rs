//! Handlers for `/projects/{id}/time-entries`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use finhealth_core::evaluation::validate_non_negative;
use finhealth_core::types::DbId;
use finhealth_db::models::time_entry::{CreateTimeEntry, TimeEntry};
use finhealth_db::repositories::{PhaseRepo, TimeEntryRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/time-entries
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    if input.user_name.trim().is_empty() {
        return Err(AppError::BadRequest("user_name must not be empty".into()));
    }
    validate_non_negative(input.duration_hours, "duration_hours")?;
    if let Some(cost) = input.cost {
        validate_non_negative(cost, "cost")?;
    }
    ensure_project(&state.pool, project_id).await?;
    if let Some(phase_id) = input.phase_id {
        if PhaseRepo::find_in_project(&state.pool, project_id, phase_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Phase {phase_id} does not belong to project {project_id}"
            )));
        }
    }

    let entry = TimeEntryRepo::create(&state.pool, project_id, &input).await?;
    tracing::debug!(project_id, entry_id = entry.id, hours = %entry.duration_hours, "Time logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/projects/{id}/time-entries
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimeEntry>>>> {
    ensure_project(&state.pool, project_id).await?;
    let entries = TimeEntryRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
