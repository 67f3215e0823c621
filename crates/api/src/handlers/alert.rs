//! Handlers for the `/alerts` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use finhealth_core::types::DbId;
use finhealth_db::models::health::{AlertFilter, HealthAlert};
use finhealth_db::repositories::HealthAlertRepo;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/alerts
///
/// Newest first, optionally filtered by `?is_read=` and `?alert_type=`.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<DataResponse<Vec<HealthAlert>>>> {
    let alerts = HealthAlertRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// GET /api/v1/projects/{id}/alerts
///
/// Every alert raised for one project, newest first.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<HealthAlert>>>> {
    ensure_project(&state.pool, project_id).await?;
    let alerts = HealthAlertRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// PATCH /api/v1/alerts/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HealthAlert>> {
    let alert = HealthAlertRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("HealthAlert", id))?;
    Ok(Json(alert))
}
