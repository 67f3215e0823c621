//! Health history and burndown for a single project.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use finhealth_core::burndown::{burndown_series, BurndownPoint};
use finhealth_core::types::DbId;
use finhealth_db::models::health::HealthSnapshot;
use finhealth_db::repositories::{HealthSnapshotRepo, TimeEntryRepo};

use super::ensure_project;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/health-history
///
/// All snapshots, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<HealthSnapshot>>>> {
    ensure_project(&state.pool, project_id).await?;
    let snapshots = HealthSnapshotRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: snapshots }))
}

/// GET /api/v1/projects/{id}/burndown
///
/// Daily series from the first logged day through today (UTC).
pub async fn burndown(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<BurndownPoint>>>> {
    let project = ensure_project(&state.pool, project_id).await?;
    let daily_costs = TimeEntryRepo::daily_costs(&state.pool, project_id).await?;
    let marks = HealthSnapshotRepo::earned_value_marks(&state.pool, project_id).await?;

    let series = burndown_series(
        project.invoice_amount,
        &daily_costs,
        &marks,
        Utc::now().date_naive(),
    );
    Ok(Json(DataResponse { data: series }))
}
