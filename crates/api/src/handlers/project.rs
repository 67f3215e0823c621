//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use finhealth_core::evaluation::validate_non_negative;
use finhealth_core::health::HealthStatus;
use finhealth_core::metrics;
use finhealth_core::types::{Amount, DbId};
use finhealth_db::models::health::HealthSnapshot;
use finhealth_db::models::project::{CreateProject, Project};
use finhealth_db::repositories::{HealthSnapshotRepo, ProjectRepo, TimeEntryRepo};
use serde::{Deserialize, Serialize};

use super::ensure_project;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub health_status: Option<HealthStatus>,
}

/// Project with its live financial figures and latest evaluation.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub consumed_hours: Amount,
    pub consumption_percent: Amount,
    pub actual_cost: Amount,
    pub latest_snapshot: Option<HealthSnapshot>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_non_negative(input.budget_hours, "budget_hours")?;
    validate_non_negative(input.invoice_amount, "invoice_amount")?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, code = %project.code, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, params.health_status).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ensure_project(&state.pool, id).await?;
    let (hours, cost) = TimeEntryRepo::totals(&state.pool, id).await?;
    let latest_snapshot = HealthSnapshotRepo::find_latest(&state.pool, id).await?;

    let consumed_hours = metrics::consumed_hours(hours);
    let consumption_percent = metrics::consumption_percent(consumed_hours, project.budget_hours);

    Ok(Json(ProjectDetail {
        consumption_percent,
        consumed_hours: metrics::quantize(consumed_hours),
        actual_cost: metrics::quantize(metrics::actual_cost(cost)),
        latest_snapshot,
        project,
    }))
}
