//! Handler that runs a health evaluation for one project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use finhealth_core::evaluation::{run_evaluation, EvaluationOutcome};
use finhealth_core::types::{Amount, DbId};
use finhealth_db::PgEvaluationStore;
use finhealth_events::HealthEvent;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/evaluations`.
#[derive(Debug, Deserialize)]
pub struct EvaluateProject {
    /// Externally reported completion, `0..=100`.
    pub progress_percent: Amount,
}

/// POST /api/v1/projects/{id}/evaluations
///
/// Evaluates the project, records the snapshot (and any alert) and publishes
/// the resulting events.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<EvaluateProject>,
) -> AppResult<(StatusCode, Json<EvaluationOutcome>)> {
    let store = PgEvaluationStore::new(state.pool.clone());
    let outcome = run_evaluation(&store, project_id, input.progress_percent).await?;

    if outcome.previous_status != outcome.new_status {
        tracing::info!(
            project_id,
            from = %outcome.previous_status,
            to = %outcome.new_status,
            score = outcome.snapshot.metrics.health_score,
            "Project health changed"
        );
    }
    if let Some(alert) = &outcome.alert {
        tracing::warn!(project_id, alert_type = %alert.alert_type, "Health alert raised");
    }

    for event in HealthEvent::from_outcome(&outcome) {
        state.event_bus.publish(event);
    }

    Ok((StatusCode::CREATED, Json(outcome)))
}
