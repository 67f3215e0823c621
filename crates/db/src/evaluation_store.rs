//! Postgres implementation of the evaluation store.
//!
//! Recording an evaluation is a single transaction: the project's status is
//! swapped first (taking the row lock), then the snapshot and the optional
//! alert are inserted. The status swap is conditional on the status the
//! evaluation started from, so two concurrent evaluations of one project can
//! never both observe the same transition.

use finhealth_core::error::CoreError;
use finhealth_core::evaluation::{
    Evaluation, EvaluationStore, ProjectFinancials, RecordedEvaluation,
};
use finhealth_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{HealthAlertRepo, HealthSnapshotRepo, ProjectRepo};

/// [`EvaluationStore`] backed by the `projects`, `health_snapshots` and
/// `health_alerts` tables.
#[derive(Clone)]
pub struct PgEvaluationStore {
    pool: PgPool,
}

impl PgEvaluationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Evaluation store failure");
    CoreError::Persistence(err.to_string())
}

impl EvaluationStore for PgEvaluationStore {
    async fn load_financials(
        &self,
        project_id: DbId,
    ) -> Result<Option<ProjectFinancials>, CoreError> {
        let row = ProjectRepo::find_financials(&self.pool, project_id)
            .await
            .map_err(persistence)?;
        Ok(row.map(ProjectFinancials::from))
    }

    async fn record_evaluation(
        &self,
        evaluation: &Evaluation,
    ) -> Result<RecordedEvaluation, CoreError> {
        let project_id = evaluation.project_id;
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        let swapped = sqlx::query(
            "UPDATE projects SET current_health_status = $3, updated_at = NOW()
             WHERE id = $1 AND current_health_status = $2",
        )
        .bind(project_id)
        .bind(evaluation.previous_status.as_str())
        .bind(evaluation.new_status().as_str())
        .execute(&mut *tx)
        .await
        .map_err(persistence)?;

        if swapped.rows_affected() == 0 {
            // Dropping `tx` rolls back.
            tracing::warn!(project_id, "Project changed during evaluation");
            return Err(CoreError::Conflict(format!(
                "Project {project_id} was modified by a concurrent evaluation"
            )));
        }

        let (snapshot_id, timestamp) =
            HealthSnapshotRepo::insert(&mut tx, project_id, &evaluation.metrics)
                .await
                .map_err(persistence)?;

        let alert_id = match &evaluation.alert {
            Some(alert) => Some(
                HealthAlertRepo::insert(
                    &mut tx,
                    project_id,
                    alert.alert_type,
                    &alert.message,
                    timestamp,
                )
                .await
                .map_err(persistence)?,
            ),
            None => None,
        };

        tx.commit().await.map_err(persistence)?;

        tracing::debug!(project_id, snapshot_id, ?alert_id, "Evaluation recorded");
        Ok(RecordedEvaluation {
            snapshot_id,
            timestamp,
            alert_id,
        })
    }
}
