//! Health evaluation orchestrator.
//!
//! [`evaluate`] is the pure part: given a project's financials (including the
//! status it had before this run) and the externally supplied progress, it
//! computes the metrics, classification and alert decision.
//!
//! [`run_evaluation`] wraps it with storage: it loads the financials through
//! an [`EvaluationStore`], evaluates, and hands the result back to the store,
//! which must write the snapshot, the status update and the optional alert as
//! a single atomic unit.

use std::future::Future;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::alert::{alert_for_transition, alert_message, AlertType};
use crate::error::CoreError;
use crate::health::{classify, HealthStatus};
use crate::metrics;
use crate::types::{Amount, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Financial state of a project as read from the store at evaluation time.
#[derive(Debug, Clone)]
pub struct ProjectFinancials {
    pub project_id: DbId,
    pub name: String,
    pub budget_hours: Amount,
    pub invoice_amount: Amount,
    /// Sum of logged hours; `None` when nothing has been logged.
    pub consumed_hours: Option<Amount>,
    /// Sum of logged cost; `None` when nothing has been logged.
    pub consumed_cost: Option<Amount>,
    /// Status recorded by the previous evaluation.
    pub current_health_status: HealthStatus,
}

impl ProjectFinancials {
    /// Reject inputs the engine has no defined behaviour for.
    ///
    /// Hours, budget, cost and invoice must be non-negative and progress must
    /// lie within `[0, 100]`.
    pub fn validate(&self, progress_percent: Amount) -> Result<(), CoreError> {
        validate_non_negative(self.budget_hours, "budget_hours")?;
        validate_non_negative(self.invoice_amount, "invoice_amount")?;
        if let Some(hours) = self.consumed_hours {
            validate_non_negative(hours, "consumed_hours")?;
        }
        if let Some(cost) = self.consumed_cost {
            validate_non_negative(cost, "consumed_cost")?;
        }
        validate_progress(progress_percent)
    }
}

/// Validate that a progress percentage lies within `[0, 100]`.
pub fn validate_progress(progress_percent: Amount) -> Result<(), CoreError> {
    if progress_percent < Decimal::ZERO || progress_percent > Decimal::ONE_HUNDRED {
        return Err(CoreError::Validation(format!(
            "progress_percent must be between 0 and 100, got {progress_percent}"
        )));
    }
    Ok(())
}

/// Validate that an hours or money value is not negative.
pub fn validate_non_negative(value: Amount, name: &str) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pure evaluation
// ---------------------------------------------------------------------------

/// Snapshot fields computed by one evaluation, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMetrics {
    pub consumption_percent: Amount,
    pub progress_percent: Amount,
    pub budget_consumed: Amount,
    pub earned_value: Amount,
    pub health_status: HealthStatus,
    pub health_score: i32,
}

/// Alert to be written alongside the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingAlert {
    pub alert_type: AlertType,
    pub message: String,
}

/// Everything a store needs to record one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub project_id: DbId,
    pub previous_status: HealthStatus,
    pub metrics: SnapshotMetrics,
    pub alert: Option<PendingAlert>,
}

impl Evaluation {
    pub fn new_status(&self) -> HealthStatus {
        self.metrics.health_status
    }
}

/// Compute metrics, classification and alert decision for one project.
///
/// Progress is quantized to two places first, so the classification, the
/// earned value and the stored snapshot all see the same value.
pub fn evaluate(
    project: &ProjectFinancials,
    progress_percent: Amount,
) -> Result<Evaluation, CoreError> {
    let progress_percent = metrics::quantize(progress_percent);
    project.validate(progress_percent)?;

    let consumed_hours = metrics::consumed_hours(project.consumed_hours);
    let consumption_percent = metrics::consumption_percent(consumed_hours, project.budget_hours);
    let budget_consumed = metrics::quantize(metrics::actual_cost(project.consumed_cost));
    let earned_value = metrics::earned_value(project.invoice_amount, progress_percent);
    let classification = classify(consumption_percent, progress_percent);

    let previous_status = project.current_health_status;
    let alert = alert_for_transition(previous_status, classification.status).map(|alert_type| {
        PendingAlert {
            alert_type,
            message: alert_message(
                alert_type,
                &project.name,
                consumption_percent,
                progress_percent,
            ),
        }
    });

    Ok(Evaluation {
        project_id: project.project_id,
        previous_status,
        metrics: SnapshotMetrics {
            consumption_percent,
            progress_percent,
            budget_consumed,
            earned_value,
            health_status: classification.status,
            health_score: classification.score,
        },
        alert,
    })
}

// ---------------------------------------------------------------------------
// Store boundary
// ---------------------------------------------------------------------------

/// Identifiers assigned by the store when an evaluation is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvaluation {
    pub snapshot_id: DbId,
    pub timestamp: Timestamp,
    /// Present iff the evaluation carried an alert.
    pub alert_id: Option<DbId>,
}

/// Persistence boundary for [`run_evaluation`].
///
/// `record_evaluation` must insert the snapshot, set the project's current
/// status to `evaluation.new_status()` and insert the alert (if any) in one
/// atomic unit. It must only apply the status update if the project's status
/// is still `evaluation.previous_status`, returning
/// [`CoreError::Conflict`] otherwise, so that concurrent evaluations cannot
/// raise the same alert twice.
pub trait EvaluationStore: Send + Sync {
    /// Load a project's financial state, or `None` if it does not exist.
    fn load_financials(
        &self,
        project_id: DbId,
    ) -> impl Future<Output = Result<Option<ProjectFinancials>, CoreError>> + Send;

    /// Durably record one evaluation.
    fn record_evaluation(
        &self,
        evaluation: &Evaluation,
    ) -> impl Future<Output = Result<RecordedEvaluation, CoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Persisted snapshot returned by [`run_evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedSnapshot {
    pub id: DbId,
    pub project_id: DbId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub metrics: SnapshotMetrics,
}

/// Persisted alert returned by [`run_evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaisedAlert {
    pub id: DbId,
    pub project_id: DbId,
    pub alert_type: AlertType,
    pub message: String,
    pub created_at: Timestamp,
}

/// Result of a full evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    pub snapshot: EvaluatedSnapshot,
    pub previous_status: HealthStatus,
    pub new_status: HealthStatus,
    pub alert: Option<RaisedAlert>,
}

/// Evaluate a project and record the result through `store`.
///
/// Errors from the store are returned unchanged; nothing is retried.
pub async fn run_evaluation<S: EvaluationStore>(
    store: &S,
    project_id: DbId,
    progress_percent: Amount,
) -> Result<EvaluationOutcome, CoreError> {
    let project = store
        .load_financials(project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    let evaluation = evaluate(&project, progress_percent)?;
    let recorded = store.record_evaluation(&evaluation).await?;

    let alert = match (evaluation.alert, recorded.alert_id) {
        (Some(pending), Some(id)) => Some(RaisedAlert {
            id,
            project_id,
            alert_type: pending.alert_type,
            message: pending.message,
            created_at: recorded.timestamp,
        }),
        (None, None) => None,
        _ => {
            return Err(CoreError::Internal(
                "store returned an alert id that does not match the evaluation".into(),
            ))
        }
    };

    let new_status = evaluation.metrics.health_status;
    Ok(EvaluationOutcome {
        snapshot: EvaluatedSnapshot {
            id: recorded.snapshot_id,
            project_id,
            timestamp: recorded.timestamp,
            metrics: evaluation.metrics,
        },
        previous_status: evaluation.previous_status,
        new_status,
        alert,
    })
}
