//! Health snapshot and health alert models.

use finhealth_core::alert::AlertType;
use finhealth_core::health::HealthStatus;
use finhealth_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable row from the `health_snapshots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthSnapshot {
    pub id: DbId,
    pub project_id: DbId,
    pub timestamp: Timestamp,
    pub consumption_percent: Amount,
    pub progress_percent: Amount,
    pub budget_consumed: Amount,
    pub earned_value: Amount,
    #[sqlx(try_from = "String")]
    pub health_status: HealthStatus,
    pub health_score: i32,
}

/// A row from `health_alerts` joined with the owning project's name and code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthAlert {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub project_code: String,
    #[sqlx(try_from = "String")]
    pub alert_type: AlertType,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Optional filters for alert listing (`?is_read=&alert_type=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    pub is_read: Option<bool>,
    pub alert_type: Option<AlertType>,
}
