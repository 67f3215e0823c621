//! Project entity model and DTOs.

use finhealth_core::health::HealthStatus;
use finhealth_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub client_name: String,
    pub budget_hours: Amount,
    pub invoice_amount: Amount,
    /// Status of the most recent health snapshot.
    #[sqlx(try_from = "String")]
    pub current_health_status: HealthStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub code: String,
    pub name: String,
    pub client_name: Option<String>,
    pub budget_hours: Amount,
    pub invoice_amount: Amount,
}

/// A project joined with its aggregated hours and latest snapshot progress.
#[derive(Debug, Clone, FromRow)]
pub struct PortfolioRow {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub client_name: String,
    #[sqlx(try_from = "String")]
    pub current_health_status: HealthStatus,
    pub budget_hours: Amount,
    pub consumed_hours: Option<Amount>,
    pub latest_progress: Option<Amount>,
}

/// Budget fields plus time-entry sums, as read for an evaluation.
#[derive(Debug, Clone, FromRow)]
pub struct FinancialsRow {
    pub id: DbId,
    pub name: String,
    pub budget_hours: Amount,
    pub invoice_amount: Amount,
    pub consumed_hours: Option<Amount>,
    pub consumed_cost: Option<Amount>,
    #[sqlx(try_from = "String")]
    pub current_health_status: HealthStatus,
}

impl From<FinancialsRow> for finhealth_core::evaluation::ProjectFinancials {
    fn from(row: FinancialsRow) -> Self {
        Self {
            project_id: row.id,
            name: row.name,
            budget_hours: row.budget_hours,
            invoice_amount: row.invoice_amount,
            consumed_hours: row.consumed_hours,
            consumed_cost: row.consumed_cost,
            current_health_status: row.current_health_status,
        }
    }
}
