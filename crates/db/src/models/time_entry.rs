//! Time entry entity model and DTOs.

use chrono::NaiveDate;
use finhealth_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A logged block of work from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_id: Option<DbId>,
    pub user_name: String,
    pub description: String,
    pub duration_hours: Amount,
    pub cost: Amount,
    pub entry_date: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for logging time against a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeEntry {
    /// Must name a phase of the same project when set.
    pub phase_id: Option<DbId>,
    pub user_name: String,
    pub description: Option<String>,
    pub duration_hours: Amount,
    /// Defaults to 0.00 if omitted.
    pub cost: Option<Amount>,
    pub entry_date: NaiveDate,
}
