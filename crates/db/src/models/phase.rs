//! Project phase entity model and DTOs.

use finhealth_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `phases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Phase {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub estimated_hours: Amount,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for adding a phase to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhase {
    pub name: String,
    pub estimated_hours: Amount,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
}

/// A phase with the hours logged against it. `actual_hours` is `None` when
/// no entry references the phase.
#[derive(Debug, Clone, FromRow)]
pub struct PhaseHoursRow {
    pub id: DbId,
    pub name: String,
    pub estimated_hours: Amount,
    pub actual_hours: Option<Amount>,
}
