//! Repository for the `phases` table.

use finhealth_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::{CreatePhase, Phase, PhaseHoursRow};

const COLUMNS: &str = "id, project_id, name, estimated_hours, sort_order, created_at";

/// Provides create, list and per-phase hour totals.
pub struct PhaseRepo;

impl PhaseRepo {
    /// Add a phase to a project. Names are unique within a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePhase,
    ) -> Result<Phase, sqlx::Error> {
        let query = format!(
            "INSERT INTO phases (project_id, name, estimated_hours, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.estimated_hours)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a phase only if it belongs to the given project.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phases WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Phase>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// A project's phases in display order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Phase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phases
             WHERE project_id = $1
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Every phase of a project with the sum of hours logged against it.
    pub async fn hours_by_phase(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<PhaseHoursRow>, sqlx::Error> {
        sqlx::query_as::<_, PhaseHoursRow>(
            "SELECT ph.id, ph.name, ph.estimated_hours, SUM(te.duration_hours) AS actual_hours
             FROM phases ph
             LEFT JOIN time_entries te ON te.phase_id = ph.id
             WHERE ph.project_id = $1
             GROUP BY ph.id
             ORDER BY ph.sort_order, ph.name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
