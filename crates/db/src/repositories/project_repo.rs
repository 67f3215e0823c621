//! Repository for the `projects` table.

use finhealth_core::health::HealthStatus;
use finhealth_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, FinancialsRow, PortfolioRow, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, client_name, budget_hours, invoice_amount, \
                       current_health_status, created_at, updated_at";

/// Provides read and create operations for projects.
///
/// `current_health_status` is only ever written by
/// [`PgEvaluationStore`](crate::PgEvaluationStore).
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row. New projects start HEALTHY.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (code, name, client_name, budget_hours, invoice_amount)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(input.budget_hours)
            .bind(input.invoice_amount)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects ordered by name, optionally filtered by current health status.
    pub async fn list(
        pool: &PgPool,
        status: Option<HealthStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR current_health_status = $1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(status.map(HealthStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Load the budget fields, time-entry sums and current status used by an
    /// evaluation. Sums are `NULL` when the project has no time entries.
    pub async fn find_financials(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FinancialsRow>, sqlx::Error> {
        sqlx::query_as::<_, FinancialsRow>(
            "SELECT p.id, p.name, p.budget_hours, p.invoice_amount,
                    te.consumed_hours, te.consumed_cost, p.current_health_status
             FROM projects p
             LEFT JOIN (
                 SELECT project_id,
                        SUM(duration_hours) AS consumed_hours,
                        SUM(cost) AS consumed_cost
                 FROM time_entries
                 WHERE project_id = $1
                 GROUP BY project_id
             ) te ON te.project_id = p.id
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Every project with its hour total and the progress of its latest snapshot.
    pub async fn list_portfolio(pool: &PgPool) -> Result<Vec<PortfolioRow>, sqlx::Error> {
        sqlx::query_as::<_, PortfolioRow>(
            "SELECT p.id, p.code, p.name, p.client_name, p.current_health_status,
                    p.budget_hours, te.consumed_hours, ls.progress_percent AS latest_progress
             FROM projects p
             LEFT JOIN (
                 SELECT project_id, SUM(duration_hours) AS consumed_hours
                 FROM time_entries
                 GROUP BY project_id
             ) te ON te.project_id = p.id
             LEFT JOIN LATERAL (
                 SELECT s.progress_percent
                 FROM health_snapshots s
                 WHERE s.project_id = p.id
                 ORDER BY s.timestamp DESC, s.id DESC
                 LIMIT 1
             ) ls ON TRUE
             ORDER BY p.name, p.id",
        )
        .fetch_all(pool)
        .await
    }
}
