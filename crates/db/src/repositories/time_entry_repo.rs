//! Repository for the `time_entries` table.

use finhealth_core::burndown::DailyCost;
use finhealth_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::time_entry::{CreateTimeEntry, TimeEntry};

const COLUMNS: &str = "id, project_id, phase_id, user_name, description, duration_hours, cost, \
                       entry_date, created_at";

/// Provides insert and aggregate queries over logged time.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Log a time entry against a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTimeEntry,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries
                 (project_id, phase_id, user_name, description, duration_hours, cost, entry_date)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, COALESCE($6, 0), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .bind(input.phase_id)
            .bind(&input.user_name)
            .bind(&input.description)
            .bind(input.duration_hours)
            .bind(input.cost)
            .bind(input.entry_date)
            .fetch_one(pool)
            .await
    }

    /// List a project's entries, most recent date first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE project_id = $1
             ORDER BY entry_date DESC, id DESC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Sum of logged hours and cost. Both are `None` when nothing is logged.
    pub async fn totals(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<(Option<Amount>, Option<Amount>), sqlx::Error> {
        sqlx::query_as(
            "SELECT SUM(duration_hours), SUM(cost) FROM time_entries WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Logged cost per calendar day, oldest first.
    pub async fn daily_costs(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DailyCost>, sqlx::Error> {
        let rows: Vec<(chrono::NaiveDate, Amount)> = sqlx::query_as(
            "SELECT entry_date, SUM(cost) FROM time_entries
             WHERE project_id = $1
             GROUP BY entry_date
             ORDER BY entry_date",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, cost)| DailyCost { date, cost })
            .collect())
    }
}
