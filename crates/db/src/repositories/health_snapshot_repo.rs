//! Repository for the append-only `health_snapshots` table.

use finhealth_core::burndown::EarnedValueMark;
use finhealth_core::evaluation::SnapshotMetrics;
use finhealth_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::health::HealthSnapshot;

const COLUMNS: &str = "id, project_id, timestamp, consumption_percent, progress_percent, \
                       budget_consumed, earned_value, health_status, health_score";

/// Inserts and reads health snapshots. There is no update or delete.
pub struct HealthSnapshotRepo;

impl HealthSnapshotRepo {
    /// Insert a snapshot on the caller's connection (normally inside the
    /// evaluation transaction). Returns the new id and its timestamp.
    pub async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        metrics: &SnapshotMetrics,
    ) -> Result<(DbId, Timestamp), sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO health_snapshots
                 (project_id, consumption_percent, progress_percent, budget_consumed,
                  earned_value, health_status, health_score)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, timestamp",
        )
        .bind(project_id)
        .bind(metrics.consumption_percent)
        .bind(metrics.progress_percent)
        .bind(metrics.budget_consumed)
        .bind(metrics.earned_value)
        .bind(metrics.health_status.as_str())
        .bind(metrics.health_score)
        .fetch_one(&mut *conn)
        .await
    }

    /// A project's evaluation history, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<HealthSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM health_snapshots
             WHERE project_id = $1
             ORDER BY timestamp DESC, id DESC"
        );
        sqlx::query_as::<_, HealthSnapshot>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent snapshot for a project, if it was ever evaluated.
    pub async fn find_latest(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<HealthSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM health_snapshots
             WHERE project_id = $1
             ORDER BY timestamp DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, HealthSnapshot>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Earned value of every snapshot, oldest first, for the burndown chart.
    pub async fn earned_value_marks(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<EarnedValueMark>, sqlx::Error> {
        let rows: Vec<(Timestamp, finhealth_core::types::Amount)> = sqlx::query_as(
            "SELECT timestamp, earned_value FROM health_snapshots
             WHERE project_id = $1
             ORDER BY timestamp, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(timestamp, earned_value)| EarnedValueMark {
                timestamp,
                earned_value,
            })
            .collect())
    }
}
