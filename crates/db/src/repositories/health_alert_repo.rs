//! Repository for the `health_alerts` table.

use finhealth_core::alert::AlertType;
use finhealth_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::health::{AlertFilter, HealthAlert};

/// Select list joining the owning project for display fields.
const SELECT: &str = "SELECT a.id, a.project_id, p.name AS project_name, p.code AS project_code, \
                      a.alert_type, a.message, a.is_read, a.created_at \
                      FROM health_alerts a JOIN projects p ON p.id = a.project_id";

/// Inserts, lists and acknowledges health alerts.
pub struct HealthAlertRepo;

impl HealthAlertRepo {
    /// Insert an alert on the caller's connection. Returns the new id.
    pub async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        alert_type: AlertType,
        message: &str,
        created_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO health_alerts (project_id, alert_type, message, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(project_id)
        .bind(alert_type.as_str())
        .bind(message)
        .bind(created_at)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.0)
    }

    /// List alerts newest first, applying any filters that are set.
    pub async fn list(pool: &PgPool, filter: &AlertFilter) -> Result<Vec<HealthAlert>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BOOLEAN IS NULL OR a.is_read = $1)
               AND ($2::TEXT IS NULL OR a.alert_type = $2)
             ORDER BY a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, HealthAlert>(&query)
            .bind(filter.is_read)
            .bind(filter.alert_type.map(AlertType::as_str))
            .fetch_all(pool)
            .await
    }

    /// A project's alerts, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<HealthAlert>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE a.project_id = $1
             ORDER BY a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, HealthAlert>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Mark an alert as read. Returns `None` if no alert has that id.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<HealthAlert>, sqlx::Error> {
        let updated = sqlx::query("UPDATE health_alerts SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!("{SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, HealthAlert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
