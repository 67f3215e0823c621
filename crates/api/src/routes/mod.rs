pub mod alert;
pub mod health;
pub mod portfolio;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                    service + database health
///
/// /projects                                  list, create
/// /projects/{id}                             detail with live figures
/// /projects/{id}/time-entries                list, log time
/// /projects/{id}/phases                      list, create
/// /projects/{id}/phase-comparison            estimated vs logged hours
/// /projects/{id}/evaluations                 run an evaluation (POST)
/// /projects/{id}/health-history              snapshots, newest first
/// /projects/{id}/burndown                    daily burndown series
/// /projects/{id}/alerts                      the project's alerts
///
/// /portfolio                                 all projects with figures
///
/// /alerts                                    list (?is_read=&alert_type=)
/// /alerts/{id}/read                          mark as read (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .nest("/portfolio", portfolio::router())
        .nest("/alerts", alert::router())
}
