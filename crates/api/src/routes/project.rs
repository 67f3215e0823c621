//! Route definitions for the `/projects` resource.
//!
//! Also nests time entries, phases, evaluations, health history, burndown
//! and alerts under `/projects/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{alert, evaluation, health, phase, project, time_entry};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// GET    /{id}/time-entries       -> time_entry::list_by_project
/// POST   /{id}/time-entries       -> time_entry::create
/// GET    /{id}/phases             -> phase::list_by_project
/// POST   /{id}/phases             -> phase::create
/// GET    /{id}/phase-comparison   -> phase::comparison
/// POST   /{id}/evaluations        -> evaluation::create
/// GET    /{id}/health-history     -> health::history
/// GET    /{id}/burndown           -> health::burndown
/// GET    /{id}/alerts             -> alert::list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id))
        .route(
            "/{id}/time-entries",
            get(time_entry::list_by_project).post(time_entry::create),
        )
        .route(
            "/{id}/phases",
            get(phase::list_by_project).post(phase::create),
        )
        .route("/{id}/phase-comparison", get(phase::comparison))
        .route("/{id}/evaluations", post(evaluation::create))
        .route("/{id}/health-history", get(health::history))
        .route("/{id}/burndown", get(health::burndown))
        .route("/{id}/alerts", get(alert::list_by_project))
}
