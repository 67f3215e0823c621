pub mod alert;
pub mod evaluation;
pub mod health;
pub mod phase;
pub mod portfolio;
pub mod project;
pub mod time_entry;

use finhealth_core::types::DbId;
use finhealth_db::models::project::Project;
use finhealth_db::repositories::ProjectRepo;
use finhealth_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a project or fail with 404.
pub(crate) async fn ensure_project(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}
