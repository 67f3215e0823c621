//! Route definitions for the `/alerts` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /             -> list
/// PATCH  /{id}/read    -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alert::list))
        .route("/{id}/read", patch(alert::mark_read))
}
