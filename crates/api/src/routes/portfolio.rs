use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolio`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(portfolio::list))
}
