//! Portfolio overview across all projects.

use axum::extract::State;
use axum::Json;
use finhealth_core::health::HealthStatus;
use finhealth_core::portfolio::{portfolio_figures, PortfolioFigures};
use finhealth_core::types::{Amount, DbId};
use finhealth_db::models::project::PortfolioRow;
use finhealth_db::repositories::ProjectRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the portfolio table.
#[derive(Debug, Serialize)]
pub struct PortfolioEntry {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub client_name: String,
    pub current_health_status: HealthStatus,
    pub budget_hours: Amount,
    #[serde(flatten)]
    pub figures: PortfolioFigures,
}

impl From<PortfolioRow> for PortfolioEntry {
    fn from(row: PortfolioRow) -> Self {
        let figures = portfolio_figures(row.budget_hours, row.consumed_hours, row.latest_progress);
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            client_name: row.client_name,
            current_health_status: row.current_health_status,
            budget_hours: row.budget_hours,
            figures,
        }
    }
}

/// GET /api/v1/portfolio
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<PortfolioEntry>>>> {
    let rows = ProjectRepo::list_portfolio(&state.pool).await?;
    let data = rows.into_iter().map(PortfolioEntry::from).collect();
    Ok(Json(DataResponse { data }))
}
