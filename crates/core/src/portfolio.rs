//! Per-project summary figures for the portfolio overview.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{self, quantize, DECIMAL_PLACES};
use crate::types::Amount;

/// Derived figures shown in one portfolio row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioFigures {
    pub consumed_hours: Amount,
    pub consumption_percent: Amount,
    /// Progress of the latest snapshot, `0.00` when never evaluated.
    pub progress_percent: Amount,
    pub deviation: Amount,
}

/// Compute portfolio figures from raw aggregates.
///
/// The deviation uses the unrounded consumption ratio and is only rounded
/// at the end, so it can differ by a cent from `|consumption% - progress%|`.
pub fn portfolio_figures(
    budget_hours: Amount,
    consumed_hours: Option<Amount>,
    latest_progress: Option<Amount>,
) -> PortfolioFigures {
    let consumed = metrics::consumed_hours(consumed_hours);
    let progress = latest_progress.unwrap_or(Decimal::new(0, DECIMAL_PLACES));

    let raw_consumption = metrics::raw_consumption_percent(consumed, budget_hours);

    PortfolioFigures {
        consumed_hours: quantize(consumed),
        consumption_percent: metrics::consumption_percent(consumed, budget_hours),
        progress_percent: progress,
        deviation: quantize(metrics::deviation(raw_consumption, progress)),
    }
}
