//! Financial burndown series for the project detail chart.
//!
//! One point per calendar day from the first logged time entry up to and
//! including `today`, with three lines: the invoice spread evenly across the
//! period, the cumulative actual cost, and the earned value of the latest
//! health snapshot taken on or before that day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{quantize, DECIMAL_PLACES};
use crate::types::{Amount, Timestamp};

/// Total logged cost for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCost {
    pub date: NaiveDate,
    pub cost: Amount,
}

/// Earned value recorded by one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EarnedValueMark {
    pub timestamp: Timestamp,
    pub earned_value: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    pub budget_line: Amount,
    pub actual_cost_cumulative: Amount,
    pub earned_value_cumulative: Amount,
}

/// Build the burndown series.
///
/// Returns an empty series when there are no time entries or when the first
/// entry lies after `today`. `daily_costs` and `marks` may be in any order.
pub fn burndown_series(
    invoice_amount: Amount,
    daily_costs: &[DailyCost],
    marks: &[EarnedValueMark],
    today: NaiveDate,
) -> Vec<BurndownPoint> {
    let Some(start) = daily_costs.iter().map(|c| c.date).min() else {
        return Vec::new();
    };
    if start > today {
        return Vec::new();
    }

    // Inclusive day count: the last point lands exactly on the invoice.
    let total_days = (today - start).num_days() + 1;
    let daily_budget = invoice_amount / Decimal::from(total_days);

    let mut costs = daily_costs.to_vec();
    costs.sort_by_key(|c| c.date);
    let mut marks = marks.to_vec();
    marks.sort_by_key(|m| m.timestamp);

    let zero = Decimal::new(0, DECIMAL_PLACES);
    let mut cumulative_cost = zero;
    let mut cost_idx = 0;
    let mut mark_idx = 0;
    let mut earned = zero;

    let mut points = Vec::with_capacity(total_days as usize);
    for (elapsed, date) in start.iter_days().take(total_days as usize).enumerate() {
        while cost_idx < costs.len() && costs[cost_idx].date <= date {
            cumulative_cost += costs[cost_idx].cost;
            cost_idx += 1;
        }
        while mark_idx < marks.len() && marks[mark_idx].timestamp.date_naive() <= date {
            earned = marks[mark_idx].earned_value;
            mark_idx += 1;
        }

        points.push(BurndownPoint {
            date,
            budget_line: quantize(daily_budget * Decimal::from(elapsed as i64 + 1)),
            actual_cost_cumulative: quantize(cumulative_cost),
            earned_value_cumulative: earned,
        });
    }
    points
}
