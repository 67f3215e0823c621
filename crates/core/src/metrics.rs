//! Budget consumption and earned-value arithmetic.
//!
//! Aggregated sums arrive as `Option<Decimal>`: `None` means the project has
//! no time entries yet, and each aggregator maps that to an explicit zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Amount;

/// Decimal places kept for percentages and money.
pub const DECIMAL_PLACES: u32 = 2;

/// Round to two places, half away from zero (never banker's rounding).
///
/// The result carries exactly two places, so `85` renders as `85.00`, and a
/// value that rounds to zero is positive zero. Values too large for two places
/// keep their integral scale.
pub fn quantize(value: Amount) -> Amount {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Total logged hours, `0` when nothing has been logged.
pub fn consumed_hours(total: Option<Amount>) -> Amount {
    total.unwrap_or(Decimal::ZERO)
}

/// Total logged cost, `0.00` when nothing has been logged.
pub fn actual_cost(total: Option<Amount>) -> Amount {
    total.unwrap_or(Decimal::new(0, DECIMAL_PLACES))
}

/// Unrounded share of the budgeted hours already consumed, as a percentage.
///
/// A zero budget yields `0`. A ratio beyond the decimal range saturates at
/// `Decimal::MAX` (or `Decimal::MIN` for opposite signs).
pub fn raw_consumption_percent(consumed_hours: Amount, budget_hours: Amount) -> Amount {
    if budget_hours.is_zero() {
        return Decimal::ZERO;
    }
    consumed_hours
        .checked_div(budget_hours)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if consumed_hours.is_sign_negative() == budget_hours.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Share of the budgeted hours already consumed, as a 2-place percentage.
///
/// A zero budget yields `0.00`; this function never divides by zero.
pub fn consumption_percent(consumed_hours: Amount, budget_hours: Amount) -> Amount {
    quantize(raw_consumption_percent(consumed_hours, budget_hours))
}

/// Monetary value of the work completed so far.
pub fn earned_value(invoice_amount: Amount, progress_percent: Amount) -> Amount {
    let value = invoice_amount
        .checked_mul(progress_percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            (invoice_amount / Decimal::ONE_HUNDRED).saturating_mul(progress_percent)
        });
    quantize(value)
}

/// Absolute gap between consumption and progress percentages.
pub fn deviation(consumption_percent: Amount, progress_percent: Amount) -> Amount {
    consumption_percent.saturating_sub(progress_percent).abs()
}
