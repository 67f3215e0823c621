//! Triple-axis health classification.
//!
//! Turns a consumption percentage and a progress percentage into a
//! [`HealthStatus`] and a 0-100 score for the gauge widget. The rules are
//! evaluated in a fixed order and the first match wins:
//!
//! | Rule | Condition                                  | Status   | Score                          |
//! |------|--------------------------------------------|----------|--------------------------------|
//! | 1    | consumption >= 80 and progress < 50        | CRITICAL | `max(0, 100 - dev * 2)`        |
//! | 2    | deviation > 15                             | WARNING  | `max(15, 100 - dev)`           |
//! | 3    | deviation <= 10                            | HEALTHY  | `min(100, 100 - dev)`          |
//! | 4    | otherwise (10 < deviation <= 15)           | WARNING  | `max(20, 100 - dev * 1.5)`     |
//!
//! Score formulas run in `f64` and truncate toward zero before the floor or
//! cap is applied.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::metrics::deviation;
use crate::types::Amount;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Consumption at or above which a project can be critical.
pub const CRITICAL_CONSUMPTION_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
/// Progress below which a heavily consumed project is critical.
pub const CRITICAL_PROGRESS_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Deviation above which a project is in warning.
pub const WARNING_DEVIATION_PERCENT: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
/// Deviation at or below which a project is healthy.
pub const HEALTHY_DEVIATION_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

const WARNING_SCORE_FLOOR: i32 = 15;
const GREY_ZONE_SCORE_FLOOR: i32 = 20;

// ---------------------------------------------------------------------------
// HealthStatus
// ---------------------------------------------------------------------------

/// Health classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Critical,
    Warning,
    #[default]
    Healthy,
}

impl HealthStatus {
    /// Storage and wire representation (`"CRITICAL"`, `"WARNING"`, `"HEALTHY"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Healthy => "HEALTHY",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRITICAL" => Ok(Self::Critical),
            "WARNING" => Ok(Self::Warning),
            "HEALTHY" => Ok(Self::Healthy),
            other => Err(CoreError::Validation(format!(
                "Unknown health status '{other}', expected CRITICAL, WARNING or HEALTHY"
            ))),
        }
    }
}

impl TryFrom<String> for HealthStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: HealthStatus,
    /// Always within `[MIN_SCORE, MAX_SCORE]`.
    pub score: i32,
}

/// Classify a project from its consumption and progress percentages.
///
/// Total over all inputs: never fails and always returns a score in
/// `0..=100`. Identical inputs always produce identical output.
pub fn classify(consumption_percent: Amount, progress_percent: Amount) -> Classification {
    let dev = deviation(consumption_percent, progress_percent);
    let dev_f = as_f64(dev);

    let (status, score) = if consumption_percent >= CRITICAL_CONSUMPTION_PERCENT
        && progress_percent < CRITICAL_PROGRESS_PERCENT
    {
        (
            HealthStatus::Critical,
            truncate(100.0 - dev_f * 2.0).max(MIN_SCORE),
        )
    } else if dev > WARNING_DEVIATION_PERCENT {
        (
            HealthStatus::Warning,
            truncate(100.0 - dev_f).max(WARNING_SCORE_FLOOR),
        )
    } else if dev <= HEALTHY_DEVIATION_PERCENT {
        (
            HealthStatus::Healthy,
            truncate(100.0 - dev_f).min(MAX_SCORE),
        )
    } else {
        (
            HealthStatus::Warning,
            truncate(100.0 - dev_f * 1.5).max(GREY_ZONE_SCORE_FLOOR),
        )
    };

    Classification {
        status,
        score: score.clamp(MIN_SCORE, MAX_SCORE),
    }
}

/// Convert through the decimal string so the result is the correctly
/// rounded double for the exact decimal value.
fn as_f64(value: Amount) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| value.to_f64().unwrap_or(f64::MAX))
}

/// Truncate toward zero, saturating at the `i32` range.
fn truncate(value: f64) -> i32 {
    value.trunc() as i32
}
