//! Health alert types and the transition policy that raises them.
//!
//! Alerts depend only on the previous and new [`HealthStatus`]; scores and
//! deviations are never compared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::health::HealthStatus;
use crate::types::Amount;

/// Severity of a raised health alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    /// The project entered CRITICAL from any other status.
    Critical,
    /// The project degraded from HEALTHY to WARNING.
    Warning,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRITICAL" => Ok(Self::Critical),
            "WARNING" => Ok(Self::Warning),
            other => Err(CoreError::Validation(format!(
                "Unknown alert type '{other}', expected CRITICAL or WARNING"
            ))),
        }
    }
}

impl TryFrom<String> for AlertType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Decide whether moving from `previous` to `current` raises an alert.
///
/// - any non-CRITICAL -> CRITICAL raises a CRITICAL alert
/// - HEALTHY -> WARNING raises a WARNING alert
/// - every other transition raises nothing
pub fn alert_for_transition(previous: HealthStatus, current: HealthStatus) -> Option<AlertType> {
    match (previous, current) {
        (HealthStatus::Critical, HealthStatus::Critical) => None,
        (_, HealthStatus::Critical) => Some(AlertType::Critical),
        (HealthStatus::Healthy, HealthStatus::Warning) => Some(AlertType::Warning),
        _ => None,
    }
}

/// Human-readable alert text shown in the notification bell.
pub fn alert_message(
    alert_type: AlertType,
    project_name: &str,
    consumption_percent: Amount,
    progress_percent: Amount,
) -> String {
    let detail = match alert_type {
        AlertType::Critical => "Critical deviation detected.",
        AlertType::Warning => "Significant deviation detected.",
    };
    format!(
        "Project {project_name}: consumption {consumption_percent}%, \
         progress {progress_percent}%. {detail}"
    )
}
