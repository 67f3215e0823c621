//! Estimated versus logged hours per project phase.

use serde::Serialize;

use crate::metrics::{self, quantize};
use crate::types::{Amount, DbId};

/// One bar pair of the phase comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseComparison {
    pub phase_id: DbId,
    pub phase_name: String,
    pub estimated_hours: Amount,
    /// Hours logged against the phase, `0.00` when none.
    pub actual_hours: Amount,
    /// `actual - estimated`; positive when the phase ran over.
    pub variance_hours: Amount,
}

/// Compare a phase's estimate with the hours logged against it.
pub fn phase_comparison(
    phase_id: DbId,
    phase_name: String,
    estimated_hours: Amount,
    actual_hours: Option<Amount>,
) -> PhaseComparison {
    let estimated = quantize(estimated_hours);
    let actual = quantize(metrics::consumed_hours(actual_hours));
    PhaseComparison {
        phase_id,
        phase_name,
        estimated_hours: estimated,
        actual_hours: actual,
        variance_hours: quantize(actual.saturating_sub(estimated)),
    }
}
