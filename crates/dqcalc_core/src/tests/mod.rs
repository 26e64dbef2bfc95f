//! Scenario tests for the dqcalc engine
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked examples with hand-checked figures
//! - `properties` - Invariants that hold for every valid input
//! - `conclusions` - Rule priority on full engine runs
//! - `curve` - The error-rate vs. observed-lift sweep
//! - `validation` - Rejected inputs and arithmetic failures
//! - `analysis` - Sensitivity sweeps

mod scenarios;
mod validation;

use crate::model::ExperimentResult;

/// Assert two floats agree within `tol`, naming the quantity on failure
pub(crate) fn assert_close(name: &str, actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "{name}: expected {expected}, got {actual}"
    );
}

/// Bitwise comparison, so NaN-free results can be checked for idempotence
pub(crate) fn same_bits(a: &ExperimentResult, b: &ExperimentResult) -> bool {
    let scalars = |r: &ExperimentResult| {
        [
            r.effective_sample_size,
            r.control_observed_conversion,
            r.variation_observed_conversion,
            r.actual_lift,
            r.bias_risk_score,
            r.stat_power,
            r.false_positive_risk,
            r.false_negative_risk,
            r.detection_threshold,
            r.control_quality_score,
            r.variation_quality_score,
        ]
        .map(f64::to_bits)
    };
    scalars(a) == scalars(b)
        && a.conclusion == b.conclusion
        && a.curve.len() == b.curve.len()
        && a.curve.iter().zip(&b.curve).all(|(p, q)| {
            p.error_rate == q.error_rate
                && p.observed_lift.to_bits() == q.observed_lift.to_bits()
                && p.is_significant == q.is_significant
        })
}
