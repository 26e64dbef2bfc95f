//! Metrics engine
//!
//! [`compute`] turns one [`ExperimentInput`] into a fully populated
//! [`ExperimentResult`]. It is a pure function: no I/O, no shared state, and
//! identical input always yields identical output. Inputs are validated up
//! front and undefined arithmetic is reported instead of leaking NaN.

use crate::error::{ArithmeticError, Result};
use crate::model::{
    CURVE_ERROR_RATES, CurvePoint, DecisionInputs, ExperimentInput, ExperimentResult,
    QualityProfile, classify,
};
use crate::stats;
use crate::validation::validate;

/// Users left in one group after identity errors and event loss
fn effective_group_sample(sample_size: u64, profile: &QualityProfile) -> f64 {
    sample_size as f64 / 2.0 * (1.0 - profile.id_error / 100.0) * (1.0 - profile.event_loss / 100.0)
}

/// Relative lift (%) of `variation_rate` over `control_rate`
fn relative_lift(variation_rate: f64, control_rate: f64) -> std::result::Result<f64, ArithmeticError> {
    if control_rate == 0.0 {
        return Err(ArithmeticError::ZeroControlRate);
    }
    finite((variation_rate / control_rate - 1.0) * 100.0, "lift")
}

fn finite(value: f64, quantity: &'static str) -> std::result::Result<f64, ArithmeticError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFinite { quantity })
    }
}

/// Fraction of a group's conversions lost at a given sweep error rate
fn sweep_impact(profile: &QualityProfile, error_rate: f64) -> f64 {
    profile.event_loss / 100.0
        + profile.id_error / 100.0
        + (error_rate / 100.0) * (profile.partial_data / 100.0)
}

/// Observed lift for every error rate in [`CURVE_ERROR_RATES`].
///
/// The significance cut-off is the single detection threshold of the whole
/// experiment, not one recomputed per point.
pub fn sweep_curve(
    input: &ExperimentInput,
    detection_threshold: f64,
) -> std::result::Result<Vec<CurvePoint>, ArithmeticError> {
    let variation_true_rate = input.baseline_conversion * (1.0 + input.expected_lift / 100.0);

    CURVE_ERROR_RATES
        .iter()
        .map(|&error_rate| {
            let rate = f64::from(error_rate);
            let control_rate =
                input.baseline_conversion * (1.0 - sweep_impact(&input.control, rate));
            let variation_rate = variation_true_rate * (1.0 - sweep_impact(&input.variation, rate));
            let observed_lift = relative_lift(variation_rate, control_rate)?;

            Ok(CurvePoint {
                error_rate,
                true_lift: input.expected_lift,
                observed_lift,
                is_significant: observed_lift.abs() > detection_threshold,
            })
        })
        .collect()
}

/// Compute every metric for `input`.
///
/// # Errors
///
/// [`crate::EngineError::Validation`] when a field is out of range,
/// [`crate::EngineError::Arithmetic`] when valid fields combine into an
/// undefined quantity (e.g. a variation rate above 100%).
pub fn compute(input: &ExperimentInput) -> Result<ExperimentResult> {
    validate(input)?;

    // Effective sample size
    let control_sample = effective_group_sample(input.sample_size, &input.control);
    let variation_sample = effective_group_sample(input.sample_size, &input.variation);
    if control_sample <= 0.0 || variation_sample <= 0.0 {
        return Err(ArithmeticError::ZeroEffectiveSample.into());
    }
    let effective_sample_size = control_sample + variation_sample;

    // Observed conversion
    let control_observed = input.baseline_conversion * (1.0 - input.control.partial_data / 100.0);
    let variation_true_rate = input.baseline_conversion * (1.0 + input.expected_lift / 100.0);
    let variation_observed = variation_true_rate * (1.0 - input.variation.partial_data / 100.0);

    let actual_lift = relative_lift(variation_observed, control_observed)?;

    // Quality
    let control_quality_score = input.control.quality_score();
    let variation_quality_score = input.variation.quality_score();
    let bias_risk_score = (control_quality_score - variation_quality_score).abs();

    // Power and detection threshold
    let z_critical = stats::z_critical(input.confidence);
    let se_control = finite(
        stats::standard_error(control_observed, control_sample),
        "control standard error",
    )?;
    let se_variation = finite(
        stats::standard_error(variation_observed, variation_sample),
        "variation standard error",
    )?;
    let pooled_se = stats::pooled_standard_error(se_control, se_variation);
    if pooled_se <= 0.0 {
        return Err(ArithmeticError::NonFinite {
            quantity: "pooled standard error",
        }
        .into());
    }

    let expected_effect = input.expected_lift / 100.0 * input.baseline_conversion;
    let stat_power = finite(
        stats::power(expected_effect, pooled_se, z_critical),
        "statistical power",
    )?;
    let detection_threshold = stats::detection_threshold(z_critical, pooled_se);

    // Decision risk
    let quality_delta = input.variation.total_error() - input.control.total_error();
    let false_positive_risk = if quality_delta < 0.0 {
        (quality_delta / 5.0).abs()
    } else {
        0.0
    };
    let false_negative_risk = if quality_delta > 0.0 {
        quality_delta / 5.0
    } else {
        0.0
    };

    let conclusion = classify(&DecisionInputs {
        reported_lift: actual_lift,
        expected_lift: input.expected_lift,
        quality_delta,
        detection_threshold,
    });

    let curve = sweep_curve(input, detection_threshold)?;

    Ok(ExperimentResult {
        effective_sample_size,
        control_observed_conversion: control_observed,
        variation_observed_conversion: variation_observed,
        actual_lift,
        bias_risk_score,
        stat_power,
        false_positive_risk,
        false_negative_risk,
        detection_threshold,
        conclusion,
        control_quality_score,
        variation_quality_score,
        quality_delta,
        z_critical,
        pooled_standard_error: pooled_se,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_group_sample() {
        let profile = QualityProfile::new(2.0, 1.0, 3.0);
        // 5000 * 0.99 * 0.98
        assert!((effective_group_sample(10_000, &profile) - 4851.0).abs() < 1e-9);
    }

    #[test]
    fn test_relative_lift_rejects_zero_control() {
        assert_eq!(relative_lift(1.0, 0.0), Err(ArithmeticError::ZeroControlRate));
        assert!((relative_lift(11.0, 10.0).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_impact_ignores_partial_data_at_zero_error() {
        let profile = QualityProfile::new(5.0, 3.0, 7.0);
        assert!((sweep_impact(&profile, 0.0) - 0.08).abs() < 1e-12);
        assert!((sweep_impact(&profile, 20.0) - 0.094).abs() < 1e-12);
    }
}
