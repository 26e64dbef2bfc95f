//! Worked examples
//!
//! Expected figures were derived by hand from the formulas:
//! - effective sample = n/2 * (1 - id/100) * (1 - loss/100), summed
//! - observed rates scaled by (1 - partial/100)
//! - standard errors on the 0-100 percentage scale

use super::assert_close;
use crate::config::ExperimentBuilder;
use crate::engine::compute;
use crate::model::{ConfidenceLevel, Conclusion, ExperimentInput, QualityProfile, Severity};

/// The calculator's initial state
#[test]
fn test_default_scenario() {
    let result = compute(&ExperimentInput::default()).unwrap();

    // 5000 * 0.99 * 0.98 + 5000 * 0.97 * 0.95
    assert_close("effective sample", result.effective_sample_size, 9458.5, 1e-9);
    assert_close("control observed", result.control_observed_conversion, 9.70, 1e-12);
    // 10 * 1.05 * 0.93
    assert_close("variation observed", result.variation_observed_conversion, 9.765, 1e-12);
    assert_close("actual lift", result.actual_lift, 0.670_103, 1e-5);

    assert_close("control quality", result.control_quality_score, 98.0, 1e-12);
    assert_close("variation quality", result.variation_quality_score, 95.0, 1e-12);
    assert_close("bias risk", result.bias_risk_score, 3.0, 1e-12);

    assert_close("z critical", result.z_critical, 1.959_964, 1e-5);
    assert_close("pooled se", result.pooled_standard_error, 0.609_757, 1e-5);
    assert_close("power", result.stat_power, 12.715, 1e-2);
    assert_close("threshold", result.detection_threshold, 2.390_205, 1e-5);

    assert_close("quality delta", result.quality_delta, 9.0, 1e-12);
    assert_eq!(result.false_positive_risk, 0.0);
    assert_close("false negative risk", result.false_negative_risk, 1.8, 1e-12);

    // The lift is also below the detection threshold, but the dilution rule
    // is checked first.
    assert!(result.actual_lift.abs() < result.detection_threshold);
    assert_eq!(result.conclusion, Conclusion::LikelyFalseNegative);
    assert_eq!(result.conclusion.severity(), Severity::Warning);
}

/// Identical quality in both groups leaves no asymmetry to score
#[test]
fn test_zero_asymmetry() {
    let input = ExperimentBuilder::new()
        .symmetric(QualityProfile::new(2.0, 1.0, 3.0))
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_eq!(result.bias_risk_score, 0.0);
    assert_eq!(result.quality_delta, 0.0);
    assert_eq!(result.false_positive_risk, 0.0);
    assert_eq!(result.false_negative_risk, 0.0);
    // Partial data cancels out of the ratio
    assert_close("actual lift", result.actual_lift, 5.0, 1e-9);
    assert_eq!(result.conclusion, Conclusion::LikelyValid);
}

/// Variation at 50% on every error rate against a clean control
#[test]
fn test_extreme_variation_degradation() {
    let input = ExperimentBuilder::new()
        .control(QualityProfile::PERFECT)
        .variation(QualityProfile::new(50.0, 50.0, 50.0))
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_close("quality delta", result.quality_delta, 150.0, 1e-12);
    assert_close("false negative risk", result.false_negative_risk, 30.0, 1e-12);
    assert_eq!(result.false_positive_risk, 0.0);
    assert_close("bias", result.bias_risk_score, 50.0, 1e-12);
    assert_close("effective sample", result.effective_sample_size, 6250.0, 1e-9);

    // Half the variation's conversions vanish, so the lift turns negative and
    // the dilution rule (which needs a positive lift) does not apply.
    assert_close("actual lift", result.actual_lift, -47.5, 1e-9);
    assert_eq!(result.conclusion, Conclusion::RequiresInvestigation);
}

/// Degraded variation with a lift that survives but shrinks
#[test]
fn test_degradation_with_positive_lift_is_false_negative() {
    let input = ExperimentBuilder::new()
        .expected_lift(30.0)
        .control(QualityProfile::PERFECT)
        .variation(QualityProfile::new(10.0, 10.0, 10.0))
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_close("actual lift", result.actual_lift, 17.0, 1e-9);
    assert!(result.false_negative_risk > 0.0);
    assert_eq!(result.false_positive_risk, 0.0);
    assert_eq!(result.conclusion, Conclusion::LikelyFalseNegative);
}

/// A leaky control inflates the variation's apparent lift
#[test]
fn test_degraded_control_is_potential_false_positive() {
    let input = ExperimentBuilder::new()
        .sample_size(100_000)
        .control(QualityProfile::new(0.0, 0.0, 10.0))
        .variation(QualityProfile::PERFECT)
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_close("actual lift", result.actual_lift, 16.666_667, 1e-5);
    assert_close("quality delta", result.quality_delta, -10.0, 1e-12);
    assert_close("false positive risk", result.false_positive_risk, 2.0, 1e-12);
    assert_eq!(result.false_negative_risk, 0.0);
    assert_eq!(result.conclusion, Conclusion::PotentialFalsePositive);
    assert_eq!(result.conclusion.severity(), Severity::Danger);
}

/// Small clean experiments cannot resolve a 5% lift
#[test]
fn test_small_clean_sample_is_inconclusive() {
    let input = ExperimentBuilder::new()
        .sample_size(1_000)
        .symmetric(QualityProfile::PERFECT)
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_close("threshold", result.detection_threshold, 7.519_215, 1e-5);
    assert_close("power", result.stat_power, 4.463, 1e-2);
    assert_eq!(result.conclusion, Conclusion::Inconclusive);
}

/// Large clean experiments recover the true lift
#[test]
fn test_large_clean_sample_is_valid() {
    let input = ExperimentBuilder::new()
        .sample_size(100_000)
        .expected_lift(20.0)
        .symmetric(QualityProfile::PERFECT)
        .build()
        .unwrap();
    let result = compute(&input).unwrap();

    assert_close("effective sample", result.effective_sample_size, 100_000.0, 1e-9);
    assert_close("actual lift", result.actual_lift, 20.0, 1e-9);
    assert!(result.stat_power > 99.9);
    assert!(result.stat_power <= 100.0);
    assert_eq!(result.conclusion, Conclusion::LikelyValid);
}

/// Higher confidence widens the threshold and lowers power
#[test]
fn test_confidence_levels() {
    let at = |level| {
        let input = ExperimentBuilder::new()
            .sample_size(100_000)
            .symmetric(QualityProfile::new(1.0, 1.0, 1.0))
            .confidence(level)
            .build()
            .unwrap();
        compute(&input).unwrap()
    };

    let ninety = at(ConfidenceLevel::Ninety);
    let ninety_nine = at(ConfidenceLevel::NinetyNine);

    assert_close("90% power", ninety.stat_power, 82.823, 1e-2);
    assert_close("99% power", ninety_nine.stat_power, 50.648, 1e-2);
    assert_close("90% threshold", ninety.detection_threshold, 0.634_574, 1e-5);
    assert_close("99% threshold", ninety_nine.detection_threshold, 0.993_738, 1e-5);
}

/// The two reserved inputs do not move any metric
#[test]
fn test_reserved_fields_are_inert() {
    let base = compute(&ExperimentInput::default()).unwrap();
    let input = ExperimentBuilder::new()
        .segmentation_error(45.0)
        .timeframe_bias(30.0)
        .build()
        .unwrap();
    let changed = compute(&input).unwrap();

    assert!(super::same_bits(&base, &changed));
    assert_eq!(input.segmentation_error, 45.0);
    assert_eq!(input.timeframe_bias, 30.0);
}

/// Results survive a JSON round trip for export
#[test]
fn test_result_serializes() {
    let result = compute(&ExperimentInput::default()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"conclusion\":\"likely_false_negative\""));
    assert!(json.contains("\"curve\""));
}
