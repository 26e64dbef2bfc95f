//! Rejected inputs and undefined arithmetic

use crate::engine::compute;
use crate::error::{ArithmeticError, EngineError, ValidationErrorKind};
use crate::model::{ExperimentInput, InputField, QualityProfile};
use crate::validation::PercentRange;

fn rejected_field(input: &ExperimentInput) -> InputField {
    match compute(input) {
        Err(EngineError::Validation(e)) => e.field,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_zero_sample_size() {
    let input = ExperimentInput {
        sample_size: 0,
        ..Default::default()
    };
    assert_eq!(rejected_field(&input), InputField::SampleSize);
}

#[test]
fn test_baseline_bounds() {
    for baseline in [0.0, -1.0, 100.0, 150.0, f64::NAN] {
        let input = ExperimentInput {
            baseline_conversion: baseline,
            ..Default::default()
        };
        assert_eq!(rejected_field(&input), InputField::BaselineConversion);
    }
}

#[test]
fn test_expected_lift_bounds() {
    let below = ExperimentInput {
        expected_lift: -100.5,
        ..Default::default()
    };
    assert_eq!(rejected_field(&below), InputField::ExpectedLift);

    let infinite = ExperimentInput {
        expected_lift: f64::INFINITY,
        ..Default::default()
    };
    assert_eq!(rejected_field(&infinite), InputField::ExpectedLift);

    // -100% is allowed: the variation converts nobody
    let floor = ExperimentInput {
        expected_lift: -100.0,
        ..Default::default()
    };
    let result = compute(&floor).unwrap();
    assert_eq!(result.variation_observed_conversion, 0.0);
    assert_eq!(result.actual_lift, -100.0);
}

#[test]
fn test_each_error_rate_is_checked() {
    let cases = [
        (InputField::ControlEventLoss, QualityProfile::PERFECT.with_event_loss(-0.5), true),
        (InputField::ControlIdError, QualityProfile::PERFECT.with_id_error(100.0), true),
        (InputField::ControlPartialData, QualityProfile::PERFECT.with_partial_data(101.0), true),
        (InputField::VariationEventLoss, QualityProfile::PERFECT.with_event_loss(100.0), false),
        (InputField::VariationIdError, QualityProfile::PERFECT.with_id_error(-3.0), false),
        (InputField::VariationPartialData, QualityProfile::PERFECT.with_partial_data(f64::NAN), false),
    ];

    for (field, profile, is_control) in cases {
        let mut input = ExperimentInput::default();
        if is_control {
            input.control = profile;
        } else {
            input.variation = profile;
        }
        assert_eq!(rejected_field(&input), field);
    }
}

#[test]
fn test_reserved_fields_are_validated() {
    let input = ExperimentInput {
        segmentation_error: 100.0,
        ..Default::default()
    };
    assert_eq!(rejected_field(&input), InputField::SegmentationError);

    let input = ExperimentInput {
        timeframe_bias: -1.0,
        ..Default::default()
    };
    assert_eq!(rejected_field(&input), InputField::TimeframeBias);
}

#[test]
fn test_out_of_range_reports_value_and_range() {
    let input = ExperimentInput {
        variation: QualityProfile::new(5.0, 3.0, 120.0),
        ..Default::default()
    };
    let Err(EngineError::Validation(err)) = compute(&input) else {
        panic!("expected validation error");
    };
    assert_eq!(
        err.kind,
        ValidationErrorKind::OutOfRange {
            value: 120.0,
            range: PercentRange::ERROR_RATE
        }
    );
}

#[test]
fn test_variation_rate_above_100_is_arithmetic_error() {
    // 60% baseline doubled is a 120% conversion rate
    let input = ExperimentInput {
        baseline_conversion: 60.0,
        expected_lift: 100.0,
        variation: QualityProfile::PERFECT,
        ..Default::default()
    };
    match compute(&input) {
        Err(EngineError::Arithmetic(ArithmeticError::NonFinite { quantity })) => {
            assert_eq!(quantity, "variation standard error");
        }
        other => panic!("expected arithmetic error, got {other:?}"),
    }
}
