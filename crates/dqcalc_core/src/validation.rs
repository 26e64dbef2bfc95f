//! Input range checks
//!
//! Every field is checked before the engine touches it, so a rejected input
//! never produces a partial result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrorKind};
use crate::model::{ExperimentInput, InputField, QualityProfile};

/// A numeric interval with independently open or closed ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl PercentRange {
    /// Error rates: `[0, 100)`
    pub const ERROR_RATE: Self = Self {
        min: 0.0,
        max: 100.0,
        min_inclusive: true,
        max_inclusive: false,
    };

    /// Baseline conversion: `(0, 100)`
    pub const CONVERSION: Self = Self {
        min: 0.0,
        max: 100.0,
        min_inclusive: false,
        max_inclusive: false,
    };

    /// Expected lift: `[-100, inf)`
    pub const LIFT: Self = Self {
        min: -100.0,
        max: f64::INFINITY,
        min_inclusive: true,
        max_inclusive: false,
    };

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let below_max = if self.max_inclusive {
            value <= self.max
        } else {
            value < self.max
        };
        above_min && below_max
    }
}

impl fmt::Display for PercentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        let close = if self.max_inclusive { ']' } else { ')' };
        if self.max.is_infinite() {
            write!(f, "{open}{}, inf{close}", self.min)
        } else {
            write!(f, "{open}{}, {}{close}", self.min, self.max)
        }
    }
}

fn check(field: InputField, value: f64, range: PercentRange) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::NotFinite { value },
        ));
    }
    if !range.contains(value) {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::OutOfRange { value, range },
        ));
    }
    Ok(())
}

fn check_profile(
    profile: &QualityProfile,
    fields: [InputField; 3],
) -> Result<(), ValidationError> {
    let [event_loss, id_error, partial_data] = fields;
    check(event_loss, profile.event_loss, PercentRange::ERROR_RATE)?;
    check(id_error, profile.id_error, PercentRange::ERROR_RATE)?;
    check(partial_data, profile.partial_data, PercentRange::ERROR_RATE)
}

/// Reject the first field that lies outside its declared range.
///
/// Fields are checked in declaration order, so the reported field is stable
/// when several are invalid at once.
pub fn validate(input: &ExperimentInput) -> Result<(), ValidationError> {
    if input.sample_size == 0 {
        return Err(ValidationError::new(
            InputField::SampleSize,
            ValidationErrorKind::ZeroSampleSize,
        ));
    }
    check(
        InputField::BaselineConversion,
        input.baseline_conversion,
        PercentRange::CONVERSION,
    )?;
    check(
        InputField::ExpectedLift,
        input.expected_lift,
        PercentRange::LIFT,
    )?;
    check_profile(
        &input.control,
        [
            InputField::ControlEventLoss,
            InputField::ControlIdError,
            InputField::ControlPartialData,
        ],
    )?;
    check_profile(
        &input.variation,
        [
            InputField::VariationEventLoss,
            InputField::VariationIdError,
            InputField::VariationPartialData,
        ],
    )?;
    check(
        InputField::SegmentationError,
        input.segmentation_error,
        PercentRange::ERROR_RATE,
    )?;
    check(
        InputField::TimeframeBias,
        input.timeframe_bias,
        PercentRange::ERROR_RATE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(PercentRange::ERROR_RATE.contains(0.0));
        assert!(!PercentRange::ERROR_RATE.contains(100.0));
        assert!(!PercentRange::CONVERSION.contains(0.0));
        assert!(PercentRange::CONVERSION.contains(99.9));
        assert!(PercentRange::LIFT.contains(-100.0));
        assert!(PercentRange::LIFT.contains(1e9));
        assert!(!PercentRange::LIFT.contains(-100.5));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(PercentRange::ERROR_RATE.to_string(), "[0, 100)");
        assert_eq!(PercentRange::CONVERSION.to_string(), "(0, 100)");
        assert_eq!(PercentRange::LIFT.to_string(), "[-100, inf)");
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&ExperimentInput::default()).is_ok());
    }
}
