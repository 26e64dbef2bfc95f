//! Experiment inputs
//!
//! All percentages are expressed on a 0-100 scale, matching how the
//! calculator presents them. The engine keeps that scale end to end.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrorKind};

/// Data-quality error rates measured for one experiment group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Events never recorded by the pipeline (%)
    pub event_loss: f64,
    /// Users misattributed to the wrong identity (%)
    pub id_error: f64,
    /// Conversions missing the attributes needed to count them (%)
    pub partial_data: f64,
}

impl QualityProfile {
    /// A group with no measurable defects
    pub const PERFECT: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(event_loss: f64, id_error: f64, partial_data: f64) -> Self {
        Self {
            event_loss,
            id_error,
            partial_data,
        }
    }

    #[must_use]
    pub fn with_event_loss(mut self, event_loss: f64) -> Self {
        self.event_loss = event_loss;
        self
    }

    #[must_use]
    pub fn with_id_error(mut self, id_error: f64) -> Self {
        self.id_error = id_error;
        self
    }

    #[must_use]
    pub fn with_partial_data(mut self, partial_data: f64) -> Self {
        self.partial_data = partial_data;
        self
    }

    /// Sum of the three error rates
    #[must_use]
    pub fn total_error(&self) -> f64 {
        self.event_loss + self.id_error + self.partial_data
    }

    /// Composite 0-100 quality indicator: 100 minus the mean error rate
    #[must_use]
    pub fn quality_score(&self) -> f64 {
        100.0 - self.total_error() / 3.0
    }
}

/// Supported two-sided confidence levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [
        ConfidenceLevel::Ninety,
        ConfidenceLevel::NinetyFive,
        ConfidenceLevel::NinetyNine,
    ];

    /// Look up a level by its percentage (90, 95 or 99)
    pub fn from_percent(percent: u8) -> Result<Self, ValidationError> {
        match percent {
            90 => Ok(Self::Ninety),
            95 => Ok(Self::NinetyFive),
            99 => Ok(Self::NinetyNine),
            other => Err(ValidationError::new(
                InputField::Confidence,
                ValidationErrorKind::UnsupportedConfidence {
                    value: f64::from(other),
                },
            )),
        }
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        match self {
            Self::Ninety => 90,
            Self::NinetyFive => 95,
            Self::NinetyNine => 99,
        }
    }

    /// Two-sided significance level, `(100 - confidence) / 100`
    #[must_use]
    pub fn alpha(self) -> f64 {
        f64::from(100 - self.percent()) / 100.0
    }

    /// Next level in `ALL`, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Ninety => Self::NinetyFive,
            Self::NinetyFive => Self::NinetyNine,
            Self::NinetyNine => Self::Ninety,
        }
    }

    /// Previous level in `ALL`, wrapping around
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Ninety => Self::NinetyNine,
            Self::NinetyFive => Self::Ninety,
            Self::NinetyNine => Self::NinetyFive,
        }
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_percent(value)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> Self {
        level.percent()
    }
}

/// Everything the engine needs for a single computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInput {
    /// Total users across both groups
    pub sample_size: u64,
    /// Control group's true conversion rate (%)
    pub baseline_conversion: f64,
    /// True relative effect of the variation (%)
    pub expected_lift: f64,
    pub confidence: ConfidenceLevel,
    pub control: QualityProfile,
    pub variation: QualityProfile,
    /// Users placed in the wrong segment (%). Carried through, not modeled.
    #[serde(default)]
    pub segmentation_error: f64,
    /// Inconsistent measurement windows (%). Carried through, not modeled.
    #[serde(default)]
    pub timeframe_bias: f64,
}

impl Default for ExperimentInput {
    fn default() -> Self {
        Self {
            sample_size: 10_000,
            baseline_conversion: 10.0,
            expected_lift: 5.0,
            confidence: ConfidenceLevel::NinetyFive,
            control: QualityProfile::new(2.0, 1.0, 3.0),
            variation: QualityProfile::new(5.0, 3.0, 7.0),
            segmentation_error: 4.0,
            timeframe_bias: 2.0,
        }
    }
}

/// Addressable input fields, used for error reporting, form editing and sweeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    SampleSize,
    BaselineConversion,
    ExpectedLift,
    Confidence,
    ControlEventLoss,
    ControlIdError,
    ControlPartialData,
    VariationEventLoss,
    VariationIdError,
    VariationPartialData,
    SegmentationError,
    TimeframeBias,
}

impl InputField {
    pub const ALL: [InputField; 12] = [
        InputField::SampleSize,
        InputField::BaselineConversion,
        InputField::ExpectedLift,
        InputField::Confidence,
        InputField::ControlEventLoss,
        InputField::ControlIdError,
        InputField::ControlPartialData,
        InputField::VariationEventLoss,
        InputField::VariationIdError,
        InputField::VariationPartialData,
        InputField::SegmentationError,
        InputField::TimeframeBias,
    ];

    /// Dotted field path, as it appears in serialized input
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SampleSize => "sample_size",
            Self::BaselineConversion => "baseline_conversion",
            Self::ExpectedLift => "expected_lift",
            Self::Confidence => "confidence",
            Self::ControlEventLoss => "control.event_loss",
            Self::ControlIdError => "control.id_error",
            Self::ControlPartialData => "control.partial_data",
            Self::VariationEventLoss => "variation.event_loss",
            Self::VariationIdError => "variation.id_error",
            Self::VariationPartialData => "variation.partial_data",
            Self::SegmentationError => "segmentation_error",
            Self::TimeframeBias => "timeframe_bias",
        }
    }

    /// Human readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SampleSize => "Sample Size (users)",
            Self::BaselineConversion => "Baseline Conversion (%)",
            Self::ExpectedLift => "Expected Lift (%)",
            Self::Confidence => "Confidence Level",
            Self::ControlEventLoss => "Control Event Loss (%)",
            Self::ControlIdError => "Control User ID Errors (%)",
            Self::ControlPartialData => "Control Partial Data (%)",
            Self::VariationEventLoss => "Variation Event Loss (%)",
            Self::VariationIdError => "Variation User ID Errors (%)",
            Self::VariationPartialData => "Variation Partial Data (%)",
            Self::SegmentationError => "Segmentation Errors (%)",
            Self::TimeframeBias => "Timeframe Bias (%)",
        }
    }

    /// Current value of this field as a float
    #[must_use]
    pub fn value(self, input: &ExperimentInput) -> f64 {
        match self {
            Self::SampleSize => input.sample_size as f64,
            Self::BaselineConversion => input.baseline_conversion,
            Self::ExpectedLift => input.expected_lift,
            Self::Confidence => f64::from(input.confidence.percent()),
            Self::ControlEventLoss => input.control.event_loss,
            Self::ControlIdError => input.control.id_error,
            Self::ControlPartialData => input.control.partial_data,
            Self::VariationEventLoss => input.variation.event_loss,
            Self::VariationIdError => input.variation.id_error,
            Self::VariationPartialData => input.variation.partial_data,
            Self::SegmentationError => input.segmentation_error,
            Self::TimeframeBias => input.timeframe_bias,
        }
    }

    /// Write `value` into this field.
    ///
    /// Sample size is rounded to the nearest whole user and the confidence
    /// level must be exactly 90, 95 or 99. Range checks are left to
    /// [`crate::validation::validate`].
    pub fn set_value(self, input: &mut ExperimentInput, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new(
                self,
                ValidationErrorKind::NotFinite { value },
            ));
        }

        match self {
            Self::SampleSize => {
                if value < 0.0 {
                    return Err(ValidationError::new(self, ValidationErrorKind::ZeroSampleSize));
                }
                input.sample_size = value.round() as u64;
            }
            Self::BaselineConversion => input.baseline_conversion = value,
            Self::ExpectedLift => input.expected_lift = value,
            Self::Confidence => {
                input.confidence = ConfidenceLevel::ALL
                    .into_iter()
                    .find(|level| f64::from(level.percent()) == value)
                    .ok_or(ValidationError::new(
                        self,
                        ValidationErrorKind::UnsupportedConfidence { value },
                    ))?;
            }
            Self::ControlEventLoss => input.control.event_loss = value,
            Self::ControlIdError => input.control.id_error = value,
            Self::ControlPartialData => input.control.partial_data = value,
            Self::VariationEventLoss => input.variation.event_loss = value,
            Self::VariationIdError => input.variation.id_error = value,
            Self::VariationPartialData => input.variation.partial_data = value,
            Self::SegmentationError => input.segmentation_error = value,
            Self::TimeframeBias => input.timeframe_bias = value,
        }
        Ok(())
    }
}
