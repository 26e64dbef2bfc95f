//! Experiment Builder
//!
//! Starts from the calculator defaults so callers only name what differs.

use crate::error::ValidationError;
use crate::model::{ConfidenceLevel, ExperimentInput, QualityProfile};
use crate::validation::validate;

/// Fluent builder for [`ExperimentInput`]
#[derive(Debug, Clone, Default)]
pub struct ExperimentBuilder {
    input: ExperimentInput,
}

impl ExperimentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing input instead of the defaults
    #[must_use]
    pub fn from_input(input: ExperimentInput) -> Self {
        Self { input }
    }

    // =========================================================================
    // Experiment parameters
    // =========================================================================

    #[must_use]
    pub fn sample_size(mut self, users: u64) -> Self {
        self.input.sample_size = users;
        self
    }

    #[must_use]
    pub fn baseline_conversion(mut self, percent: f64) -> Self {
        self.input.baseline_conversion = percent;
        self
    }

    #[must_use]
    pub fn expected_lift(mut self, percent: f64) -> Self {
        self.input.expected_lift = percent;
        self
    }

    #[must_use]
    pub fn confidence(mut self, level: ConfidenceLevel) -> Self {
        self.input.confidence = level;
        self
    }

    // =========================================================================
    // Data quality
    // =========================================================================

    #[must_use]
    pub fn control(mut self, profile: QualityProfile) -> Self {
        self.input.control = profile;
        self
    }

    #[must_use]
    pub fn variation(mut self, profile: QualityProfile) -> Self {
        self.input.variation = profile;
        self
    }

    /// Give both groups the same profile
    #[must_use]
    pub fn symmetric(self, profile: QualityProfile) -> Self {
        self.control(profile).variation(profile)
    }

    #[must_use]
    pub fn segmentation_error(mut self, percent: f64) -> Self {
        self.input.segmentation_error = percent;
        self
    }

    #[must_use]
    pub fn timeframe_bias(mut self, percent: f64) -> Self {
        self.input.timeframe_bias = percent;
        self
    }

    /// Return the input without range checks
    #[must_use]
    pub fn build_unchecked(self) -> ExperimentInput {
        self.input
    }

    /// Validate and return the input
    pub fn build(self) -> Result<ExperimentInput, ValidationError> {
        validate(&self.input)?;
        Ok(self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InputField;

    #[test]
    fn test_builder_starts_from_defaults() {
        let input = ExperimentBuilder::new().build().unwrap();
        assert_eq!(input, ExperimentInput::default());
    }

    #[test]
    fn test_builder_sets_fields() {
        let profile = QualityProfile::new(1.0, 2.0, 3.0);
        let input = ExperimentBuilder::new()
            .sample_size(2_000)
            .baseline_conversion(20.0)
            .expected_lift(-10.0)
            .confidence(ConfidenceLevel::Ninety)
            .symmetric(profile)
            .segmentation_error(0.0)
            .timeframe_bias(0.0)
            .build()
            .unwrap();

        assert_eq!(input.sample_size, 2_000);
        assert_eq!(input.expected_lift, -10.0);
        assert_eq!(input.control, profile);
        assert_eq!(input.variation, profile);
        assert_eq!(input.confidence, ConfidenceLevel::Ninety);
    }

    #[test]
    fn test_builder_rejects_invalid_input() {
        let err = ExperimentBuilder::new()
            .variation(QualityProfile::PERFECT.with_id_error(100.0))
            .build()
            .unwrap_err();
        assert_eq!(err.field, InputField::VariationIdError);
    }
}
