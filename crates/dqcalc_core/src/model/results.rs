//! Engine output types

use serde::{Deserialize, Serialize};

use super::conclusion::Conclusion;

/// Error rates visited by the sweep curve, in ascending order
pub const CURVE_ERROR_RATES: [u32; 11] = [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20];

/// One point of the error-rate vs. observed-lift curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Swept error rate (%)
    pub error_rate: u32,
    /// Lift the variation truly has (%), constant along the curve
    pub true_lift: f64,
    /// Lift that would be reported at this error rate (%)
    pub observed_lift: f64,
    /// Whether `|observed_lift|` clears the detection threshold
    pub is_significant: bool,
}

/// Everything derived from one `ExperimentInput`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Users left after attrition, both groups combined
    pub effective_sample_size: f64,
    pub control_observed_conversion: f64,
    pub variation_observed_conversion: f64,
    /// Reported relative lift between observed rates (%)
    pub actual_lift: f64,
    /// Absolute difference between the two quality scores
    pub bias_risk_score: f64,
    /// Estimated probability of detecting the expected effect (%)
    pub stat_power: f64,
    pub false_positive_risk: f64,
    pub false_negative_risk: f64,
    /// Minimum lift distinguishable from noise (%)
    pub detection_threshold: f64,
    pub conclusion: Conclusion,
    pub control_quality_score: f64,
    pub variation_quality_score: f64,
    /// Variation total error minus control total error
    pub quality_delta: f64,
    /// Two-sided critical value for the chosen confidence
    pub z_critical: f64,
    pub pooled_standard_error: f64,
    pub curve: Vec<CurvePoint>,
}

impl ExperimentResult {
    /// Fraction of the original sample still usable (0-1)
    #[must_use]
    pub fn sample_retention(&self, sample_size: u64) -> f64 {
        self.effective_sample_size / sample_size as f64
    }

    /// Number of curve points that remain significant
    #[must_use]
    pub fn significant_points(&self) -> usize {
        self.curve.iter().filter(|p| p.is_significant).count()
    }
}
