//! Normal-approximation helpers for the two-proportion z-test.
//!
//! Rates and standard errors stay on the 0-100 percentage scale used by the
//! rest of the engine, so thresholds compare directly against lifts.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::model::ConfidenceLevel;

fn standard_normal() -> Normal {
    Normal::standard()
}

/// Two-sided critical value `Φ⁻¹(1 - alpha/2)`
#[must_use]
pub fn z_critical(confidence: ConfidenceLevel) -> f64 {
    let alpha = confidence.alpha();
    standard_normal().inverse_cdf(1.0 - alpha / 2.0)
}

/// Standard normal CDF
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    standard_normal().cdf(x)
}

/// `sqrt(rate * (100 - rate) / n)` with `rate` in percent.
///
/// Returns NaN when `rate` is above 100; callers check finiteness.
#[must_use]
pub fn standard_error(rate: f64, n: f64) -> f64 {
    (rate * (100.0 - rate) / n).sqrt()
}

/// Combined standard error of two independent groups
#[must_use]
pub fn pooled_standard_error(se_a: f64, se_b: f64) -> f64 {
    (se_a.powi(2) + se_b.powi(2)).sqrt()
}

/// Power (%) of detecting `expected_effect` given the pooled error
#[must_use]
pub fn power(expected_effect: f64, pooled_se: f64, z_alpha: f64) -> f64 {
    let z_score = expected_effect / pooled_se;
    normal_cdf(z_score - z_alpha) * 100.0
}

/// Minimum detectable effect: `z_alpha * pooled_se * 2`
#[must_use]
pub fn detection_threshold(z_alpha: f64, pooled_se: f64) -> f64 {
    z_alpha * pooled_se * 2.0
}
