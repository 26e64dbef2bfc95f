//! Interpretation of engine results for display.
//!
//! Pure functions over [`ExperimentInput`] and [`ExperimentResult`]: ratios
//! for progress gauges, qualitative bands and the recommendation list. Nothing
//! here touches the terminal, so it is shared by the TUI and the JSON mode.

use dqcalc_core::{ExperimentInput, ExperimentResult};
use serde::Serialize;

/// How good a value is, independent of any colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Fair,
    Caution,
    Bad,
}

/// A qualitative reading of one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub label: &'static str,
    pub tone: Tone,
}

impl Band {
    const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

/// Fraction of the requested sample that survives data loss
pub fn sample_retention(input: &ExperimentInput, result: &ExperimentResult) -> f64 {
    result.sample_retention(input.sample_size)
}

/// Fraction of the true control conversion that is observed
pub fn conversion_capture(input: &ExperimentInput, result: &ExperimentResult) -> f64 {
    result.control_observed_conversion / input.baseline_conversion
}

/// Gauge ratio and caption comparing reported lift with expected lift
#[derive(Debug, Clone, PartialEq)]
pub struct LiftProgress {
    /// `actual / expected`, clamped to `[0, 1]`
    pub ratio: f64,
    pub text: String,
}

/// `None` when no lift was expected, since there is nothing to compare against.
pub fn lift_progress(expected_lift: f64, actual_lift: f64) -> Option<LiftProgress> {
    if expected_lift == 0.0 {
        return None;
    }

    let raw = actual_lift / expected_lift;
    let percent_text = format!("{}% of expected lift", (raw * 100.0) as i64);

    let text = if expected_lift > 0.0 {
        if actual_lift > 0.0 {
            percent_text
        } else {
            "Negative lift (expected positive)".to_string()
        }
    } else if actual_lift < 0.0 {
        percent_text
    } else {
        "Positive lift (expected negative)".to_string()
    };

    Some(LiftProgress {
        ratio: raw.clamp(0.0, 1.0),
        text,
    })
}

pub fn power_band(stat_power: f64) -> Band {
    if stat_power >= 80.0 {
        Band::new("Sufficient power", Tone::Good)
    } else if stat_power >= 50.0 {
        Band::new("Borderline power", Tone::Caution)
    } else {
        Band::new("Insufficient power", Tone::Bad)
    }
}

pub fn bias_band(bias_risk_score: f64) -> Band {
    if bias_risk_score < 5.0 {
        Band::new("Low risk of bias", Tone::Good)
    } else if bias_risk_score < 10.0 {
        Band::new("Moderate risk of bias", Tone::Caution)
    } else {
        Band::new("High risk of bias", Tone::Bad)
    }
}

pub fn quality_band(quality_score: f64) -> Band {
    if quality_score > 90.0 {
        Band::new("Good", Tone::Good)
    } else if quality_score > 80.0 {
        Band::new("Fair", Tone::Fair)
    } else if quality_score > 70.0 {
        Band::new("Poor", Tone::Caution)
    } else {
        Band::new("Critical", Tone::Bad)
    }
}

pub fn risk_band(risk: f64) -> Band {
    if risk < 5.0 {
        Band::new("Low", Tone::Good)
    } else if risk < 15.0 {
        Band::new("Elevated", Tone::Caution)
    } else {
        Band::new("High", Tone::Bad)
    }
}

/// Follow-up advice, each raised independently of the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    QualityAsymmetry,
    SampleLoss,
    LowPower,
    LiftDiscrepancy,
}

impl Recommendation {
    pub fn headline(self) -> &'static str {
        match self {
            Self::QualityAsymmetry => {
                "Data quality asymmetry detected between control and variation groups."
            }
            Self::SampleLoss => "Significant sample size reduction due to data quality issues.",
            Self::LowPower => "Statistical power is below the recommended threshold (80%).",
            Self::LiftDiscrepancy => "Observed lift differs significantly from expected lift.",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::QualityAsymmetry => {
                "Investigate tracking implementation differences between the groups; \
                 asymmetric data quality is a common source of systematic bias."
            }
            Self::SampleLoss => {
                "Increase the initial sample size or improve data collection to \
                 compensate for lost data points."
            }
            Self::LowPower => {
                "Results may miss true effects. Increase the sample size or improve \
                 data quality to raise power."
            }
            Self::LiftDiscrepancy => {
                "Look for implementation or tracking issues that could cause the gap."
            }
        }
    }
}

pub fn recommendations(input: &ExperimentInput, result: &ExperimentResult) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    if result.bias_risk_score >= 5.0 {
        recs.push(Recommendation::QualityAsymmetry);
    }
    if sample_retention(input, result) < 0.8 {
        recs.push(Recommendation::SampleLoss);
    }
    if result.stat_power < 80.0 {
        recs.push(Recommendation::LowPower);
    }
    if (result.actual_lift - input.expected_lift).abs() > result.detection_threshold {
        recs.push(Recommendation::LiftDiscrepancy);
    }
    recs
}

pub const BEST_PRACTICES: [&str; 7] = [
    "Run A/A tests before important experiments to validate tracking consistency",
    "Monitor data quality metrics in real time throughout the experiment",
    "Segment analysis by platform and browser to find platform-specific tracking issues",
    "Put new tracking code in experimental variants through dedicated QA",
    "Build data quality dashboards to watch trends over time",
    "Document known data limitations when sharing experiment results",
    "Apply correction factors when asymmetric data quality is unavoidable",
];

#[cfg(test)]
mod tests {
    use super::*;
    use dqcalc_core::{ExperimentBuilder, QualityProfile, compute};

    #[test]
    fn test_lift_progress_none_without_expectation() {
        assert_eq!(lift_progress(0.0, 3.0), None);
    }

    #[test]
    fn test_lift_progress_positive_expectation() {
        let p = lift_progress(5.0, 0.670103).unwrap();
        assert_eq!(p.text, "13% of expected lift");
        assert!((p.ratio - 0.134_020_6).abs() < 1e-6);

        let over = lift_progress(5.0, 7.5).unwrap();
        assert_eq!(over.ratio, 1.0);
        assert_eq!(over.text, "150% of expected lift");

        let wrong_way = lift_progress(5.0, -2.0).unwrap();
        assert_eq!(wrong_way.ratio, 0.0);
        assert_eq!(wrong_way.text, "Negative lift (expected positive)");
    }

    #[test]
    fn test_lift_progress_negative_expectation() {
        let p = lift_progress(-10.0, -4.0).unwrap();
        assert!((p.ratio - 0.4).abs() < 1e-12);
        assert_eq!(p.text, "40% of expected lift");

        let wrong_way = lift_progress(-10.0, 2.0).unwrap();
        assert_eq!(wrong_way.ratio, 0.0);
        assert_eq!(wrong_way.text, "Positive lift (expected negative)");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(power_band(80.0).tone, Tone::Good);
        assert_eq!(power_band(79.9).tone, Tone::Caution);
        assert_eq!(power_band(50.0).tone, Tone::Caution);
        assert_eq!(power_band(49.9).tone, Tone::Bad);

        assert_eq!(bias_band(4.9).tone, Tone::Good);
        assert_eq!(bias_band(5.0).tone, Tone::Caution);
        assert_eq!(bias_band(10.0).tone, Tone::Bad);

        // Quality bands are strict
        assert_eq!(quality_band(90.0).tone, Tone::Fair);
        assert_eq!(quality_band(90.5).tone, Tone::Good);
        assert_eq!(quality_band(70.0).tone, Tone::Bad);

        assert_eq!(risk_band(4.9).tone, Tone::Good);
        assert_eq!(risk_band(14.9).tone, Tone::Caution);
        assert_eq!(risk_band(15.0).tone, Tone::Bad);
    }

    #[test]
    fn test_default_recommendations() {
        let input = ExperimentInput::default();
        let result = compute(&input).unwrap();

        // Bias 3 and 94.6% retention raise nothing; power 12.7% does.
        // |0.67 - 5| = 4.33 exceeds the 2.39 threshold.
        assert_eq!(
            recommendations(&input, &result),
            vec![Recommendation::LowPower, Recommendation::LiftDiscrepancy]
        );
        assert!((sample_retention(&input, &result) - 0.945_85).abs() < 1e-9);
        assert!((conversion_capture(&input, &result) - 0.97).abs() < 1e-9);
    }

    #[test]
    fn test_all_recommendations_fire_for_poor_data() {
        let input = ExperimentBuilder::new()
            .variation(QualityProfile::new(30.0, 20.0, 20.0))
            .build()
            .unwrap();
        let result = compute(&input).unwrap();

        assert_eq!(
            recommendations(&input, &result),
            vec![
                Recommendation::QualityAsymmetry,
                Recommendation::SampleLoss,
                Recommendation::LowPower,
                Recommendation::LiftDiscrepancy,
            ]
        );
    }

    #[test]
    fn test_clean_large_experiment_has_no_recommendations() {
        let input = ExperimentBuilder::new()
            .sample_size(1_000_000)
            .symmetric(QualityProfile::PERFECT)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();
        assert!(recommendations(&input, &result).is_empty());
    }
}
