//! Metrics that can be read off an engine result.

use serde::{Deserialize, Serialize};

use crate::model::ExperimentResult;

/// A scalar extracted from each sweep point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisMetric {
    ActualLift,
    StatPower,
    DetectionThreshold,
    EffectiveSampleSize,
    BiasRisk,
    FalsePositiveRisk,
    FalseNegativeRisk,
}

impl AnalysisMetric {
    pub const ALL: [AnalysisMetric; 7] = [
        AnalysisMetric::StatPower,
        AnalysisMetric::ActualLift,
        AnalysisMetric::DetectionThreshold,
        AnalysisMetric::EffectiveSampleSize,
        AnalysisMetric::BiasRisk,
        AnalysisMetric::FalsePositiveRisk,
        AnalysisMetric::FalseNegativeRisk,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ActualLift => "Actual Lift (%)",
            Self::StatPower => "Statistical Power (%)",
            Self::DetectionThreshold => "Detection Threshold (%)",
            Self::EffectiveSampleSize => "Effective Sample Size",
            Self::BiasRisk => "Bias Risk Score",
            Self::FalsePositiveRisk => "False Positive Risk",
            Self::FalseNegativeRisk => "False Negative Risk",
        }
    }

    /// Short label suitable for chart axes
    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Self::ActualLift => "Lift %",
            Self::StatPower => "Power %",
            Self::DetectionThreshold => "MDE %",
            Self::EffectiveSampleSize => "Users",
            Self::BiasRisk => "Bias",
            Self::FalsePositiveRisk => "FP Risk",
            Self::FalseNegativeRisk => "FN Risk",
        }
    }

    #[must_use]
    pub fn extract(self, result: &ExperimentResult) -> f64 {
        match self {
            Self::ActualLift => result.actual_lift,
            Self::StatPower => result.stat_power,
            Self::DetectionThreshold => result.detection_threshold,
            Self::EffectiveSampleSize => result.effective_sample_size,
            Self::BiasRisk => result.bias_risk_score,
            Self::FalsePositiveRisk => result.false_positive_risk,
            Self::FalseNegativeRisk => result.false_negative_risk,
        }
    }

    /// Next metric in `ALL`, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
