//! Conclusion labels and the ordered rules that select them

use serde::{Deserialize, Serialize};

/// Presentation class attached to a conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Danger,
    Info,
    Success,
}

impl Severity {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

/// Categorical verdict on an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    LikelyFalseNegative,
    PotentialFalsePositive,
    Inconclusive,
    LikelyValid,
    RequiresInvestigation,
}

impl Conclusion {
    pub const ALL: [Conclusion; 5] = [
        Conclusion::LikelyFalseNegative,
        Conclusion::PotentialFalsePositive,
        Conclusion::Inconclusive,
        Conclusion::LikelyValid,
        Conclusion::RequiresInvestigation,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Conclusion::LikelyFalseNegative => "Likely false negative",
            Conclusion::PotentialFalsePositive => "Potential false positive",
            Conclusion::Inconclusive => "Inconclusive",
            Conclusion::LikelyValid => "Likely valid result",
            Conclusion::RequiresInvestigation => "Requires investigation",
        }
    }

    #[must_use]
    pub fn detail(self) -> &'static str {
        match self {
            Conclusion::LikelyFalseNegative => {
                "true effect is being diluted by data quality issues"
            }
            Conclusion::PotentialFalsePositive => "observed lift is artificially inflated",
            Conclusion::Inconclusive => "effect size is below detection threshold",
            Conclusion::LikelyValid => "observed lift matches expected",
            Conclusion::RequiresInvestigation => "unexpected results",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Conclusion::LikelyFalseNegative => Severity::Warning,
            Conclusion::PotentialFalsePositive => Severity::Danger,
            Conclusion::Inconclusive => Severity::Info,
            Conclusion::LikelyValid => Severity::Success,
            Conclusion::RequiresInvestigation => Severity::Warning,
        }
    }
}

/// Quantities the conclusion rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionInputs {
    pub reported_lift: f64,
    pub expected_lift: f64,
    pub quality_delta: f64,
    pub detection_threshold: f64,
}

/// A conclusion together with the condition that selects it
pub struct ConclusionRule {
    pub conclusion: Conclusion,
    pub applies: fn(&DecisionInputs) -> bool,
}

/// Rules in priority order. The first one whose condition holds wins.
pub const CONCLUSION_RULES: [ConclusionRule; 4] = [
    ConclusionRule {
        conclusion: Conclusion::LikelyFalseNegative,
        applies: |d| {
            d.reported_lift > 0.0 && d.reported_lift < d.expected_lift && d.quality_delta > 5.0
        },
    },
    ConclusionRule {
        conclusion: Conclusion::PotentialFalsePositive,
        applies: |d| d.reported_lift > d.expected_lift && d.quality_delta < -5.0,
    },
    ConclusionRule {
        conclusion: Conclusion::Inconclusive,
        applies: |d| d.reported_lift.abs() < d.detection_threshold,
    },
    ConclusionRule {
        conclusion: Conclusion::LikelyValid,
        applies: |d| (d.reported_lift - d.expected_lift).abs() < d.detection_threshold / 2.0,
    },
];

/// Selected when no rule applies
pub const FALLBACK_CONCLUSION: Conclusion = Conclusion::RequiresInvestigation;

/// Evaluate `CONCLUSION_RULES` in order
#[must_use]
pub fn classify(inputs: &DecisionInputs) -> Conclusion {
    CONCLUSION_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map_or(FALLBACK_CONCLUSION, |rule| rule.conclusion)
}

/// Every conclusion whose rule holds, in priority order. Only the first is
/// reported; the rest explain which lower-priority verdicts were shadowed.
#[must_use]
pub fn matching_conclusions(inputs: &DecisionInputs) -> Vec<Conclusion> {
    let mut matches: Vec<Conclusion> = CONCLUSION_RULES
        .iter()
        .filter(|rule| (rule.applies)(inputs))
        .map(|rule| rule.conclusion)
        .collect();
    if matches.is_empty() {
        matches.push(FALLBACK_CONCLUSION);
    }
    matches
}
