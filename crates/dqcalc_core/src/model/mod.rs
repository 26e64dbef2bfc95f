mod conclusion;
mod input;
mod results;

pub use conclusion::{
    CONCLUSION_RULES, Conclusion, ConclusionRule, DecisionInputs, FALLBACK_CONCLUSION, Severity,
    classify, matching_conclusions,
};
pub use input::{ConfidenceLevel, ExperimentInput, InputField, QualityProfile};
pub use results::{CURVE_ERROR_RATES, CurvePoint, ExperimentResult};
