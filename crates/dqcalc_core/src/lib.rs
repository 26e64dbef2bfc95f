//! Data quality impact engine
//!
//! Estimates how measurement defects distort a two-group (control vs.
//! variation) conversion experiment. Given the experiment parameters and
//! per-group error rates, the engine derives:
//! - Effective sample size after event loss and identity errors
//! - Observed conversion rates and the reported (distorted) lift
//! - Quality scores and a bias-risk score
//! - Approximate statistical power and minimum detectable effect
//! - False-positive / false-negative risk heuristics and a conclusion label
//! - The error-rate vs. observed-lift curve
//!
//! ```ignore
//! use dqcalc_core::{ExperimentInput, compute};
//!
//! let result = compute(&ExperimentInput::default())?;
//! println!("{}: lift {:.2}%", result.conclusion.label(), result.actual_lift);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod engine;
pub mod error;
pub mod stats;
pub mod validation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::ExperimentBuilder;
pub use engine::compute;
pub use error::{AnalysisError, ArithmeticError, EngineError, ValidationError};
pub use model::{
    ConfidenceLevel, Conclusion, CurvePoint, ExperimentInput, ExperimentResult, InputField,
    QualityProfile, Severity,
};
