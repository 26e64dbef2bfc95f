//! Sensitivity analysis over experiment inputs.
//!
//! Sweeps one or more input fields across a range of values and records a
//! single metric at every grid point:
//!
//! ```ignore
//! use dqcalc_core::analysis::{AnalysisMetric, SweepConfig, SweepParameter, sweep_evaluate};
//! use dqcalc_core::model::{ExperimentInput, InputField};
//!
//! let config = SweepConfig::one_dimensional(
//!     SweepParameter::new(InputField::SampleSize, 1_000.0, 100_000.0, 25),
//!     AnalysisMetric::StatPower,
//! );
//! let results = sweep_evaluate(&ExperimentInput::default(), &config)?;
//! for (users, power) in results.series_1d() {
//!     println!("{users:>8.0} users -> {power:.1}% power");
//! }
//! ```
//!
//! Multi-dimensional sweeps store their values in a row-major `SweepGrid<T>`.

mod config;
mod evaluator;
mod metrics;

pub use config::*;
pub use evaluator::*;
pub use metrics::*;
