//! Experiment configuration
//!
//! `ExperimentInput` itself lives in [`crate::model`]; this module adds a
//! fluent builder for assembling one in code.
//!
//! ```ignore
//! use dqcalc_core::config::ExperimentBuilder;
//! use dqcalc_core::model::{ConfidenceLevel, QualityProfile};
//!
//! let input = ExperimentBuilder::new()
//!     .sample_size(50_000)
//!     .baseline_conversion(4.2)
//!     .expected_lift(8.0)
//!     .confidence(ConfidenceLevel::NinetyNine)
//!     .control(QualityProfile::new(1.0, 0.5, 2.0))
//!     .variation(QualityProfile::new(3.0, 0.5, 6.0))
//!     .build()?;
//! ```

pub mod builder;

pub use builder::ExperimentBuilder;
