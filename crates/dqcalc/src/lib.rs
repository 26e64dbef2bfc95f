//! Terminal front end for the data quality impact calculator
//!
//! Wraps [`dqcalc_core`] in a ratatui interface: an input form with live
//! metrics, a sensitivity sweep view, and a guide. The non-terminal parts
//! (interpretation, config storage, JSON reports) build without the
//! `native` feature.

// ============================================================================
// Presentation logic
// ============================================================================

pub mod data;
pub mod headless;
pub mod insights;
pub mod logging;
pub mod state;
pub mod util;

// ============================================================================
// Terminal UI
// ============================================================================

#[cfg(feature = "native")]
pub mod app;
#[cfg(feature = "native")]
pub mod components;
#[cfg(feature = "native")]
pub mod screens;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

#[cfg(feature = "native")]
pub use app::App;
pub use logging::init_logging;
