//! On-disk configuration for the calculator.

pub mod storage;

pub use storage::{ConfigError, DataConfig, DataDirectory, load_input_file};
