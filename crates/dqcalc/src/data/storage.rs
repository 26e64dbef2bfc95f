//! Data directory layout:
//!
//! ```text
//! ~/.dqcalc/
//!   config.yaml   # default experiment, sensitivity preferences
//!   dqcalc.log    # rotated application log
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use dqcalc_core::ExperimentInput;
use dqcalc_core::analysis::AnalysisMetric;

/// Points in a sensitivity sweep unless config.yaml says otherwise
pub const DEFAULT_SWEEP_STEPS: usize = 21;

fn default_sweep_steps() -> usize {
    DEFAULT_SWEEP_STEPS
}

fn default_sweep_metric() -> AnalysisMetric {
    AnalysisMetric::StatPower
}

/// Configuration stored in config.yaml
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataConfig {
    /// Experiment loaded on startup and restored by reset
    #[serde(default)]
    pub defaults: ExperimentInput,

    #[serde(default = "default_sweep_metric")]
    pub sweep_metric: AnalysisMetric,

    #[serde(default = "default_sweep_steps")]
    pub sweep_steps: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            defaults: ExperimentInput::default(),
            sweep_metric: default_sweep_metric(),
            sweep_steps: DEFAULT_SWEEP_STEPS,
        }
    }
}

/// Error types for configuration file operations
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read an experiment from a YAML file
pub fn load_input_file(path: &Path) -> Result<ExperimentInput, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_saphyr::from_str(&content)
        .map_err(|e| ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Manages the data directory
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.dqcalc/)
    #[cfg(feature = "native")]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dqcalc")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Load config.yaml. A missing file yields the built-in defaults.
    pub fn load_config(&self) -> Result<DataConfig, ConfigError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(DataConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Write config.yaml, creating the directory if needed
    pub fn save_config(&self, config: &DataConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| ConfigError::Io(format!("Failed to create data directory: {}", e)))?;

        let yaml = serde_saphyr::to_string(config)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize config: {}", e)))?;

        fs::write(self.config_path(), yaml)
            .map_err(|e| ConfigError::Io(format!("Failed to write config: {}", e)))
    }
}
