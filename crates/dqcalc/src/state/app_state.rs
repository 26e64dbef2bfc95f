use std::path::PathBuf;

use dqcalc_core::{EngineError, ExperimentInput, ExperimentResult, compute};

use super::{FormError, FormState, SensitivityState, TabId};
use crate::data::{ConfigError, DataConfig, DataDirectory};

#[derive(Debug)]
pub struct AppState {
    pub active_tab: TabId,
    pub exit: bool,
    /// Inputs currently shown in the form
    pub input: ExperimentInput,
    /// Inputs restored by reset
    pub defaults: ExperimentInput,
    pub result: Result<ExperimentResult, EngineError>,
    pub form: FormState,
    pub sensitivity: SensitivityState,
    pub data_dir: Option<PathBuf>,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(DataConfig::default(), None)
    }
}

impl AppState {
    pub fn from_config(config: DataConfig, data_dir: Option<PathBuf>) -> Self {
        let mut state = Self {
            active_tab: TabId::default(),
            exit: false,
            result: compute(&config.defaults),
            input: config.defaults.clone(),
            defaults: config.defaults,
            form: FormState::default(),
            sensitivity: SensitivityState {
                metric: config.sweep_metric,
                steps: config.sweep_steps,
                ..Default::default()
            },
            data_dir,
            error_message: None,
            info_message: None,
        };
        state.recompute();
        state
    }

    /// Start from `input` while keeping `defaults` for reset
    pub fn with_input(mut self, input: ExperimentInput) -> Self {
        self.input = input;
        self.recompute();
        self
    }

    /// Re-run the engine and the sensitivity sweep for the current inputs
    pub fn recompute(&mut self) {
        self.result = compute(&self.input);
        match &self.result {
            Ok(result) => tracing::debug!(
                lift = result.actual_lift,
                power = result.stat_power,
                conclusion = result.conclusion.label(),
                "Recomputed metrics"
            ),
            Err(e) => tracing::debug!("Engine rejected inputs: {e}"),
        }
        self.sensitivity.run(&self.input);
    }

    pub fn switch_tab(&mut self, tab: TabId) {
        self.active_tab = tab;
        self.form.cancel_edit();
    }

    pub fn set_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.info_message = None;
        self.error_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.error_message = None;
        self.info_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.info_message = None;
    }

    pub fn reset_to_defaults(&mut self) {
        self.input = self.defaults.clone();
        self.form.cancel_edit();
        self.clear_error();
        self.recompute();
        tracing::info!("Inputs reset to defaults");
    }

    fn apply_form_result(&mut self, outcome: Result<bool, FormError>) {
        match outcome {
            Ok(true) => {
                self.clear_error();
                self.recompute();
            }
            Ok(false) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn step_selected(&mut self, steps: i32) {
        let outcome = self.form.step(&mut self.input, steps);
        self.apply_form_result(outcome);
    }

    pub fn commit_edit(&mut self) {
        let outcome = self.form.commit(&mut self.input);
        self.apply_form_result(outcome);
    }

    /// Rerun only the sweep, after its parameter or metric changed
    pub fn rerun_sweep(&mut self) {
        self.sensitivity.run(&self.input);
    }

    /// Persist the current inputs and sweep settings to config.yaml
    pub fn save_defaults(&mut self) -> Result<(), ConfigError> {
        let Some(data_dir) = &self.data_dir else {
            return Err(ConfigError::Io("No data directory configured".to_string()));
        };

        let config = DataConfig {
            defaults: self.input.clone(),
            sweep_metric: self.sensitivity.metric,
            sweep_steps: self.sensitivity.steps,
        };
        DataDirectory::new(data_dir.clone()).save_config(&config)?;
        self.defaults = self.input.clone();
        tracing::info!(path = %data_dir.display(), "Saved defaults");
        Ok(())
    }
}
