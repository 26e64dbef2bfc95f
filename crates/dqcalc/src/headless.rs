//! `--json` mode: compute once and report without a terminal UI.

use std::path::Path;

use dqcalc_core::{ExperimentInput, ExperimentResult, compute};
use serde::Serialize;

use crate::data::{ConfigError, DataDirectory, load_input_file};
use crate::insights::{self, Recommendation};

/// Everything printed by `--json`
#[derive(Debug, Serialize)]
pub struct Report {
    pub input: ExperimentInput,
    pub result: ExperimentResult,
    pub recommendations: Vec<Recommendation>,
}

/// The experiment to start from: `--input` if given, else config.yaml defaults.
pub fn load_start_input(data_dir: &Path, input: Option<&Path>) -> Result<ExperimentInput, ConfigError> {
    match input {
        Some(path) => load_input_file(path),
        None => Ok(DataDirectory::new(data_dir.to_path_buf())
            .load_config()?
            .defaults),
    }
}

pub fn build_report(input: &ExperimentInput) -> dqcalc_core::error::Result<Report> {
    let result = compute(input)?;
    let recommendations = insights::recommendations(input, &result);
    Ok(Report {
        input: input.clone(),
        result,
        recommendations,
    })
}

/// Pretty JSON for `input`. Engine failures become errors so the process
/// exits non-zero.
pub fn result_json(input: &ExperimentInput) -> color_eyre::Result<String> {
    let report = build_report(input)?;
    tracing::info!(
        conclusion = report.result.conclusion.label(),
        "Computed headless report"
    );
    Ok(serde_json::to_string_pretty(&report)?)
}
