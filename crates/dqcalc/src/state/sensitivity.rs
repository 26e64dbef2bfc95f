use dqcalc_core::analysis::{
    AnalysisMetric, SweepConfig, SweepParameter, SweepResults, sweep_evaluate,
};
use dqcalc_core::{AnalysisError, ExperimentInput, InputField};

use super::form::{FORM_FIELDS, FieldSpec};
use crate::data::storage::DEFAULT_SWEEP_STEPS;

/// Form fields that can be swept; confidence is categorical
pub fn sweepable_specs() -> impl Iterator<Item = &'static FieldSpec> {
    FORM_FIELDS
        .iter()
        .filter(|spec| spec.field != InputField::Confidence)
}

#[derive(Debug)]
pub struct SensitivityState {
    /// Index into [`sweepable_specs`]
    pub param_index: usize,
    pub metric: AnalysisMetric,
    pub steps: usize,
    pub results: Option<Result<SweepResults, AnalysisError>>,
}

impl Default for SensitivityState {
    fn default() -> Self {
        Self {
            param_index: 0,
            metric: AnalysisMetric::StatPower,
            steps: DEFAULT_SWEEP_STEPS,
            results: None,
        }
    }
}

impl SensitivityState {
    pub fn selected_spec(&self) -> &'static FieldSpec {
        let count = sweepable_specs().count();
        sweepable_specs()
            .nth(self.param_index % count)
            .unwrap_or(&FORM_FIELDS[0])
    }

    pub fn next_param(&mut self) {
        self.param_index = (self.param_index + 1) % sweepable_specs().count();
    }

    pub fn prev_param(&mut self) {
        let count = sweepable_specs().count();
        self.param_index = (self.param_index + count - 1) % count;
    }

    pub fn next_metric(&mut self) {
        self.metric = self.metric.next();
    }

    /// Sweep the selected field over its whole form range
    pub fn config(&self) -> SweepConfig {
        let spec = self.selected_spec();
        SweepConfig::one_dimensional(
            SweepParameter::new(spec.field, spec.min, spec.max, self.steps),
            self.metric,
        )
    }

    pub fn run(&mut self, base: &ExperimentInput) {
        let config = self.config();
        let results = sweep_evaluate(base, &config);
        match &results {
            Ok(r) => tracing::debug!(
                field = config.parameters[0].field.path(),
                metric = ?self.metric,
                failed = r.failed_points(),
                "Sensitivity sweep complete"
            ),
            Err(e) => tracing::warn!("Sensitivity sweep rejected: {e}"),
        }
        self.results = Some(results);
    }
}
