//! Sweep evaluator - runs the engine over every grid point.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::compute;
use crate::error::{AnalysisError, EngineError};
use crate::model::ExperimentInput;

use super::{AnalysisMetric, SweepConfig, SweepGrid};

/// Metric values over an N-dimensional sweep grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResults {
    /// Values for each parameter dimension
    pub param_values: Vec<Vec<f64>>,
    pub param_labels: Vec<String>,
    pub metric: AnalysisMetric,
    /// `None` where the point's input was invalid or its metrics undefined
    pub values: SweepGrid<Option<f64>>,
}

impl SweepResults {
    pub fn ndim(&self) -> usize {
        self.param_values.len()
    }

    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        self.values.get(indices).copied().flatten()
    }

    /// Number of grid points that failed to evaluate
    pub fn failed_points(&self) -> usize {
        self.values.data().iter().filter(|v| v.is_none()).count()
    }

    /// `(parameter value, metric value)` pairs along the first dimension.
    ///
    /// Only meaningful for 1-D sweeps; failed points are skipped.
    pub fn series_1d(&self) -> Vec<(f64, f64)> {
        let Some(xs) = self.param_values.first() else {
            return Vec::new();
        };
        xs.iter()
            .zip(self.values.data())
            .filter_map(|(&x, y)| y.map(|y| (x, y)))
            .collect()
    }
}

/// Build the input for one grid point
fn point_input(
    base: &ExperimentInput,
    config: &SweepConfig,
    param_values: &[Vec<f64>],
    indices: &[usize],
) -> Result<ExperimentInput, EngineError> {
    let mut input = base.clone();
    for (dim, &idx) in indices.iter().enumerate() {
        let field = config.parameters[dim].field;
        field.set_value(&mut input, param_values[dim][idx])?;
    }
    Ok(input)
}

fn evaluate_point(
    base: &ExperimentInput,
    config: &SweepConfig,
    param_values: &[Vec<f64>],
    indices: &[usize],
) -> Option<f64> {
    let input = point_input(base, config, param_values, indices).ok()?;
    compute(&input)
        .ok()
        .map(|result| config.metric.extract(&result))
}

/// Evaluate `config.metric` at every point of the sweep grid around `base`.
///
/// Points are independent, so they run in parallel when the `parallel`
/// feature is enabled. Results are identical either way.
pub fn sweep_evaluate(
    base: &ExperimentInput,
    config: &SweepConfig,
) -> Result<SweepResults, AnalysisError> {
    config.check()?;

    let param_values = config.all_sweep_values();
    let shape = config.grid_shape();
    let all_indices: Vec<Vec<usize>> = SweepGrid::new(shape.clone(), ()).indices().collect();

    #[cfg(feature = "parallel")]
    let data: Vec<Option<f64>> = all_indices
        .par_iter()
        .map(|indices| evaluate_point(base, config, &param_values, indices))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let data: Vec<Option<f64>> = all_indices
        .iter()
        .map(|indices| evaluate_point(base, config, &param_values, indices))
        .collect();

    let values = SweepGrid::from_data(shape, data).ok_or(AnalysisError::NoParameters)?;

    Ok(SweepResults {
        param_values,
        param_labels: config.labels(),
        metric: config.metric,
        values,
    })
}
