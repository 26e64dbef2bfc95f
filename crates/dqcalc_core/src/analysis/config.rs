//! Configuration types for sensitivity sweeps.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::InputField;

use super::AnalysisMetric;

/// N-dimensional grid storage with flat backing array and stride-based indexing.
///
/// Stores values in row-major order where the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T: Clone> SweepGrid<T> {
    /// Create a new grid with the given shape, filled with `default`.
    pub fn new(shape: Vec<usize>, default: T) -> Self {
        let total_size: usize = shape.iter().product();
        let strides = compute_strides(&shape);
        Self {
            data: vec![default; total_size],
            shape,
            strides,
        }
    }
}

impl<T> SweepGrid<T> {
    /// Create a grid from row-major data. `None` if the sizes disagree.
    pub fn from_data(shape: Vec<usize>, data: Vec<T>) -> Option<Self> {
        let total_size: usize = shape.iter().product();
        if data.len() != total_size {
            return None;
        }
        let strides = compute_strides(&shape);
        Some(Self {
            data,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert multi-dimensional indices to a flat index
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (i, (&idx, &size)) in indices.iter().zip(&self.shape).enumerate() {
            if idx >= size {
                return None;
            }
            flat += idx * self.strides[i];
        }
        Some(flat)
    }

    /// Convert a flat index back to multi-dimensional indices
    pub fn multi_index(&self, flat: usize) -> Option<Vec<usize>> {
        if flat >= self.data.len() {
            return None;
        }
        let mut remaining = flat;
        Some(
            self.strides
                .iter()
                .map(|&stride| {
                    let idx = remaining / stride;
                    remaining %= stride;
                    idx
                })
                .collect(),
        )
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.flat_index(indices).map(|i| &self.data[i])
    }

    pub fn set(&mut self, indices: &[usize], value: T) -> bool {
        match self.flat_index(indices) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Iterate over all indices in row-major order
    pub fn indices(&self) -> GridIndices {
        GridIndices {
            shape: self.shape.clone(),
            current: vec![0; self.shape.len()],
            done: self.data.is_empty(),
        }
    }
}

/// Compute strides for row-major order
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return Vec::new();
    }
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Iterator over all indices in a grid
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current.clone();

        // last dimension varies fastest
        for i in (0..self.shape.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                break;
            }
            self.current[i] = 0;
            if i == 0 {
                self.done = true;
            }
        }

        if self.shape.is_empty() {
            self.done = true;
        }

        Some(result)
    }
}

/// One swept input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameter {
    pub field: InputField,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of points in the sweep
    pub step_count: usize,
}

impl SweepParameter {
    #[must_use]
    pub fn new(field: InputField, min_value: f64, max_value: f64, step_count: usize) -> Self {
        Self {
            field,
            min_value,
            max_value,
            step_count,
        }
    }

    /// Evenly spaced values from `min_value` to `max_value` inclusive
    #[must_use]
    pub fn sweep_values(&self) -> Vec<f64> {
        if self.step_count <= 1 {
            return vec![self.min_value];
        }
        let step_size = (self.max_value - self.min_value) / (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| self.min_value + step_size * i as f64)
            .collect()
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.field.label()
    }
}

/// Configuration for a sensitivity sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Swept fields, one grid dimension each
    pub parameters: Vec<SweepParameter>,
    pub metric: AnalysisMetric,
}

impl SweepConfig {
    /// Single-parameter sweep
    #[must_use]
    pub fn one_dimensional(parameter: SweepParameter, metric: AnalysisMetric) -> Self {
        Self {
            parameters: vec![parameter],
            metric,
        }
    }

    pub fn ndim(&self) -> usize {
        self.parameters.len()
    }

    pub fn total_points(&self) -> usize {
        self.parameters.iter().map(|p| p.step_count).product()
    }

    pub fn grid_shape(&self) -> Vec<usize> {
        self.parameters.iter().map(|p| p.step_count).collect()
    }

    pub fn all_sweep_values(&self) -> Vec<Vec<f64>> {
        self.parameters.iter().map(SweepParameter::sweep_values).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.label().to_string()).collect()
    }

    /// Reject empty sweeps, zero-step parameters and categorical fields
    pub fn check(&self) -> Result<(), AnalysisError> {
        if self.parameters.is_empty() {
            return Err(AnalysisError::NoParameters);
        }
        for param in &self.parameters {
            if param.field == InputField::Confidence {
                return Err(AnalysisError::UnsweepableField(param.field));
            }
            if param.step_count == 0 {
                return Err(AnalysisError::ZeroSteps { field: param.field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing_round_trips() {
        let grid = SweepGrid::new(vec![2, 3], 0u8);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.flat_index(&[1, 2]), Some(5));
        assert_eq!(grid.multi_index(4), Some(vec![1, 1]));
        assert_eq!(grid.flat_index(&[2, 0]), None);

        let all: Vec<Vec<usize>> = grid.indices().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec![0, 0]);
        assert_eq!(all[1], vec![0, 1]);
        assert_eq!(all[5], vec![1, 2]);
    }

    #[test]
    fn test_grid_from_data_checks_size() {
        assert!(SweepGrid::from_data(vec![2, 2], vec![1, 2, 3]).is_none());
        let grid = SweepGrid::from_data(vec![2, 2], vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.get(&[1, 0]), Some(&3));
    }

    #[test]
    fn test_sweep_values_are_inclusive() {
        let param = SweepParameter::new(InputField::VariationEventLoss, 0.0, 20.0, 5);
        assert_eq!(param.sweep_values(), vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let single = SweepParameter::new(InputField::VariationEventLoss, 3.0, 20.0, 1);
        assert_eq!(single.sweep_values(), vec![3.0]);
    }

    #[test]
    fn test_config_check() {
        let metric = AnalysisMetric::StatPower;
        let empty = SweepConfig {
            parameters: vec![],
            metric,
        };
        assert_eq!(empty.check(), Err(AnalysisError::NoParameters));

        let confidence = SweepConfig::one_dimensional(
            SweepParameter::new(InputField::Confidence, 90.0, 99.0, 3),
            metric,
        );
        assert_eq!(
            confidence.check(),
            Err(AnalysisError::UnsweepableField(InputField::Confidence))
        );

        let zero = SweepConfig::one_dimensional(
            SweepParameter::new(InputField::SampleSize, 1_000.0, 2_000.0, 0),
            metric,
        );
        assert_eq!(
            zero.check(),
            Err(AnalysisError::ZeroSteps {
                field: InputField::SampleSize
            })
        );
    }
}
