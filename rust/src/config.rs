//! Configuration types for the optimizer.

use pyo3::prelude::*;

use crate::graph::StageGraph;
use crate::optimizer::OptimizerError;

/// Number of strategies reported when the caller does not ask for a count.
pub const DEFAULT_MAX_LABELS_PER_VERTEX: usize = 10;

/// Configuration for the K-best optimizer.
#[pyclass]
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// K: how many labels each vertex keeps, and so the most strategies returned.
    #[pyo3(get, set)]
    pub max_labels_per_vertex: usize,
    /// Gems held at the goal vertex. None = the largest requirement of any stage.
    #[pyo3(get, set)]
    pub max_required_gems: Option<i64>,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_labels_per_vertex: DEFAULT_MAX_LABELS_PER_VERTEX,
            max_required_gems: None,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl OptimizerConfig {
    #[new]
    #[pyo3(signature = (max_labels_per_vertex=DEFAULT_MAX_LABELS_PER_VERTEX, max_required_gems=None, verbosity=0))]
    fn new(max_labels_per_vertex: usize, max_required_gems: Option<i64>, verbosity: u8) -> Self {
        Self {
            max_labels_per_vertex,
            max_required_gems,
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "OptimizerConfig(max_labels_per_vertex={}, max_required_gems={:?}, verbosity={})",
            self.max_labels_per_vertex, self.max_required_gems, self.verbosity
        )
    }
}

impl OptimizerConfig {
    /// Check parameters that do not depend on the stage graph.
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.max_labels_per_vertex < 1 {
            return Err(OptimizerError::InvalidParameters(
                "max_labels_per_vertex must be at least 1".to_string(),
            ));
        }
        if let Some(gems) = self.max_required_gems {
            if gems < 0 {
                return Err(OptimizerError::InvalidParameters(format!(
                    "max_required_gems must not be negative, got {}",
                    gems
                )));
            }
            if gems > i64::from(u32::MAX) {
                return Err(OptimizerError::InvalidParameters(format!(
                    "max_required_gems {} is too large",
                    gems
                )));
            }
        }
        Ok(())
    }

    /// Gem count of the goal vertex for `graph`.
    ///
    /// Must cover every stage's requirement, otherwise some stage could never be entered.
    pub fn resolve_max_gems(&self, graph: &StageGraph) -> Result<u32, OptimizerError> {
        self.validate()?;
        let needed = graph.max_required_gems();
        let Some(gems) = self.max_required_gems else {
            return Ok(needed);
        };
        // validate() bounds the value to u32
        let gems = gems as u32;
        if gems < needed {
            return Err(OptimizerError::InvalidParameters(format!(
                "max_required_gems {} is below the largest stage requirement {}",
                gems, needed
            )));
        }
        Ok(gems)
    }
}
