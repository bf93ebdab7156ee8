//! Rust implementation of the speedrun strategy optimizer.
//!
//! Given stages in play order, the gems each one requires and yields, and the
//! moves between them, finds the K fastest ways to clear the last stage while
//! holding exactly the goal gem count. It can also derive the candidate moves
//! for a stage set from each stage's unlock list. Loading and writing the
//! tabular stage files stays in the Python host.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod config;
pub mod graph;
mod interner;
pub mod logging;
mod models;
pub mod optimizer;
pub mod ranking;
pub mod unlocks;

pub use config::{OptimizerConfig, DEFAULT_MAX_LABELS_PER_VERTEX};
pub use graph::{GraphError, StageGraph, StageNode};
pub use interner::{StageId, StageIndex};
pub use models::{Move, PathStep, SolveResult, Stage, StageKey, Strategy};
pub use optimizer::{solve_strategies, Optimizer, OptimizerError, SolveStats, Vertex};
pub use ranking::{rank_strategies, RankedStrategy, RANK_TIME_EPSILON};
pub use unlocks::move_candidates;

fn run(py: Python<'_>, stages: Vec<Stage>, config: OptimizerConfig) -> PyResult<SolveResult> {
    py.allow_threads(|| solve_strategies(&stages, &config))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Find the fastest strategies through the given stages.
///
/// # Arguments
/// * `stages` - Stages in any order; play order is taken from (episode, page)
/// * `max_labels_per_vertex` - Number of strategies wanted (K)
/// * `max_required_gems` - Gems held at the goal (default: largest stage requirement)
/// * `verbosity` - 0=silent, 1=changes, 2=checks, 3=debug (written to stderr)
///
/// # Returns
/// * SolveResult with strategies in ascending total time
///
/// # Raises
/// * ValueError for invalid parameters, a malformed stage graph, or an unreachable goal
#[pyfunction]
#[pyo3(signature = (stages, max_labels_per_vertex=DEFAULT_MAX_LABELS_PER_VERTEX, max_required_gems=None, verbosity=0))]
fn solve(
    py: Python<'_>,
    stages: Vec<Stage>,
    max_labels_per_vertex: usize,
    max_required_gems: Option<i64>,
    verbosity: u8,
) -> PyResult<SolveResult> {
    let config = OptimizerConfig {
        max_labels_per_vertex,
        max_required_gems,
        verbosity,
    };
    run(py, stages, config)
}

/// Same as `solve`, taking an OptimizerConfig.
#[pyfunction]
fn solve_with_config(
    py: Python<'_>,
    stages: Vec<Stage>,
    config: OptimizerConfig,
) -> PyResult<SolveResult> {
    run(py, stages, config)
}

/// Attach display ranks, time differences and route strings to strategies.
///
/// Strategies must already be in ascending total time, as `solve` returns them.
#[pyfunction]
#[pyo3(name = "rank_strategies")]
fn py_rank_strategies(strategies: Vec<Strategy>) -> Vec<RankedStrategy> {
    rank_strategies(&strategies)
}

/// List the (from, to) stage pairs a moves table needs, from the stages' unlock lists.
///
/// # Raises
/// * ValueError for duplicate stages or unlocks, or unlocks of unknown or earlier stages
#[pyfunction]
#[pyo3(name = "move_candidates")]
fn py_move_candidates(stages: Vec<Stage>) -> PyResult<Vec<(StageKey, StageKey)>> {
    move_candidates(&stages).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The speedrun_dp.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Move>()?;
    m.add_class::<Stage>()?;
    m.add_class::<PathStep>()?;
    m.add_class::<Strategy>()?;
    m.add_class::<SolveResult>()?;
    m.add_class::<RankedStrategy>()?;

    // Config types
    m.add_class::<OptimizerConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(solve_with_config, m)?)?;
    m.add_function(wrap_pyfunction!(py_rank_strategies, m)?)?;
    m.add_function(wrap_pyfunction!(py_move_candidates, m)?)?;

    Ok(())
}
