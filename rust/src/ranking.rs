//! Display ranking for solved strategies.
//!
//! Strategies whose times differ by no more than `RANK_TIME_EPSILON` from the
//! previous one share its rank; otherwise the rank jumps to the strategy's
//! 1-based position (competition ranking: 1, 1, 3, ...).

use pyo3::prelude::*;

use crate::models::Strategy;

/// Time gap below which two consecutive strategies count as tied.
pub const RANK_TIME_EPSILON: f64 = 0.0009;

/// A strategy prepared for output.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RankedStrategy {
    #[pyo3(get)]
    pub rank: usize,
    /// Time behind the previous strategy (0 for the first).
    #[pyo3(get)]
    pub time_difference: f64,
    #[pyo3(get)]
    pub total_time: f64,
    #[pyo3(get)]
    pub route: String,
}

#[pymethods]
impl RankedStrategy {
    fn __repr__(&self) -> String {
        format!(
            "RankedStrategy(rank={}, time_difference={:.2}, total_time={:.2}, route={:?})",
            self.rank, self.time_difference, self.total_time, self.route
        )
    }
}

/// Rank strategies that are already sorted by ascending total time.
pub fn rank_strategies(strategies: &[Strategy]) -> Vec<RankedStrategy> {
    let Some(first) = strategies.first() else {
        return Vec::new();
    };

    let mut ranked = Vec::with_capacity(strategies.len());
    let mut previous_time = first.total_time;
    let mut rank = 1;

    for (index, strategy) in strategies.iter().enumerate() {
        let time_difference = strategy.total_time - previous_time;
        if time_difference > RANK_TIME_EPSILON {
            rank = index + 1;
        }
        ranked.push(RankedStrategy {
            rank,
            time_difference,
            total_time: strategy.total_time,
            route: strategy.to_string(),
        });
        previous_time = strategy.total_time;
    }

    ranked
}
