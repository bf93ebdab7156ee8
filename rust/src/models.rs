//! Core data types shared with the Python host.

use pyo3::prelude::*;
use std::collections::HashMap;
use std::fmt;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Position of a stage in the fixed play order: (episode, page).
pub type StageKey = (u32, u32);

/// A move from one stage to a later one, taking `time` seconds.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Move {
    #[pyo3(get, set)]
    pub episode: u32,
    #[pyo3(get, set)]
    pub page: u32,
    #[pyo3(get, set)]
    pub time: f64,
}

impl Move {
    /// Order key of the destination stage.
    pub fn target(&self) -> StageKey {
        (self.episode, self.page)
    }
}

#[pymethods]
impl Move {
    #[new]
    fn new(episode: u32, page: u32, time: f64) -> Self {
        Self {
            episode,
            page,
            time,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Move(to={}-{:02}, time={:.2})",
            self.episode, self.page, self.time
        )
    }
}

/// One game stage as produced by the loader.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Stage {
    #[pyo3(get, set)]
    pub episode: u32,
    #[pyo3(get, set)]
    pub page: u32,
    #[pyo3(get, set)]
    pub name: String,
    /// Gems the player must hold to enter this stage.
    #[pyo3(get, set)]
    pub required_gems: u32,
    /// Clear options: (gems collected here, time to clear when collecting them).
    #[pyo3(get, set)]
    pub clear_times: Vec<(u32, f64)>,
    /// Stages reachable right after clearing this one.
    #[pyo3(get, set)]
    pub moves: Vec<Move>,
    /// Stages that clearing this one opens up. Only read when building move templates.
    #[pyo3(get, set)]
    pub unlocks: Vec<StageKey>,
}

impl Stage {
    pub fn key(&self) -> StageKey {
        (self.episode, self.page)
    }
}

#[pymethods]
impl Stage {
    #[new]
    #[pyo3(signature = (episode, page, name, required_gems, clear_times, moves=None, unlocks=None))]
    fn new(
        episode: u32,
        page: u32,
        name: String,
        required_gems: u32,
        clear_times: Vec<(u32, f64)>,
        moves: Option<Vec<Move>>,
        unlocks: Option<Vec<StageKey>>,
    ) -> Self {
        Self {
            episode,
            page,
            name,
            required_gems,
            clear_times,
            moves: moves.unwrap_or_default(),
            unlocks: unlocks.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Stage({}-{:02}, name={:?}, required_gems={}, clear_options={}, moves={}, unlocks={})",
            self.episode,
            self.page,
            self.name,
            self.required_gems,
            self.clear_times.len(),
            self.moves.len(),
            self.unlocks.len()
        )
    }
}

/// One vertex of a returned strategy: a stage and the gems held after clearing it.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    #[pyo3(get)]
    pub episode: u32,
    #[pyo3(get)]
    pub page: u32,
    #[pyo3(get)]
    pub cumulative_gems: u32,
}

impl PathStep {
    pub fn key(&self) -> StageKey {
        (self.episode, self.page)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}({:03})",
            self.episode, self.page, self.cumulative_gems
        )
    }
}

#[pymethods]
impl PathStep {
    fn __repr__(&self) -> String {
        format!(
            "PathStep({}-{:02}, cumulative_gems={})",
            self.episode, self.page, self.cumulative_gems
        )
    }

    fn __str__(&self) -> String {
        self.to_string()
    }
}

/// A full play-through from the first stage to the goal with its total time.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    #[pyo3(get)]
    pub path: Vec<PathStep>,
    #[pyo3(get)]
    pub total_time: f64,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[pymethods]
impl Strategy {
    /// Route string, e.g. `1-01(002) -> 1-02(002)`.
    fn route(&self) -> String {
        self.to_string()
    }

    fn __len__(&self) -> usize {
        self.path.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Strategy(total_time={:.2}, steps={})",
            self.total_time,
            self.path.len()
        )
    }
}

/// Result of one optimizer run.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct SolveResult {
    /// Strategies in ascending total time, at most `max_labels_per_vertex` of them.
    #[pyo3(get)]
    pub strategies: Vec<Strategy>,
    #[pyo3(get)]
    pub metadata: HashMap<String, String>,
}

#[pymethods]
impl SolveResult {
    fn __len__(&self) -> usize {
        self.strategies.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "SolveResult(strategies={}, metadata_keys={})",
            self.strategies.len(),
            self.metadata.len()
        )
    }
}
