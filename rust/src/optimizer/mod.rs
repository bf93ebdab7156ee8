//! K-best strategy optimizer.
//!
//! Propagates labels forward over the (stage, gems) state space, keeping at
//! most K labels per vertex, then walks the goal vertex's labels back to their
//! start stages.

mod bounded;
mod core;
mod label;

pub use bounded::{Admission, LabelHeap};
pub use self::core::{solve_strategies, Optimizer, OptimizerError, SolveStats};
pub use label::{Label, LabelArena, LabelId, Vertex};
