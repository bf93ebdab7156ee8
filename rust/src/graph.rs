//! Validated stage graph built from loader output.
//!
//! Stages are sorted by their (episode, page) key and interned to dense IDs in
//! that order, so comparing `StageId`s is the same as comparing play order.
//! Every move must point to a strictly later stage, which makes the graph
//! acyclic by construction.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::interner::{StageId, StageIndex};
use crate::models::{Stage, StageKey};

/// Errors raised while building the stage graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Stage graph is empty")]
    Empty,
    #[error("Duplicate stage {0:?}")]
    DuplicateStage(StageKey),
    #[error("Stage {stage:?} lists gem count {gems} more than once")]
    DuplicateClearOption { stage: StageKey, gems: u32 },
    #[error("Stage {from:?} lists a move to {to:?} more than once")]
    DuplicateMove { from: StageKey, to: StageKey },
    #[error("Stage {from:?} unlocks {to:?} more than once")]
    DuplicateUnlock { from: StageKey, to: StageKey },
    #[error("Stage {from:?} moves to unknown stage {to:?}")]
    UnknownStage { from: StageKey, to: StageKey },
    #[error("Move {from:?} -> {to:?} does not go to a later stage")]
    NonIncreasingMove { from: StageKey, to: StageKey },
    #[error("Stage {stage:?} has invalid time {time}")]
    InvalidTime { stage: StageKey, time: f64 },
    #[error("First stage {0:?} has no clear options")]
    NoStartOptions(StageKey),
}

/// A stage with successors resolved to interned IDs.
#[derive(Clone, Debug)]
pub struct StageNode {
    pub key: StageKey,
    pub name: String,
    pub required_gems: u32,
    pub clear_times: Vec<(u32, f64)>,
    /// (successor, move time), sorted by successor order.
    pub successors: Vec<(StageId, f64)>,
}

/// Stages in play order with resolved successor edges.
#[derive(Clone, Debug)]
pub struct StageGraph {
    nodes: Vec<StageNode>,
}

fn check_time(stage: StageKey, time: f64) -> Result<(), GraphError> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidTime { stage, time })
    }
}

impl StageGraph {
    /// Validate stages and resolve their moves.
    ///
    /// Input order does not matter; stages are placed in (episode, page) order.
    pub fn build(stages: &[Stage]) -> Result<Self, GraphError> {
        if stages.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut ordered: Vec<&Stage> = stages.iter().collect();
        ordered.sort_by_key(|s| s.key());

        let mut index = StageIndex::with_capacity(ordered.len());
        for stage in &ordered {
            let (_, added) = index.intern(stage.key());
            if !added {
                return Err(GraphError::DuplicateStage(stage.key()));
            }
        }

        let mut nodes = Vec::with_capacity(ordered.len());
        for stage in ordered {
            let key = stage.key();

            let mut seen_gems = FxHashSet::default();
            for &(gems, time) in &stage.clear_times {
                if !seen_gems.insert(gems) {
                    return Err(GraphError::DuplicateClearOption { stage: key, gems });
                }
                check_time(key, time)?;
            }

            let mut successors = Vec::with_capacity(stage.moves.len());
            let mut seen_targets = FxHashSet::default();
            for mv in &stage.moves {
                let to = mv.target();
                if !seen_targets.insert(to) {
                    return Err(GraphError::DuplicateMove { from: key, to });
                }
                let target = index
                    .get(to)
                    .ok_or(GraphError::UnknownStage { from: key, to })?;
                if to <= key {
                    return Err(GraphError::NonIncreasingMove { from: key, to });
                }
                check_time(key, mv.time)?;
                successors.push((target, mv.time));
            }
            successors.sort_by_key(|&(id, _)| id);

            nodes.push(StageNode {
                key,
                name: stage.name.clone(),
                required_gems: stage.required_gems,
                clear_times: stage.clear_times.clone(),
                successors,
            });
        }

        if nodes[0].clear_times.is_empty() {
            return Err(GraphError::NoStartOptions(nodes[0].key));
        }

        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: StageId) -> &StageNode {
        &self.nodes[id as usize]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (StageId, &StageNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (i as StageId, node))
    }

    pub fn first(&self) -> StageId {
        0
    }

    pub fn last(&self) -> StageId {
        (self.nodes.len() - 1) as StageId
    }

    /// Largest gem requirement over all stages.
    pub fn max_required_gems(&self) -> u32 {
        self.nodes
            .iter()
            .map(|n| n.required_gems)
            .max()
            .unwrap_or(0)
    }
}
