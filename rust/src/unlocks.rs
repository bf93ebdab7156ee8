//! Move templates derived from stage unlock lists.
//!
//! Clearing a stage opens the stages in its unlock list. Play always continues
//! at the earliest open stage, and from there the player may move to any other
//! stage that is open at that moment. Replaying this from the first stage
//! yields every (from, to) pair a moves table needs a time for.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::GraphError;
use crate::models::{Stage, StageKey};

/// Candidate moves implied by the stages' unlock lists, sorted by (from, to).
///
/// Stages no unlock chain reaches from the first stage appear in no pair. A
/// stage unlocked by several stages opens on the first of them.
pub fn move_candidates(stages: &[Stage]) -> Result<Vec<(StageKey, StageKey)>, GraphError> {
    let mut by_key: FxHashMap<StageKey, &Stage> =
        FxHashMap::with_capacity_and_hasher(stages.len(), Default::default());
    for stage in stages {
        if by_key.insert(stage.key(), stage).is_some() {
            return Err(GraphError::DuplicateStage(stage.key()));
        }
    }
    let first = by_key.keys().min().copied().ok_or(GraphError::Empty)?;

    for stage in stages {
        let from = stage.key();
        let mut seen = FxHashSet::default();
        for &to in &stage.unlocks {
            if !seen.insert(to) {
                return Err(GraphError::DuplicateUnlock { from, to });
            }
            if !by_key.contains_key(&to) {
                return Err(GraphError::UnknownStage { from, to });
            }
            if to <= from {
                return Err(GraphError::NonIncreasingMove { from, to });
            }
        }
    }

    let mut queue = BinaryHeap::from([Reverse(first)]);
    let mut open = BTreeSet::from([first]);
    let mut unlocked = FxHashSet::from_iter([first]);
    let mut pairs = Vec::new();

    while let Some(Reverse(from)) = queue.pop() {
        open.remove(&from);
        for &to in &by_key[&from].unlocks {
            if unlocked.insert(to) {
                queue.push(Reverse(to));
                open.insert(to);
            }
        }
        // every open stage comes after `from`, which was the earliest
        pairs.extend(open.iter().map(|&to| (from, to)));
    }

    pairs.sort_unstable();
    Ok(pairs)
}
