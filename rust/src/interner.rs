//! Stage key interning.
//!
//! Maps (episode, page) keys to dense integer IDs so per-vertex storage can be
//! indexed directly instead of hashed.

use rustc_hash::FxHashMap;

use crate::models::StageKey;

/// Interned stage ID (u32 for compact storage in vertices).
pub type StageId = u32;

/// Interner that maps stage keys to integers in insertion order.
#[derive(Debug, Clone)]
pub struct StageIndex {
    to_int: FxHashMap<StageKey, StageId>,
}

impl StageIndex {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Intern a key, returning its integer ID and whether it was newly added.
    pub fn intern(&mut self, key: StageKey) -> (StageId, bool) {
        if let Some(&id) = self.to_int.get(&key) {
            return (id, false);
        }
        let id = self.to_int.len() as StageId;
        self.to_int.insert(key, id);
        (id, true)
    }

    #[inline]
    pub fn get(&self, key: StageKey) -> Option<StageId> {
        self.to_int.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_ids_in_order() {
        let mut index = StageIndex::with_capacity(4);

        let (a, new_a) = index.intern((1, 1));
        let (b, new_b) = index.intern((1, 2));
        let (a_again, new_again) = index.intern((1, 1));

        assert!(new_a && new_b);
        assert!(!new_again);
        assert_eq!(a, a_again);
        assert_ne!(a, b);

        assert_eq!((a, b), (0, 1));
        assert_eq!(index.get((1, 2)), Some(b));
        assert_eq!(index.get((9, 9)), None);
    }
}
