//! Fixed-capacity collection of the best labels at one vertex.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::label::LabelId;

#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    time: f64,
    id: LabelId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Max-heap on (time, id): the top is the slowest label, and among equal
    // times the most recently created one.
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then(self.id.cmp(&other.id))
    }
}

/// Outcome of offering a candidate to a full or partially full collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Admission {
    /// There was room; the candidate was added.
    Inserted(LabelId),
    /// The collection was full and the candidate replaced its slowest member.
    Replaced { id: LabelId, evicted: LabelId },
    /// The collection was full and the candidate was not strictly faster.
    Rejected,
}

/// Keeps at most `capacity` labels, evicting the slowest when a faster one arrives.
#[derive(Clone, Debug)]
pub struct LabelHeap {
    entries: BinaryHeap<HeapEntry>,
    capacity: usize,
}

impl LabelHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Offer a candidate arriving in `time`.
    ///
    /// `alloc` is only called when the candidate is kept, so rejected candidates
    /// never reach the arena. When full, the candidate must be strictly faster
    /// than the current worst; equal times keep the existing member.
    pub fn offer(&mut self, time: f64, alloc: impl FnOnce() -> LabelId) -> Admission {
        if self.entries.len() < self.capacity {
            let id = alloc();
            self.entries.push(HeapEntry { time, id });
            return Admission::Inserted(id);
        }

        match self.entries.peek_mut() {
            Some(mut worst) if time < worst.time => {
                let evicted = worst.id;
                let id = alloc();
                *worst = HeapEntry { time, id };
                Admission::Replaced { id, evicted }
            }
            _ => Admission::Rejected,
        }
    }

    /// Time of the slowest retained label.
    pub fn worst_time(&self) -> Option<f64> {
        self.entries.peek().map(|e| e.time)
    }

    /// Retained labels, fastest first; equal times in creation order.
    pub fn ids_by_time(&self) -> Vec<LabelId> {
        let mut entries: Vec<HeapEntry> = self.entries.iter().copied().collect();
        entries.sort();
        entries.into_iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
