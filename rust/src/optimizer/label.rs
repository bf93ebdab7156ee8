//! Vertices of the (stage, gems) state space and the labels that reach them.

use crate::interner::StageId;

/// A point in the state space: a stage plus the gems held after clearing it.
///
/// Derived ordering is (stage, gems), which is a topological order of the state
/// DAG because every move goes to a later stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex {
    pub stage: StageId,
    pub gems: u32,
}

impl Vertex {
    pub fn new(stage: StageId, gems: u32) -> Self {
        Self { stage, gems }
    }
}

/// Index of a label in its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(usize);

impl LabelId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A way of reaching `vertex` in `cumulative_time`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    pub vertex: Vertex,
    /// Label this one extends; None for a start label.
    pub predecessor: Option<LabelId>,
    pub cumulative_time: f64,
}

/// Append-only label storage.
///
/// Labels evicted from a vertex stay allocated; nothing points at them since
/// eviction only happens before their vertex is expanded.
#[derive(Debug, Default, Clone)]
pub struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.labels.len());
        self.labels.push(label);
        id
    }

    #[inline]
    pub fn get(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Vertices from the start label down to `id`, in play order.
    pub fn path_to(&self, id: LabelId) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        let mut current = Some(id);
        while let Some(label_id) = current {
            let label = self.get(label_id);
            vertices.push(label.vertex);
            current = label.predecessor;
        }
        vertices.reverse();
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_order_is_stage_then_gems() {
        let mut vertices = vec![
            Vertex::new(1, 0),
            Vertex::new(0, 2),
            Vertex::new(0, 0),
            Vertex::new(1, 1),
        ];
        vertices.sort();
        assert_eq!(
            vertices,
            vec![
                Vertex::new(0, 0),
                Vertex::new(0, 2),
                Vertex::new(1, 0),
                Vertex::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_path_to_walks_back_to_start() {
        let mut arena = LabelArena::new();
        let start = arena.push(Label {
            vertex: Vertex::new(0, 1),
            predecessor: None,
            cumulative_time: 3.0,
        });
        let middle = arena.push(Label {
            vertex: Vertex::new(1, 1),
            predecessor: Some(start),
            cumulative_time: 7.0,
        });
        // sibling sharing the same start
        arena.push(Label {
            vertex: Vertex::new(1, 2),
            predecessor: Some(start),
            cumulative_time: 8.0,
        });
        let end = arena.push(Label {
            vertex: Vertex::new(2, 2),
            predecessor: Some(middle),
            cumulative_time: 12.0,
        });

        assert_eq!(
            arena.path_to(end),
            vec![Vertex::new(0, 1), Vertex::new(1, 1), Vertex::new(2, 2)]
        );
        assert_eq!(arena.path_to(start), vec![Vertex::new(0, 1)]);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_ids_are_arena_slots() {
        let mut arena = LabelArena::new();
        assert!(arena.is_empty());
        for i in 0..300 {
            let id = arena.push(Label {
                vertex: Vertex::new(0, 0),
                predecessor: None,
                cumulative_time: i as f64,
            });
            assert_eq!(id.index(), i);
            assert_eq!(arena.get(id).cumulative_time, i as f64);
        }
        assert_eq!(arena.len(), 300);

        arena.clear();
        assert!(arena.is_empty());
    }
}
