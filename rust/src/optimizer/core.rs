//! K-best label propagation over the (stage, gems) state space.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::config::OptimizerConfig;
use crate::graph::{GraphError, StageGraph};
use crate::models::{PathStep, SolveResult, Stage, StageKey, Strategy};
use crate::{log_changes, log_checks, log_debug};

use super::bounded::{Admission, LabelHeap};
use super::label::{Label, LabelArena, LabelId, Vertex};

/// Errors that can occur while optimizing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Malformed stage graph: {0}")]
    MalformedGraph(#[from] GraphError),
    #[error("Goal stage {stage:?} with {gems} gems is unreachable")]
    GoalUnreachable { stage: StageKey, gems: u32 },
}

/// Counters collected during one solve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Vertices that received at least one label and were expanded.
    pub vertices_reached: usize,
    /// Labels ever stored, including ones later evicted.
    pub labels_created: usize,
    pub labels_evicted: usize,
    /// Candidates turned away from a full vertex.
    pub candidates_rejected: usize,
    /// Successors skipped because the player held too few gems.
    pub locked_moves: usize,
    /// Clear options skipped because they would exceed the gem cap.
    pub capped_options: usize,
}

/// Finds the K fastest strategies through a stage graph.
///
/// Vertices are expanded once each in (stage, gems) order. By the time a
/// vertex is expanded all of its incoming edges come from earlier stages that
/// were already expanded, so its label collection is final.
pub struct Optimizer<'g> {
    graph: &'g StageGraph,
    max_labels_per_vertex: usize,
    max_gems: u32,
    verbosity: u8,

    // Rebuilt on every solve
    arena: LabelArena,
    /// Per stage, the label collections of reached vertices keyed by gems.
    collections: Vec<BTreeMap<u32, LabelHeap>>,
    stats: SolveStats,
}

impl<'g> Optimizer<'g> {
    /// Create an optimizer for `graph`.
    pub fn new(graph: &'g StageGraph, config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let max_gems = config.resolve_max_gems(graph)?;
        Ok(Self {
            graph,
            max_labels_per_vertex: config.max_labels_per_vertex,
            max_gems,
            verbosity: config.verbosity,
            arena: LabelArena::new(),
            collections: Vec::with_capacity(graph.len()),
            stats: SolveStats::default(),
        })
    }

    /// The vertex every strategy must end at.
    pub fn goal(&self) -> Vertex {
        Vertex::new(self.graph.last(), self.max_gems)
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Labels retained at `vertex` after the last solve.
    pub fn retained(&self, vertex: Vertex) -> Option<&LabelHeap> {
        self.collections.get(vertex.stage as usize)?.get(&vertex.gems)
    }

    /// Run the optimizer and return strategies with run metadata.
    pub fn solve(&mut self) -> Result<SolveResult, OptimizerError> {
        let paths = self.solve_paths()?;
        let graph = self.graph;

        let strategies: Vec<Strategy> = paths
            .into_iter()
            .map(|(vertices, total_time)| Strategy {
                path: vertices
                    .into_iter()
                    .map(|v| {
                        let (episode, page) = graph.node(v.stage).key;
                        PathStep {
                            episode,
                            page,
                            cumulative_gems: v.gems,
                        }
                    })
                    .collect(),
                total_time,
            })
            .collect();

        Ok(SolveResult {
            strategies,
            metadata: self.metadata(),
        })
    }

    /// Run the optimizer and return raw vertex sequences, fastest first.
    pub fn solve_paths(&mut self) -> Result<Vec<(Vec<Vertex>, f64)>, OptimizerError> {
        self.reset();
        self.seed();
        self.propagate();
        self.stats.labels_created = self.arena.len();
        let paths = self.reconstruct()?;

        log_changes!(
            self.verbosity,
            "[optimizer] {} strategies, {} vertices reached, {} labels created, {} evicted",
            paths.len(),
            self.stats.vertices_reached,
            self.stats.labels_created,
            self.stats.labels_evicted
        );
        Ok(paths)
    }

    fn reset(&mut self) {
        self.arena.clear();
        self.collections.clear();
        self.collections.resize_with(self.graph.len(), BTreeMap::new);
        self.stats = SolveStats::default();
    }

    /// Give each clear option of the first stage its own start vertex.
    fn seed(&mut self) {
        let graph = self.graph;
        let first = graph.first();
        let node = graph.node(first);

        for &(gems, clear_time) in &node.clear_times {
            if gems > self.max_gems {
                log_checks!(
                    self.verbosity,
                    "[seed] {:?}: {} gems exceeds cap {}",
                    node.key,
                    gems,
                    self.max_gems
                );
                self.stats.capped_options += 1;
                continue;
            }
            log_changes!(
                self.verbosity,
                "[seed] start at {:?} with {} gems in {:.2}",
                node.key,
                gems,
                clear_time
            );
            self.admit(Vertex::new(first, gems), None, clear_time);
        }
    }

    /// Expand every reached vertex once, in topological order.
    ///
    /// Only gem levels that hold labels are visited, in ascending order.
    fn propagate(&mut self) {
        let graph = self.graph;

        for (stage, node) in graph.nodes() {
            // moves only lead to later stages, so this stage is final now
            let reached: Vec<(u32, Vec<LabelId>)> = self.collections[stage as usize]
                .iter()
                .map(|(&gems, heap)| (gems, heap.ids_by_time()))
                .collect();

            let expanded = reached.len();
            for (gems, label_ids) in reached {
                for label_id in label_ids {
                    let label = *self.arena.get(label_id);
                    log_debug!(
                        self.verbosity,
                        "[expand] {:?} gems={} time={:.2}",
                        node.key,
                        gems,
                        label.cumulative_time
                    );

                    for &(next, move_time) in &node.successors {
                        let next_node = graph.node(next);
                        if gems < next_node.required_gems {
                            log_checks!(
                                self.verbosity,
                                "[gate] {:?} -> {:?}: holding {} gems, needs {}",
                                node.key,
                                next_node.key,
                                gems,
                                next_node.required_gems
                            );
                            self.stats.locked_moves += 1;
                            continue;
                        }

                        for &(gained, clear_time) in &next_node.clear_times {
                            let next_gems = match gems.checked_add(gained) {
                                Some(g) if g <= self.max_gems => g,
                                _ => {
                                    log_checks!(
                                        self.verbosity,
                                        "[cap] {:?}: {} + {} gems exceeds cap {}",
                                        next_node.key,
                                        gems,
                                        gained,
                                        self.max_gems
                                    );
                                    self.stats.capped_options += 1;
                                    continue;
                                }
                            };
                            let time = label.cumulative_time + move_time + clear_time;
                            log_debug!(
                                self.verbosity,
                                "[candidate] {:?} gems={} time={:.2}",
                                next_node.key,
                                next_gems,
                                time
                            );
                            self.admit(Vertex::new(next, next_gems), Some(label_id), time);
                        }
                    }
                }
            }

            self.stats.vertices_reached += expanded;
            log_changes!(
                self.verbosity,
                "[stage] {:?} {}: {} vertices expanded",
                node.key,
                node.name,
                expanded
            );
        }
    }

    /// Offer a candidate label to `vertex`'s collection.
    fn admit(&mut self, vertex: Vertex, predecessor: Option<LabelId>, time: f64) {
        let capacity = self.max_labels_per_vertex;
        let heap = self.collections[vertex.stage as usize]
            .entry(vertex.gems)
            .or_insert_with(|| LabelHeap::with_capacity(capacity));
        let arena = &mut self.arena;

        let outcome = heap.offer(time, || {
            arena.push(Label {
                vertex,
                predecessor,
                cumulative_time: time,
            })
        });

        match outcome {
            Admission::Inserted(_) => {}
            Admission::Replaced { evicted, .. } => {
                self.stats.labels_evicted += 1;
                log_checks!(
                    self.verbosity,
                    "[admit] {:?}: {:.2} replaces {:.2}",
                    vertex,
                    time,
                    self.arena.get(evicted).cumulative_time
                );
            }
            Admission::Rejected => {
                self.stats.candidates_rejected += 1;
                log_checks!(
                    self.verbosity,
                    "[admit] {:?}: {:.2} rejected, slowest kept is {:.2}",
                    vertex,
                    time,
                    heap.worst_time().unwrap_or(f64::NAN)
                );
            }
        }
    }

    /// Walk back from each goal label, fastest first.
    fn reconstruct(&self) -> Result<Vec<(Vec<Vertex>, f64)>, OptimizerError> {
        let goal = self.goal();
        let heap = self
            .retained(goal)
            .filter(|heap| !heap.is_empty())
            .ok_or(OptimizerError::GoalUnreachable {
                stage: self.graph.node(goal.stage).key,
                gems: goal.gems,
            })?;

        Ok(heap
            .ids_by_time()
            .into_iter()
            .map(|id| (self.arena.path_to(id), self.arena.get(id).cumulative_time))
            .collect())
    }

    fn metadata(&self) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert("algorithm".to_string(), "k_best_labels".to_string());
        metadata.insert(
            "max_labels_per_vertex".to_string(),
            self.max_labels_per_vertex.to_string(),
        );
        metadata.insert("max_required_gems".to_string(), self.max_gems.to_string());
        metadata.insert(
            "vertices_reached".to_string(),
            self.stats.vertices_reached.to_string(),
        );
        metadata.insert(
            "labels_created".to_string(),
            self.stats.labels_created.to_string(),
        );
        metadata.insert(
            "labels_evicted".to_string(),
            self.stats.labels_evicted.to_string(),
        );
        metadata.insert(
            "candidates_rejected".to_string(),
            self.stats.candidates_rejected.to_string(),
        );
        metadata.insert(
            "locked_moves".to_string(),
            self.stats.locked_moves.to_string(),
        );
        metadata.insert(
            "capped_options".to_string(),
            self.stats.capped_options.to_string(),
        );
        metadata
    }
}

/// Build the stage graph and solve it in one call.
pub fn solve_strategies(
    stages: &[Stage],
    config: &OptimizerConfig,
) -> Result<SolveResult, OptimizerError> {
    if stages.is_empty() {
        return Err(OptimizerError::InvalidParameters(
            "stage sequence is empty".to_string(),
        ));
    }
    config.validate()?;
    let graph = StageGraph::build(stages)?;
    let mut optimizer = Optimizer::new(&graph, config)?;
    optimizer.solve()
}
