//! Tree check for the connected component of a node
//!
//! Explores the component around a start node layer by layer, treating edges
//! as undirected. Each frontier entry remembers the node it was reached from
//! (its parent). The component is a tree rooted at the start node iff, for
//! every entry:
//! - exactly one edge joins it to its parent, and
//! - the only already-visited node it touches is its parent.
//!
//! The exploration is capped at `StructureConfig::max_rounds` layers.

use crate::graph::{Graph, GraphError, GraphResult, NodeId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Default number of frontier checks before giving up
pub const DEFAULT_MAX_ROUNDS: usize = 1000;

/// Tree check configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Maximum number of frontier layers to check
    pub max_rounds: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl StructureConfig {
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

/// One node of the current layer, with the node it was reached from
struct FrontierEntry<'g> {
    parent: &'g NodeId,
    node: &'g NodeId,
    adjacent: Vec<&'g NodeId>,
}

/// Reason the component is not a tree
enum Violation<'g> {
    ParallelEdges {
        parent: &'g NodeId,
        node: &'g NodeId,
        count: usize,
    },
    NonTreeEdge {
        node: &'g NodeId,
        reached: &'g NodeId,
    },
}

impl fmt::Display for Violation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ParallelEdges {
                parent,
                node,
                count,
            } => write!(f, "{} and {} are joined by {} edges", parent, node, count),
            Violation::NonTreeEdge { node, reached } => {
                write!(f, "{} reaches already visited node {}", node, reached)
            }
        }
    }
}

/// Check whether the component containing `start` is not a tree
///
/// Uses [`DEFAULT_MAX_ROUNDS`]. See [`has_cycles_in_connected_component_with`].
pub fn has_cycles_in_connected_component<D>(
    graph: &Graph<D>,
    start: impl AsRef<str>,
) -> GraphResult<bool> {
    has_cycles_in_connected_component_with(graph, start, &StructureConfig::default())
}

/// Check whether the component containing `start` is not a tree
///
/// Returns `true` when two adjacent nodes are joined by more than one edge
/// (counting both directions) or when a node touches a visited node other
/// than its parent. Fails with `NodeNotFound` if `start` is absent and with
/// `ResourceExhausted` if the frontier is still non-empty after
/// `config.max_rounds` checks.
pub fn has_cycles_in_connected_component_with<D>(
    graph: &Graph<D>,
    start: impl AsRef<str>,
    config: &StructureConfig,
) -> GraphResult<bool> {
    let start = &graph.get_node(start)?.id;

    let mut visited: FxHashSet<&NodeId> = FxHashSet::default();
    visited.insert(start);
    let mut frontier = children(graph, start, &visited)?;

    for round in 0..config.max_rounds {
        if let Some(violation) = find_violation(graph, &frontier, &visited) {
            debug!(
                "Component of {} is not a tree (round {}): {}",
                start, round, violation
            );
            return Ok(true);
        }

        if frontier.is_empty() {
            debug!(
                "Component of {} is a tree: {} nodes in {} rounds",
                start,
                visited.len(),
                round
            );
            return Ok(false);
        }

        // Children are filtered against the visited set before this layer
        // joins it, so siblings joined by an edge show up in the next layer
        // and fail the check there.
        let mut next = Vec::new();
        for entry in &frontier {
            next.extend(children(graph, entry.node, &visited)?);
        }
        visited.extend(frontier.iter().map(|entry| entry.node));
        frontier = next;
    }

    warn!(
        "Gave up checking component of {} after {} rounds ({} nodes visited)",
        start,
        config.max_rounds,
        visited.len()
    );
    Err(GraphError::ResourceExhausted {
        rounds: config.max_rounds,
    })
}

fn children<'g, D>(
    graph: &'g Graph<D>,
    parent: &'g NodeId,
    visited: &FxHashSet<&'g NodeId>,
) -> GraphResult<Vec<FrontierEntry<'g>>> {
    graph
        .get_nodes_adjacent_to(parent)?
        .into_iter()
        .filter(|node| !visited.contains(*node))
        .map(|node| -> GraphResult<FrontierEntry<'g>> {
            Ok(FrontierEntry {
                parent,
                node,
                adjacent: graph.get_nodes_adjacent_to(node)?,
            })
        })
        .collect()
}

fn find_violation<'g, D>(
    graph: &'g Graph<D>,
    frontier: &[FrontierEntry<'g>],
    visited: &FxHashSet<&'g NodeId>,
) -> Option<Violation<'g>> {
    for entry in frontier {
        let count = graph.get_edges_between(entry.parent, entry.node).len();
        if count > 1 {
            return Some(Violation::ParallelEdges {
                parent: entry.parent,
                node: entry.node,
                count,
            });
        }

        let back = entry
            .adjacent
            .iter()
            .find(|&&adjacent| adjacent != entry.parent && visited.contains(adjacent));
        if let Some(&reached) = back {
            return Some(Violation::NonTreeEdge {
                node: entry.node,
                reached,
            });
        }
    }
    None
}
