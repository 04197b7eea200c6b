//! Reachability closure
//!
//! Grows a node set from a seed by following edges backward (predecessors)
//! or forward (successors) until no new node is added. The set only grows
//! and is bounded by the node count, so the loop ends after at most |V|
//! rounds.

use crate::graph::{Graph, GraphResult, NodeId};
use indexmap::IndexSet;
use tracing::trace;

/// Which end of an edge to follow when growing the closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges backward: `u -> v` adds `u` when `v` is in the set
    Incoming,
    /// Follow edges forward: `u -> v` adds `v` when `u` is in the set
    Outgoing,
}

/// Nodes that can reach `seed`, `seed` included
///
/// Ordered seed first, then by discovery round.
pub fn get_nodes_of_subgraph_to<D>(
    graph: &Graph<D>,
    seed: impl AsRef<str>,
) -> GraphResult<IndexSet<NodeId>> {
    closure(graph, seed.as_ref(), Direction::Incoming)
}

/// Nodes reachable from `seed`, `seed` included
pub fn get_nodes_of_subgraph_from<D>(
    graph: &Graph<D>,
    seed: impl AsRef<str>,
) -> GraphResult<IndexSet<NodeId>> {
    closure(graph, seed.as_ref(), Direction::Outgoing)
}

/// Subgraph induced by the nodes that can reach `seed`
pub fn get_subgraph_to<D: Clone>(graph: &Graph<D>, seed: impl AsRef<str>) -> GraphResult<Graph<D>> {
    let nodes = get_nodes_of_subgraph_to(graph, seed)?;
    induced_subgraph(graph, &nodes)
}

/// Subgraph induced by the nodes reachable from `seed`
pub fn get_subgraph_from<D: Clone>(
    graph: &Graph<D>,
    seed: impl AsRef<str>,
) -> GraphResult<Graph<D>> {
    let nodes = get_nodes_of_subgraph_from(graph, seed)?;
    induced_subgraph(graph, &nodes)
}

/// Closure of `seed` under one edge direction
pub fn closure<D>(
    graph: &Graph<D>,
    seed: &str,
    direction: Direction,
) -> GraphResult<IndexSet<NodeId>> {
    let seed = &graph.get_node(seed)?.id;

    let mut reached: IndexSet<&NodeId> = IndexSet::new();
    reached.insert(seed);

    // Only nodes added in the previous round can contribute new neighbours.
    let mut frontier = vec![seed];
    let mut rounds = 0;

    while !frontier.is_empty() {
        rounds += 1;
        let mut next = Vec::new();

        for id in frontier {
            let neighbours = match direction {
                Direction::Incoming => graph.get_nodes_to(id)?,
                Direction::Outgoing => graph.get_nodes_from(id)?,
            };
            for neighbour in neighbours {
                if reached.insert(neighbour) {
                    next.push(neighbour);
                }
            }
        }

        frontier = next;
    }

    trace!(
        "Closure of {} ({:?}) reached {} nodes in {} rounds",
        seed,
        direction,
        reached.len(),
        rounds
    );
    Ok(reached.into_iter().cloned().collect())
}

fn induced_subgraph<D: Clone>(graph: &Graph<D>, nodes: &IndexSet<NodeId>) -> GraphResult<Graph<D>> {
    let mut subgraph = Graph::new();

    for id in nodes {
        let node = graph.get_node(id)?;
        subgraph.insert_node_in_place(id.clone(), node.data.clone());
    }
    for edge in graph.edges() {
        if nodes.contains(&edge.from) && nodes.contains(&edge.to) {
            subgraph.insert_edge_in_place(edge.clone())?;
        }
    }

    Ok(subgraph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn ids(set: &IndexSet<NodeId>) -> Vec<&str> {
        set.iter().map(|id| id.as_str()).collect()
    }

    fn path(n: usize) -> Graph {
        (0..n)
            .fold(GraphBuilder::new().node("0"), |builder, i| {
                let (a, b) = (i.to_string(), (i + 1).to_string());
                builder.node(b.as_str()).edge(format!("{}-{}", a, b), a, b)
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_closure_contains_seed() {
        let graph: Graph = Graph::new().add_node("solo");

        assert_eq!(ids(&get_nodes_of_subgraph_to(&graph, "solo").unwrap()), vec!["solo"]);
        assert_eq!(ids(&get_nodes_of_subgraph_from(&graph, "solo").unwrap()), vec!["solo"]);
    }

    #[test]
    fn test_closure_on_path() {
        let graph = path(8);

        assert_eq!(
            ids(&get_nodes_of_subgraph_from(&graph, "2").unwrap()),
            vec!["2", "3", "4", "5", "6", "7", "8"]
        );
        assert_eq!(
            ids(&get_nodes_of_subgraph_to(&graph, "2").unwrap()),
            vec!["2", "1", "0"]
        );
    }

    #[test]
    fn test_closure_terminates_on_cycle() {
        let graph = GraphBuilder::<()>::new()
            .node("a")
            .node("b")
            .node("c")
            .node("d")
            .edge("a-b", "a", "b")
            .edge("b-c", "b", "c")
            .edge("c-a", "c", "a")
            .edge("d-a", "d", "a")
            .build()
            .unwrap();

        let to_a = get_nodes_of_subgraph_to(&graph, "a").unwrap();
        assert_eq!(to_a.len(), 4);

        let from_a = get_nodes_of_subgraph_from(&graph, "a").unwrap();
        assert_eq!(ids(&from_a), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_closure_missing_seed() {
        let graph: Graph = Graph::new();
        assert!(get_nodes_of_subgraph_to(&graph, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_induced_subgraph() {
        let graph = GraphBuilder::new()
            .node_with_data("a", 1)
            .node_with_data("b", 2)
            .node_with_data("c", 3)
            .edge("a-b", "a", "b")
            .edge("c-b", "c", "b")
            .edge("b-b", "b", "b")
            .build()
            .unwrap();

        let sub = get_subgraph_from(&graph, "a").unwrap();

        assert_eq!(sub.node_count(), 2);
        assert!(!sub.has_node("c"));
        assert_eq!(sub.get_node("b").unwrap().data, Some(2));
        assert!(sub.has_edge_with_id("a-b"));
        assert!(sub.has_edge_with_id("b-b"));
        assert!(!sub.has_edge_with_id("c-b"));
        sub.check_integrity().unwrap();

        let to_b = get_subgraph_to(&graph, "b").unwrap();
        assert_eq!(to_b, graph);
    }
}
