//! Compact graph encoding
//!
//! The compact form keeps node ids and edge endpoints only. Incidence sets and
//! payloads are dropped; decoding re-derives the incidence sets from the edge
//! list. Edge endpoints are written under the short keys `f` and `t`.

use super::edge::Edge;
use super::store::{Graph, GraphError, GraphResult};
use super::types::{EdgeId, NodeId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Compact encoding errors
#[derive(Error, Debug)]
pub enum CompactError {
    /// Decoded edges do not describe a valid graph
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type CompactResult<T> = Result<T, CompactError>;

/// Endpoints of an edge in compact form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompactEdge {
    #[serde(rename = "f")]
    pub from: NodeId,
    #[serde(rename = "t")]
    pub to: NodeId,
}

/// Graph without incidence sets or payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactGraph {
    pub nodes: IndexSet<NodeId>,
    pub edges: IndexMap<EdgeId, CompactEdge>,
}

impl CompactGraph {
    pub fn to_json(&self) -> CompactResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CompactResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> CompactResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> CompactResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Decode straight into an indexed graph
    pub fn into_graph<D>(self) -> CompactResult<Graph<D>> {
        Ok(Graph::from_compact(&self)?)
    }
}

impl<D> Graph<D> {
    /// Drop incidence sets and payloads
    pub fn to_compact(&self) -> CompactGraph {
        CompactGraph {
            nodes: self.node_ids().cloned().collect(),
            edges: self
                .edges()
                .map(|edge| {
                    (
                        edge.id.clone(),
                        CompactEdge {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Rebuild an indexed graph from its compact form
    ///
    /// Nodes come back without payload. Fails if an edge names a node that
    /// is not listed.
    pub fn from_compact(compact: &CompactGraph) -> GraphResult<Self> {
        let mut graph = Graph::new();

        for id in &compact.nodes {
            graph.insert_node_in_place(id.clone(), None);
        }
        for (id, CompactEdge { from, to }) in &compact.edges {
            graph.insert_edge_in_place(Edge::new(id, from, to))?;
        }

        debug!(
            "Restored graph from compact form: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

impl<D> From<&Graph<D>> for CompactGraph {
    fn from(graph: &Graph<D>) -> Self {
        graph.to_compact()
    }
}

impl<D> TryFrom<&CompactGraph> for Graph<D> {
    type Error = GraphError;

    fn try_from(compact: &CompactGraph) -> GraphResult<Self> {
        Graph::from_compact(compact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_graph() -> Graph {
        Graph::new()
            .add_node("0")
            .add_node("1")
            .add_node("2")
            .add_edge("0-1", "0", "1")
            .unwrap()
            .add_edge("0-2", "0", "2")
            .unwrap()
    }

    #[test]
    fn test_full_to_compact_to_full() {
        let graph = test_graph();
        let restored: Graph = Graph::from_compact(&graph.to_compact()).unwrap();

        assert_eq!(restored, graph);
        restored.check_integrity().unwrap();
    }

    #[test]
    fn test_compact_to_full_to_compact() {
        let compact = test_graph().to_compact();
        let graph: Graph = Graph::from_compact(&compact).unwrap();

        assert_eq!(graph.to_compact(), compact);
    }

    #[test]
    fn test_compact_drops_payload() {
        let graph: Graph<i32> = Graph::new().add_node_with_data("0", 42);
        let restored: Graph<i32> = Graph::from_compact(&graph.to_compact()).unwrap();

        assert!(restored.has_node("0"));
        assert_eq!(restored.get_node("0").unwrap().data, None);
    }

    #[test]
    fn test_json_uses_short_keys() {
        let json = test_graph().to_compact().to_json().unwrap();

        assert!(json.contains("\"f\":\"0\""));
        assert!(json.contains("\"t\":\"1\""));
        assert!(!json.contains("edges_from"));
    }

    #[test]
    fn test_compact_is_smaller_than_full() {
        let graph = test_graph();
        let full = serde_json::to_string(&(graph.get_nodes(), graph.get_edges())).unwrap();
        let compact = graph.to_compact().to_json().unwrap();

        assert!(full.len() > compact.len());
    }

    #[test]
    fn test_bincode_round_trip() {
        let compact = test_graph().to_compact();
        let bytes = compact.to_bytes().unwrap();

        assert_eq!(CompactGraph::from_bytes(&bytes).unwrap(), compact);
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let json = r#"{"nodes":["0"],"edges":{"0-1":{"f":"0","t":"1"}}}"#;
        let compact = CompactGraph::from_json(json).unwrap();

        let err = compact.into_graph::<()>().unwrap_err();
        assert!(matches!(err, CompactError::Graph(GraphError::MissingEnd { .. })));
    }
}
