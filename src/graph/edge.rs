//! Edge record
//!
//! Edges are directed and identified by their own id, so any number of edges
//! may join the same pair of nodes.

use super::types::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge between two nodes of the same graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub from: NodeId,

    /// Target node (edge goes TO this node)
    pub to: NodeId,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: impl Into<EdgeId>, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Edge {
            id: id.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: &str, node2: &str) -> bool {
        (self.from.as_str() == node1 && self.to.as_str() == node2)
            || (self.from.as_str() == node2 && self.to.as_str() == node1)
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: &str) -> bool {
        self.from.as_str() == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: &str) -> bool {
        self.to.as_str() == node
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint at all
    pub fn other_end(&self, node: &str) -> Option<&NodeId> {
        if self.from.as_str() == node {
            Some(&self.to)
        } else if self.to.as_str() == node {
            Some(&self.from)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_creation() {
        let edge = Edge::new("a-b", "a", "b");
        assert_eq!(edge.id, EdgeId::new("a-b"));
        assert_eq!(edge.from, NodeId::new("a"));
        assert_eq!(edge.to, NodeId::new("b"));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new("a-b", "a", "b");

        assert!(edge.starts_from("a"));
        assert!(!edge.starts_from("b"));
        assert!(edge.ends_at("b"));
        assert!(!edge.ends_at("a"));
    }

    #[test]
    fn test_edge_connects() {
        let edge = Edge::new("a-b", "a", "b");

        assert!(edge.connects("a", "b"));
        assert!(edge.connects("b", "a"));
        assert!(!edge.connects("a", "c"));
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new("a-b", "a", "b");

        assert_eq!(edge.other_end("a"), Some(&NodeId::new("b")));
        assert_eq!(edge.other_end("b"), Some(&NodeId::new("a")));
        assert_eq!(edge.other_end("c"), None);
    }
}
