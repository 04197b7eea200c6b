//! Node record
//!
//! A node carries an optional opaque payload plus the incidence index: the ids
//! of the edges leaving it and the ids of the edges arriving at it. The store
//! is the only writer of the incidence sets.

use super::types::{EdgeId, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A node in the graph
///
/// Nodes have:
/// - A unique ID
/// - An optional payload, never interpreted by the graph
/// - The ids of outgoing edges (`edges_from`)
/// - The ids of incoming edges (`edges_to`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<D = ()> {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Opaque payload
    pub data: Option<D>,

    /// Edges whose source is this node, in insertion order
    pub edges_from: IndexSet<EdgeId>,

    /// Edges whose target is this node, in insertion order
    pub edges_to: IndexSet<EdgeId>,
}

impl<D> Node<D> {
    /// Create a node with no incident edges
    pub fn new(id: impl Into<NodeId>, data: Option<D>) -> Self {
        Node {
            id: id.into(),
            data,
            edges_from: IndexSet::new(),
            edges_to: IndexSet::new(),
        }
    }

    /// Number of outgoing edges
    pub fn out_degree(&self) -> usize {
        self.edges_from.len()
    }

    /// Number of incoming edges
    pub fn in_degree(&self) -> usize {
        self.edges_to.len()
    }

    /// Total number of incident edges (a self-loop counts twice)
    pub fn degree(&self) -> usize {
        self.out_degree() + self.in_degree()
    }

    /// Incident edge ids: outgoing first, then incoming ones not already listed
    pub fn incident_edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges_from
            .iter()
            .chain(self.edges_to.iter().filter(move |id| !self.edges_from.contains(*id)))
    }

    /// Check whether the node has no incident edges
    pub fn is_isolated(&self) -> bool {
        self.edges_from.is_empty() && self.edges_to.is_empty()
    }
}
