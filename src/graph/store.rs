//! Persistent in-memory graph store
//!
//! `Graph` is a value: every write takes `&self` and hands back a new graph,
//! leaving the receiver untouched. Callers thread the returned value into the
//! next call to build up a graph.
//!
//! Storage layout:
//! - nodes: NodeId -> Node (insertion ordered)
//! - edges: EdgeId -> Edge (insertion ordered)
//! - per node: `edges_from` / `edges_to` incidence sets
//!
//! The incidence sets duplicate information already present in the edge map,
//! so every mutation goes through the small set of `*_in_place` helpers at the
//! bottom of this file. They hold the following invariants:
//! - both endpoints of every edge exist as nodes
//! - an edge id is in `edges_from` of exactly its source node
//! - an edge id is in `edges_to` of exactly its target node

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, NodeId};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("No edge from {0} to {1}")]
    EdgeFromToNotFound(NodeId, NodeId),

    #[error("Invalid edge {edge}: both endpoints missing, nodes {start} and {end} do not exist")]
    MissingEndpoints {
        edge: EdgeId,
        start: NodeId,
        end: NodeId,
    },

    #[error("Invalid edge {edge}: start missing, node {start} does not exist")]
    MissingStart { edge: EdgeId, start: NodeId },

    #[error("Invalid edge {edge}: end missing, node {end} does not exist")]
    MissingEnd { edge: EdgeId, end: NodeId },

    #[error("Incidence index out of sync for edge {edge} at node {node}")]
    InconsistentIndex { edge: EdgeId, node: NodeId },

    #[error("Resource exhausted: made more than {rounds} checks")]
    ResourceExhausted { rounds: usize },
}

impl GraphError {
    /// A required node or edge is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_)
                | GraphError::EdgeNotFound(_)
                | GraphError::EdgeFromToNotFound(..)
        )
    }

    /// An edge names a node that does not exist
    pub fn is_dangling_endpoint(&self) -> bool {
        matches!(
            self,
            GraphError::MissingEndpoints { .. }
                | GraphError::MissingStart { .. }
                | GraphError::MissingEnd { .. }
        )
    }

    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, GraphError::ResourceExhausted { .. })
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Immutable directed multigraph with an incidence index
///
/// Node payloads are opaque `D` values and are never inspected by the graph.
/// Equality compares nodes, payloads, edges and incidence sets and ignores
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<D = ()> {
    nodes: IndexMap<NodeId, Node<D>>,
    edges: IndexMap<EdgeId, Edge>,
}

impl<D> Default for Graph<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Graph<D> {
    /// Create a new empty graph
    pub fn new() -> Self {
        Graph {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------
    // Node queries
    // ------------------------------------------------------------------

    /// Check if a node exists
    pub fn has_node(&self, id: impl AsRef<str>) -> bool {
        self.nodes.contains_key(id.as_ref())
    }

    /// Get a node by ID
    pub fn get_node(&self, id: impl AsRef<str>) -> GraphResult<&Node<D>> {
        let id = id.as_ref();
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))
    }

    /// Get all nodes in insertion order
    pub fn get_nodes(&self) -> Vec<&Node<D>> {
        self.nodes.values().collect()
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<D>> {
        self.nodes.values()
    }

    /// Iterate over all node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    // ------------------------------------------------------------------
    // Edge queries
    // ------------------------------------------------------------------

    /// Get all edges in insertion order
    pub fn get_edges(&self) -> Vec<&Edge> {
        self.edges.values().collect()
    }

    /// Iterate over all edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Check if an edge exists
    pub fn has_edge_with_id(&self, id: impl AsRef<str>) -> bool {
        self.edges.contains_key(id.as_ref())
    }

    /// Get an edge by ID
    pub fn get_edge_with_id(&self, id: impl AsRef<str>) -> GraphResult<&Edge> {
        let id = id.as_ref();
        self.edges
            .get(id)
            .ok_or_else(|| GraphError::EdgeNotFound(EdgeId::from(id)))
    }

    /// Check if some edge goes from `from` to `to`
    ///
    /// Returns false when either node is absent.
    pub fn has_edge_from_to(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> bool {
        let to = to.as_ref();
        self.outgoing(from.as_ref()).any(|edge| edge.ends_at(to))
    }

    /// Check if an edge joins the two nodes in either direction
    pub fn has_edge_between(&self, a: impl AsRef<str>, b: impl AsRef<str>) -> bool {
        let (a, b) = (a.as_ref(), b.as_ref());
        self.has_edge_from_to(a, b) || self.has_edge_from_to(b, a)
    }

    /// Get the first edge going from `from` to `to`
    pub fn get_edge_from_to(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> GraphResult<&Edge> {
        let (from, to) = (from.as_ref(), to.as_ref());
        self.outgoing(from)
            .find(|edge| edge.ends_at(to))
            .ok_or_else(|| GraphError::EdgeFromToNotFound(NodeId::from(from), NodeId::from(to)))
    }

    /// Get every edge going from `from` to `to`
    ///
    /// Empty when nothing matches or either node is absent.
    pub fn get_edges_from_to(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> Vec<&Edge> {
        let to = to.as_ref();
        self.outgoing(from.as_ref())
            .filter(|edge| edge.ends_at(to))
            .collect()
    }

    /// Get every edge joining the two nodes: `a -> b` edges first, then `b -> a`
    pub fn get_edges_between(&self, a: impl AsRef<str>, b: impl AsRef<str>) -> Vec<&Edge> {
        let (a, b) = (a.as_ref(), b.as_ref());
        let mut edges = self.get_edges_from_to(a, b);
        if a != b {
            edges.extend(self.get_edges_from_to(b, a));
        }
        edges
    }

    /// Get all outgoing edges from a node
    pub fn get_edges_from_node(&self, id: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        let node = self.get_node(id)?;
        Ok(self.resolve_edges(node.edges_from.iter()))
    }

    /// Get all incoming edges to a node
    pub fn get_edges_to_node(&self, id: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        let node = self.get_node(id)?;
        Ok(self.resolve_edges(node.edges_to.iter()))
    }

    /// Get all edges touching a node: outgoing first, then incoming
    ///
    /// A self-loop is listed once.
    pub fn get_edges_incident_to_node(&self, id: impl AsRef<str>) -> GraphResult<Vec<&Edge>> {
        let node = self.get_node(id)?;
        Ok(self.resolve_edges(node.incident_edge_ids()))
    }

    // ------------------------------------------------------------------
    // Neighbourhood queries
    // ------------------------------------------------------------------

    /// Get the nodes joined to `id` by an edge in either direction
    ///
    /// Deduplicated, in incidence order, never containing `id` itself.
    pub fn get_nodes_adjacent_to(&self, id: impl AsRef<str>) -> GraphResult<Vec<&NodeId>> {
        let id = id.as_ref();
        let node = self.get_node(id)?;

        let mut adjacent: IndexSet<&NodeId> = IndexSet::new();
        for edge in self.resolve_edges(node.incident_edge_ids()) {
            for endpoint in [&edge.from, &edge.to] {
                if endpoint.as_str() != id {
                    adjacent.insert(endpoint);
                }
            }
        }

        Ok(adjacent.into_iter().collect())
    }

    /// Get the sources of the edges arriving at `id` (one entry per edge)
    pub fn get_nodes_to(&self, id: impl AsRef<str>) -> GraphResult<Vec<&NodeId>> {
        Ok(self
            .get_edges_to_node(id)?
            .into_iter()
            .map(|edge| &edge.from)
            .collect())
    }

    /// Get the targets of the edges leaving `id` (one entry per edge)
    pub fn get_nodes_from(&self, id: impl AsRef<str>) -> GraphResult<Vec<&NodeId>> {
        Ok(self
            .get_edges_from_node(id)?
            .into_iter()
            .map(|edge| &edge.to)
            .collect())
    }

    /// Build a graph with every payload replaced by `f(data, id)`
    ///
    /// Ids, edges and incidence sets are carried over unchanged.
    pub fn map_nodes<E, F>(&self, mut f: F) -> Graph<E>
    where
        F: FnMut(Option<&D>, &NodeId) -> Option<E>,
    {
        let nodes = self
            .nodes
            .iter()
            .map(|(id, node)| {
                let mapped = Node {
                    id: id.clone(),
                    data: f(node.data.as_ref(), id),
                    edges_from: node.edges_from.clone(),
                    edges_to: node.edges_to.clone(),
                };
                (id.clone(), mapped)
            })
            .collect();

        Graph {
            nodes,
            edges: self.edges.clone(),
        }
    }

    /// Verify that the edge map and the incidence sets agree
    ///
    /// Returns the first violation found.
    pub fn check_integrity(&self) -> GraphResult<()> {
        for edge in self.edges.values() {
            self.check_endpoints(edge)?;

            let source = &self.nodes[edge.from.as_str()];
            if !source.edges_from.contains(&edge.id) {
                return Err(GraphError::InconsistentIndex {
                    edge: edge.id.clone(),
                    node: edge.from.clone(),
                });
            }
            let target = &self.nodes[edge.to.as_str()];
            if !target.edges_to.contains(&edge.id) {
                return Err(GraphError::InconsistentIndex {
                    edge: edge.id.clone(),
                    node: edge.to.clone(),
                });
            }
        }

        for (id, node) in &self.nodes {
            for edge_id in &node.edges_from {
                match self.edges.get(edge_id) {
                    Some(edge) if &edge.from == id => {}
                    _ => {
                        return Err(GraphError::InconsistentIndex {
                            edge: edge_id.clone(),
                            node: id.clone(),
                        })
                    }
                }
            }
            for edge_id in &node.edges_to {
                match self.edges.get(edge_id) {
                    Some(edge) if &edge.to == id => {}
                    _ => {
                        return Err(GraphError::InconsistentIndex {
                            edge: edge_id.clone(),
                            node: id.clone(),
                        })
                    }
                }
            }
        }

        Ok(())
    }

    fn outgoing<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a Edge> {
        let edges = &self.edges;
        self.nodes
            .get(from)
            .into_iter()
            .flat_map(|node| node.edges_from.iter())
            .filter_map(move |edge_id| edges.get(edge_id))
    }

    fn resolve_edges<'a>(&'a self, ids: impl Iterator<Item = &'a EdgeId>) -> Vec<&'a Edge> {
        ids.filter_map(|id| self.edges.get(id)).collect()
    }

    fn check_endpoints(&self, edge: &Edge) -> GraphResult<()> {
        let has_start = self.nodes.contains_key(&edge.from);
        let has_end = self.nodes.contains_key(&edge.to);

        match (has_start, has_end) {
            (true, true) => Ok(()),
            (false, false) => Err(GraphError::MissingEndpoints {
                edge: edge.id.clone(),
                start: edge.from.clone(),
                end: edge.to.clone(),
            }),
            (false, true) => Err(GraphError::MissingStart {
                edge: edge.id.clone(),
                start: edge.from.clone(),
            }),
            (true, false) => Err(GraphError::MissingEnd {
                edge: edge.id.clone(),
                end: edge.to.clone(),
            }),
        }
    }
}

impl<D: Clone> Graph<D> {
    // ------------------------------------------------------------------
    // Node updates
    // ------------------------------------------------------------------

    /// Add a node without payload
    ///
    /// Adding an id that already exists returns an identical graph.
    pub fn add_node(&self, id: impl Into<NodeId>) -> Self {
        self.with(|graph| {
            graph.insert_node_in_place(id.into(), None);
        })
    }

    /// Add a node carrying `data`
    ///
    /// Adding an id that already exists keeps the original payload.
    pub fn add_node_with_data(&self, id: impl Into<NodeId>, data: D) -> Self {
        self.with(|graph| {
            graph.insert_node_in_place(id.into(), Some(data));
        })
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&self, id: impl AsRef<str>) -> Self {
        self.with(|graph| {
            graph.remove_node_in_place(id.as_ref());
        })
    }

    /// Replace the payload of an existing node
    pub fn set_node_data(&self, id: impl AsRef<str>, data: D) -> GraphResult<Self> {
        let id = id.as_ref();
        if !self.has_node(id) {
            return Err(GraphError::NodeNotFound(NodeId::from(id)));
        }
        Ok(self.map_node_data(id, |_| Some(data)))
    }

    /// Replace the payload of a node with `f(current)`; no-op if the node is absent
    pub fn map_node_data<F>(&self, id: impl AsRef<str>, f: F) -> Self
    where
        F: FnOnce(Option<D>) -> Option<D>,
    {
        self.with(|graph| {
            if let Some(node) = graph.nodes.get_mut(id.as_ref()) {
                node.data = f(node.data.take());
            }
        })
    }

    // ------------------------------------------------------------------
    // Edge updates
    // ------------------------------------------------------------------

    /// Add a directed edge from `from` to `to`
    ///
    /// Both endpoints must already exist. Re-adding an identical edge is a
    /// no-op; reusing an id with other endpoints replaces the old edge.
    pub fn add_edge(
        &self,
        edge_id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> GraphResult<Self> {
        let edge = Edge::new(edge_id, from, to);
        self.check_endpoints(&edge)?;

        if self.edges.get(&edge.id) == Some(&edge) {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.insert_edge_in_place(edge)?;
        Ok(next)
    }

    /// Remove an edge by ID; no-op if it does not exist
    pub fn remove_edge_with_id(&self, id: impl AsRef<str>) -> Self {
        self.with(|graph| {
            graph.remove_edge_in_place(id.as_ref());
        })
    }

    /// Remove every edge going from `from` to `to`
    pub fn remove_edges_from_to(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> Self {
        let ids = edge_ids(self.get_edges_from_to(from, to));
        self.without_edges(&ids)
    }

    /// Remove every edge joining the two nodes in either direction
    pub fn remove_edges_between(&self, a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        let ids = edge_ids(self.get_edges_between(a, b));
        self.without_edges(&ids)
    }

    /// Remove every edge arriving at `id`
    pub fn remove_edges_to_node(&self, id: impl AsRef<str>) -> GraphResult<Self> {
        let ids = edge_ids(self.get_edges_to_node(id)?);
        Ok(self.without_edges(&ids))
    }

    /// Remove every edge leaving `id`
    pub fn remove_edges_from_node(&self, id: impl AsRef<str>) -> GraphResult<Self> {
        let ids = edge_ids(self.get_edges_from_node(id)?);
        Ok(self.without_edges(&ids))
    }

    /// Remove every edge touching `id`, keeping the node itself
    pub fn remove_edges_incident_to_node(&self, id: impl AsRef<str>) -> GraphResult<Self> {
        let ids = edge_ids(self.get_edges_incident_to_node(id)?);
        Ok(self.without_edges(&ids))
    }

    fn with(&self, update: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        update(&mut next);
        next
    }

    fn without_edges(&self, ids: &[EdgeId]) -> Self {
        self.with(|graph| {
            for id in ids {
                graph.remove_edge_in_place(id.as_str());
            }
        })
    }
}

// ----------------------------------------------------------------------
// Incidence index maintenance
//
// These are the only functions that write to `nodes`/`edges`. Each leaves the
// graph satisfying the invariants listed in the module docs.
// ----------------------------------------------------------------------

impl<D> Graph<D> {
    /// Insert a node unless the id is taken; returns whether it was inserted
    pub(crate) fn insert_node_in_place(&mut self, id: NodeId, data: Option<D>) -> bool {
        if self.nodes.contains_key(&id) {
            trace!("Node {} already present, keeping existing payload", id);
            return false;
        }
        self.nodes.insert(id.clone(), Node::new(id, data));
        true
    }

    /// Insert an edge whose endpoints must exist, replacing any edge with the same id
    pub(crate) fn insert_edge_in_place(&mut self, edge: Edge) -> GraphResult<()> {
        self.check_endpoints(&edge)?;

        if let Some(previous) = self.remove_edge_in_place(edge.id.as_str()) {
            debug!(
                "Replacing edge {} ({} -> {}) with ({} -> {})",
                edge.id, previous.from, previous.to, edge.from, edge.to
            );
        }

        if let Some(source) = self.nodes.get_mut(&edge.from) {
            source.edges_from.insert(edge.id.clone());
        }
        if let Some(target) = self.nodes.get_mut(&edge.to) {
            target.edges_to.insert(edge.id.clone());
        }
        trace!("Added edge {} ({} -> {})", edge.id, edge.from, edge.to);
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Remove an edge and its two incidence entries
    pub(crate) fn remove_edge_in_place(&mut self, id: &str) -> Option<Edge> {
        let edge = self.edges.shift_remove(id)?;

        if let Some(source) = self.nodes.get_mut(&edge.from) {
            source.edges_from.shift_remove(id);
        }
        if let Some(target) = self.nodes.get_mut(&edge.to) {
            target.edges_to.shift_remove(id);
        }
        trace!("Removed edge {} ({} -> {})", edge.id, edge.from, edge.to);
        Some(edge)
    }

    /// Remove a node after cascading the removal to its incident edges
    pub(crate) fn remove_node_in_place(&mut self, id: &str) -> Option<Node<D>> {
        let incident: Vec<EdgeId> = self
            .nodes
            .get(id)?
            .incident_edge_ids()
            .cloned()
            .collect();

        if !incident.is_empty() {
            debug!("Removing node {} cascades to {} edges", id, incident.len());
        }
        for edge_id in &incident {
            self.remove_edge_in_place(edge_id.as_str());
        }

        self.nodes.shift_remove(id)
    }
}

fn edge_ids(edges: Vec<&Edge>) -> Vec<EdgeId> {
    edges.into_iter().map(|edge| edge.id.clone()).collect()
}
