//! Graph builder
//!
//! Records node and edge insertions and folds them over an empty graph in
//! order. Building works on a single owned graph, so it avoids the per-step
//! copy that the value-returning `Graph` methods make.

use super::edge::Edge;
use super::store::{Graph, GraphResult};
use super::types::{EdgeId, NodeId};

#[derive(Debug, Clone)]
enum Step<D> {
    Node(NodeId, Option<D>),
    Edge(Edge),
}

/// Builder that folds a sequence of insertions over an empty graph
///
/// ```
/// use puregraph::GraphBuilder;
///
/// let graph = GraphBuilder::<()>::new()
///     .node("0")
///     .node("1")
///     .edge("0-1", "0", "1")
///     .build()
///     .unwrap();
///
/// assert!(graph.has_edge_from_to("0", "1"));
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<D = ()> {
    steps: Vec<Step<D>>,
}

impl<D> Default for GraphBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> GraphBuilder<D> {
    pub fn new() -> Self {
        GraphBuilder { steps: Vec::new() }
    }

    /// Add a node without payload
    pub fn node(mut self, id: impl Into<NodeId>) -> Self {
        self.steps.push(Step::Node(id.into(), None));
        self
    }

    /// Add a node with payload
    pub fn node_with_data(mut self, id: impl Into<NodeId>, data: D) -> Self {
        self.steps.push(Step::Node(id.into(), Some(data)));
        self
    }

    /// Add a directed edge; the endpoints must be added before it
    pub fn edge(
        mut self,
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> Self {
        self.steps.push(Step::Edge(Edge::new(id, from, to)));
        self
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply the recorded steps in order
    ///
    /// Stops at the first edge whose endpoints do not exist at that point.
    pub fn build(self) -> GraphResult<Graph<D>> {
        self.steps
            .into_iter()
            .try_fold(Graph::new(), |mut graph, step| {
                match step {
                    Step::Node(id, data) => {
                        graph.insert_node_in_place(id, data);
                    }
                    Step::Edge(edge) => graph.insert_edge_in_place(edge)?,
                }
                Ok(graph)
            })
    }
}
