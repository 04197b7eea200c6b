//! Pure Graph
//!
//! An in-memory directed multigraph with value semantics: every update returns
//! a new graph and leaves the original untouched.
//!
//! # Modules
//!
//! - [`graph`]: nodes, edges, the incidence index and the compact encoding
//! - [`algo`]: reachability closure and the connected-component tree check
//!
//! ## Example Usage
//!
//! ```rust
//! use puregraph::algo::{get_nodes_of_subgraph_from, has_cycles_in_connected_component};
//! use puregraph::Graph;
//!
//! let empty: Graph = Graph::new();
//! let graph = empty
//!     .add_node("a")
//!     .add_node("b")
//!     .add_node("c")
//!     .add_edge("a-b", "a", "b")
//!     .unwrap()
//!     .add_edge("b-c", "b", "c")
//!     .unwrap();
//!
//! assert!(empty.is_empty());
//! assert_eq!(get_nodes_of_subgraph_from(&graph, "b").unwrap().len(), 2);
//! assert!(!has_cycles_in_connected_component(&graph, "a").unwrap());
//!
//! let cyclic = graph.add_edge("c-a", "c", "a").unwrap();
//! assert!(has_cycles_in_connected_component(&cyclic, "a").unwrap());
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod graph;

// Re-export main types for convenience
pub use algo::StructureConfig;
pub use graph::{
    CompactError, CompactGraph, Edge, EdgeId, Graph, GraphBuilder, GraphError, GraphResult, Node,
    NodeId,
};

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
