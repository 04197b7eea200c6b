//! Graph algorithms
//!
//! Read-only analyses built on the `Graph` query API:
//! - reachability closure and induced subgraphs
//! - tree check for the connected component of a node

pub mod structure;
pub mod subgraph;

pub use structure::{
    has_cycles_in_connected_component, has_cycles_in_connected_component_with, StructureConfig,
    DEFAULT_MAX_ROUNDS,
};
pub use subgraph::{
    closure, get_nodes_of_subgraph_from, get_nodes_of_subgraph_to, get_subgraph_from,
    get_subgraph_to, Direction,
};
