//! Core graph implementation
//!
//! This module implements the value-semantics graph model with:
//! - Nodes carrying an optional opaque payload
//! - Directed edges identified by their own id
//! - Multiple edges between the same nodes
//! - A per-node incidence index kept in sync on every update
//! - A compact encoding without the incidence index

pub mod builder;
pub mod compact;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use builder::GraphBuilder;
pub use compact::{CompactEdge, CompactError, CompactGraph, CompactResult};
pub use edge::Edge;
pub use node::Node;
pub use store::{Graph, GraphError, GraphResult};
pub use types::{EdgeId, NodeId};
