//! Workflow graph model.
//!
//! These types mirror the graph object the host application hands to the
//! engine: camelCase field names, lowercase enum values. The engine only
//! ever reads them; positioned output is a derived copy.

mod edge;
mod graph;
mod node;

pub use edge::{ConditionType, Edge, EdgeStyle};
pub use graph::WorkflowGraph;
pub use node::{Node, NodeMetadata, NodeStatus, NodeType, ParseEnumError};
