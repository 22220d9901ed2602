use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Edge, Node};

/// An immutable snapshot of a workflow as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl WorkflowGraph {
    #[must_use]
    pub const fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            metadata: None,
        }
    }

    /// Decode a graph from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] if `json` does not match the workflow
    /// schema (unknown node type, missing `id`, malformed JSON, ...).
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by id (first match).
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
