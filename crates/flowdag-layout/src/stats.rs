//! Summary statistics for a workflow graph.
//!
//! # Statistics Provided
//!
//! - **total_nodes** / **total_edges**: input counts (dangling edges
//!   included).
//! - **layers**: number of topological layers.
//! - **max_nodes_per_layer**: size of the widest layer.
//! - **longest_path**: node count of the critical path.
//! - **nodes_by_type** / **nodes_by_status**: tallies with every enum value
//!   present, so absent categories read as explicit zeros. Nodes without a
//!   status count toward no status.
//!
//! `layers` and `max_nodes_per_layer` come from a placement run with
//! [`LayoutParams::reference`] dimensions. Both are properties of the
//! topology alone; the reference run is not the rendered layout.

use std::collections::BTreeMap;

use flowdag_core::{LayoutParams, NodeStatus, NodeType, WorkflowGraph};
use serde::Serialize;
use tracing::instrument;

use crate::critical_path::longest_path_length;
use crate::graph::{GraphIndex, Layering};
use crate::layout::place_nodes;

// ---------------------------------------------------------------------------
// WorkflowStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub layers: usize,
    pub max_nodes_per_layer: usize,
    pub longest_path: usize,
    pub nodes_by_type: BTreeMap<NodeType, usize>,
    pub nodes_by_status: BTreeMap<NodeStatus, usize>,
}

impl WorkflowStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn compute(graph: &WorkflowGraph) -> Self {
        let index = GraphIndex::build(graph);
        let layering = Layering::compute(&index);
        Self::from_parts(&index, &layering)
    }

    /// Compute statistics from an index and layering already built.
    #[must_use]
    #[instrument(skip_all, fields(nodes = index.node_count()))]
    pub fn from_parts(index: &GraphIndex<'_>, layering: &Layering) -> Self {
        let graph = index.graph();

        let mut nodes_by_type: BTreeMap<NodeType, usize> =
            NodeType::ALL.into_iter().map(|t| (t, 0)).collect();
        let mut nodes_by_status: BTreeMap<NodeStatus, usize> =
            NodeStatus::ALL.into_iter().map(|s| (s, 0)).collect();

        for node in &graph.nodes {
            *nodes_by_type.entry(node.node_type).or_default() += 1;
            if let Some(status) = node.status {
                *nodes_by_status.entry(status).or_default() += 1;
            }
        }

        let (layers, max_nodes_per_layer) = reference_shape(index, layering);

        Self {
            total_nodes: graph.nodes.len(),
            total_edges: graph.edges.len(),
            layers,
            max_nodes_per_layer,
            longest_path: longest_path_length(index, layering),
            nodes_by_type,
            nodes_by_status,
        }
    }

    /// Nodes that carry a status.
    #[must_use]
    pub fn nodes_with_status(&self) -> usize {
        self.nodes_by_status.values().sum()
    }

    /// Count of nodes in `status`.
    #[must_use]
    pub fn status_count(&self, status: NodeStatus) -> usize {
        self.nodes_by_status.get(&status).copied().unwrap_or(0)
    }

    /// Count of nodes of `node_type`.
    #[must_use]
    pub fn type_count(&self, node_type: NodeType) -> usize {
        self.nodes_by_type.get(&node_type).copied().unwrap_or(0)
    }
}

/// Layer count and widest layer, read off a reference-dimension placement.
fn reference_shape(index: &GraphIndex<'_>, layering: &Layering) -> (usize, usize) {
    let placed = place_nodes(index, layering, &LayoutParams::reference());

    let mut per_layer: Vec<usize> = Vec::new();
    for node in &placed {
        if per_layer.len() <= node.layer {
            per_layer.resize(node.layer + 1, 0);
        }
        per_layer[node.layer] += 1;
    }

    (
        per_layer.len(),
        per_layer.iter().copied().max().unwrap_or(0),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
