//! Critical path analysis for the workflow graph.
//!
//! # Overview
//!
//! The critical path is the *longest* chain of dependent steps. Its length
//! is the minimum number of sequential steps the workflow needs, whatever
//! the parallelism.
//!
//! # Algorithm
//!
//! 1. Visit nodes in [`Layering`] order (topological order when the graph
//!    is acyclic).
//! 2. **Forward pass**: `depth[v] = 1 + max(depth[p])` over predecessors
//!    `p` already visited, with `max(∅) = 0`, so sources get depth 1. The
//!    predecessor that set the maximum is kept as `v`'s best parent; the
//!    first one encountered wins ties.
//! 3. The sink is the first visited node with the greatest depth.
//! 4. **Path reconstruction**: follow best-parent links back from the sink
//!    to a root, then reverse.
//!
//! A best parent is always visited before its child, so the backward walk
//! strictly moves to earlier nodes and terminates even when the graph has
//! cycles. Predecessors not yet visited (back-edges of a cycle) are
//! ignored.
//!
//! When several longest paths exist, the one returned is an artifact of
//! input order; any of them is an equally valid answer.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use flowdag_core::{Edge, WorkflowGraph};
use serde::Serialize;
use tracing::{instrument, trace};

use crate::graph::{GraphIndex, Layering};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Result of critical path analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPath {
    /// Node ids on the critical path, sources first.
    ///
    /// Empty when the graph has no nodes.
    pub node_ids: Vec<String>,
    /// Length of the longest path in nodes (0 for an empty graph).
    pub longest_path: usize,
    /// Position of each id in `node_ids`.
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl CriticalPath {
    /// Return an empty result for a graph with no nodes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    /// Return `true` if `node_id` lies on the critical path.
    #[must_use]
    pub fn contains(&self, node_id: &str) -> bool {
        self.positions.contains_key(node_id)
    }

    /// Return `true` if `edge` joins two consecutive critical-path nodes.
    #[must_use]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.positions
            .get(edge.source.as_str())
            .and_then(|&pos| self.node_ids.get(pos + 1))
            .is_some_and(|next| *next == edge.target)
    }

    /// Sum of the recorded run times along the path, in milliseconds.
    ///
    /// Nodes without a recorded duration contribute nothing.
    #[must_use]
    pub fn total_duration_ms(&self, graph: &WorkflowGraph) -> u64 {
        self.node_ids
            .iter()
            .filter_map(|id| graph.node(id))
            .filter_map(flowdag_core::Node::elapsed_ms)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Per-node longest-path depths and best parents, indexed by arena index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDepths {
    /// `depth[v]`: nodes on the longest path ending at `v` (0 = unvisited).
    pub depth: Vec<usize>,
    /// Predecessor that achieved `depth[v]`, `None` for roots.
    pub best_parent: Vec<Option<usize>>,
    /// First visited node with the greatest depth.
    pub sink: Option<usize>,
}

impl PathDepths {
    /// Run the forward pass over `layering`'s order.
    #[must_use]
    pub fn compute(index: &GraphIndex<'_>, layering: &Layering) -> Self {
        let n = index.node_count();
        let mut depth = vec![0; n];
        let mut best_parent = vec![None; n];
        let mut visited = FixedBitSet::with_capacity(n);
        let mut sink: Option<usize> = None;

        for v in layering.order() {
            let mut best: Option<usize> = None;
            let mut best_depth = 0;
            for &p in index.reverse(v) {
                if visited.contains(p) && depth[p] > best_depth {
                    best_depth = depth[p];
                    best = Some(p);
                }
            }

            depth[v] = best_depth + 1;
            best_parent[v] = best;
            visited.insert(v);

            if sink.is_none_or(|s| depth[v] > depth[s]) {
                sink = Some(v);
            }
        }

        Self {
            depth,
            best_parent,
            sink,
        }
    }

    /// Greatest depth over all nodes (0 for an empty graph).
    #[must_use]
    pub fn longest(&self) -> usize {
        self.sink.map_or(0, |s| self.depth[s])
    }

    /// Arena indices of the critical path, sources first.
    #[must_use]
    pub fn path(&self) -> Vec<usize> {
        let Some(sink) = self.sink else {
            return Vec::new();
        };

        let mut path = vec![sink];
        let mut current = sink;
        while let Some(parent) = self.best_parent[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Compute the critical path of the graph behind `index`.
#[must_use]
#[instrument(skip_all, fields(nodes = index.node_count()))]
pub fn compute_critical_path(index: &GraphIndex<'_>, layering: &Layering) -> CriticalPath {
    if index.node_count() == 0 {
        return CriticalPath::empty();
    }

    let depths = PathDepths::compute(index, layering);
    let node_ids: Vec<String> = depths
        .path()
        .into_iter()
        .map(|idx| index.id(idx).to_string())
        .collect();
    let positions = node_ids
        .iter()
        .enumerate()
        .map(|(pos, id)| (id.clone(), pos))
        .collect();

    trace!(longest = depths.longest(), "critical path computed");

    CriticalPath {
        longest_path: depths.longest(),
        node_ids,
        positions,
    }
}

/// Length of the longest path, without reconstructing it.
#[must_use]
pub fn longest_path_length(index: &GraphIndex<'_>, layering: &Layering) -> usize {
    PathDepths::compute(index, layering).longest()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
