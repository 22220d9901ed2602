//! Arena index over a workflow graph.
//!
//! # Overview
//!
//! Every node gets a dense integer index (its position in the input node
//! list) and adjacency is stored as `Vec<Vec<usize>>` keyed by that index.
//! All downstream stages (layering, critical path, placement, routing)
//! work on indices, so "visited" and "in-degree" bookkeeping are plain
//! fixed-size vectors.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "B runs after A". `forward[A]` lists `B` and
//! `reverse[B]` lists `A`. Neighbor lists keep input edge order, and a
//! duplicated edge appears twice.
//!
//! ## Dangling Edges
//!
//! An edge whose `source` or `target` is not a known node id is recorded
//! as dangling and contributes nothing to adjacency. No node entry is
//! created for the unknown id.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use flowdag_core::{Edge, Node, WorkflowGraph};
use petgraph::graph::DiGraph;
use tracing::{instrument, warn};

/// Forward and reverse adjacency for one graph snapshot.
///
/// Borrows the graph: building the index copies no node or edge data.
#[derive(Debug, Clone)]
pub struct GraphIndex<'g> {
    graph: &'g WorkflowGraph,
    ids: HashMap<&'g str, usize>,
    forward: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
    /// Resolved `(source, target)` per edge, `None` when dangling.
    endpoints: Vec<Option<(usize, usize)>>,
    dangling: Vec<usize>,
    duplicates: Vec<usize>,
}

impl<'g> GraphIndex<'g> {
    /// Build the index in O(N + E).
    ///
    /// A repeated node id resolves to its first occurrence; later copies
    /// stay in the arena as isolated nodes so every input node is still
    /// laid out.
    #[must_use]
    #[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
    pub fn build(graph: &'g WorkflowGraph) -> Self {
        let node_count = graph.nodes.len();
        let mut ids: HashMap<&'g str, usize> = HashMap::with_capacity(node_count);
        let mut duplicates = Vec::new();

        for (idx, node) in graph.nodes.iter().enumerate() {
            if ids.contains_key(node.id.as_str()) {
                warn!(node_id = %node.id, "duplicate node id; later copy is left unconnected");
                duplicates.push(idx);
            } else {
                ids.insert(node.id.as_str(), idx);
            }
        }

        let mut forward = vec![Vec::new(); node_count];
        let mut reverse = vec![Vec::new(); node_count];
        let mut endpoints = Vec::with_capacity(graph.edges.len());
        let mut dangling = Vec::new();

        for (edge_idx, edge) in graph.edges.iter().enumerate() {
            let resolved = ids
                .get(edge.source.as_str())
                .copied()
                .zip(ids.get(edge.target.as_str()).copied());

            match resolved {
                Some((source, target)) => {
                    forward[source].push(target);
                    reverse[target].push(source);
                }
                None => {
                    warn!(
                        edge_id = %edge.id,
                        source = %edge.source,
                        target = %edge.target,
                        "edge references an unknown node"
                    );
                    dangling.push(edge_idx);
                }
            }
            endpoints.push(resolved);
        }

        Self {
            graph,
            ids,
            forward,
            reverse,
            endpoints,
            dangling,
            duplicates,
        }
    }

    /// The graph this index was built from.
    #[must_use]
    pub const fn graph(&self) -> &'g WorkflowGraph {
        self.graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Look up the arena index for a node id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    #[must_use]
    pub fn node(&self, idx: usize) -> Option<&'g Node> {
        self.graph.nodes.get(idx)
    }

    /// Id of the node at `idx`, or `""` if out of range.
    #[must_use]
    pub fn id(&self, idx: usize) -> &'g str {
        self.graph.nodes.get(idx).map_or("", |n| n.id.as_str())
    }

    /// Successors of `idx` in input edge order.
    #[must_use]
    pub fn forward(&self, idx: usize) -> &[usize] {
        self.forward.get(idx).map(Vec::as_slice).unwrap_or_default()
    }

    /// Predecessors of `idx` in input edge order.
    #[must_use]
    pub fn reverse(&self, idx: usize) -> &[usize] {
        self.reverse.get(idx).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn in_degree(&self, idx: usize) -> usize {
        self.reverse(idx).len()
    }

    /// Resolved `(source, target)` indices of the edge at `edge_idx`.
    #[must_use]
    pub fn endpoints(&self, edge_idx: usize) -> Option<(usize, usize)> {
        self.endpoints.get(edge_idx).copied().flatten()
    }

    /// Edges whose source or target is not a known node.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &'g Edge> + '_ {
        self.dangling
            .iter()
            .filter_map(|&edge_idx| self.graph.edges.get(edge_idx))
    }

    /// Nodes whose id repeats an earlier node's id.
    pub fn duplicate_nodes(&self) -> impl Iterator<Item = &'g Node> + '_ {
        self.duplicates
            .iter()
            .filter_map(|&idx| self.graph.nodes.get(idx))
    }

    /// Successor ids of the node named `id`, or `None` for an unknown id.
    #[must_use]
    pub fn successors(&self, id: &str) -> Option<Vec<&'g str>> {
        let idx = self.index_of(id)?;
        Some(self.forward(idx).iter().map(|&t| self.id(t)).collect())
    }

    /// Predecessor ids of the node named `id`, or `None` for an unknown id.
    #[must_use]
    pub fn predecessors(&self, id: &str) -> Option<Vec<&'g str>> {
        let idx = self.index_of(id)?;
        Some(self.reverse(idx).iter().map(|&s| self.id(s)).collect())
    }

    /// BLAKE3 fingerprint of node ids and edges, in input order.
    ///
    /// Covers everything node and edge positions depend on. Callers can
    /// compare it against a stored value to decide whether the layout must
    /// be recomputed.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for node in &self.graph.nodes {
            hasher.update(b"n\x00");
            hasher.update(node.id.as_bytes());
            hasher.update(b"\x00");
        }
        for edge in &self.graph.edges {
            hasher.update(b"e\x00");
            hasher.update(edge.id.as_bytes());
            hasher.update(b"\x00");
            hasher.update(edge.source.as_bytes());
            hasher.update(b"\x00");
            hasher.update(edge.target.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Copy the resolved topology into a petgraph [`DiGraph`].
    ///
    /// Node `i` of the result is arena index `i`; dangling edges are
    /// omitted.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<&'g str, ()> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let nodes: Vec<_> = (0..self.node_count())
            .map(|idx| graph.add_node(self.id(idx)))
            .collect();
        for &(source, target) in self.endpoints.iter().flatten() {
            graph.add_edge(nodes[source], nodes[target], ());
        }
        graph
    }
}
