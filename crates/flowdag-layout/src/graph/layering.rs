//! Topological layering (Kahn's algorithm, batched by layer).
//!
//! # Algorithm
//!
//! 1. In-degree of every node = length of its reverse adjacency.
//! 2. The first frontier holds every node with in-degree 0, in input order.
//! 3. Each round the whole frontier becomes the next layer. Every forward
//!    neighbor of the layer has its in-degree decremented (floored at 0);
//!    neighbors that reach 0 join the next frontier in discovery order.
//! 4. If the frontier is empty while nodes remain, the graph has a cycle
//!    (or a node whose parents never finish). The first unprocessed node
//!    in input order is **force-picked** as a single-node layer.
//!
//! Each round processes at least one node, so the loop runs at most N
//! times and every node lands in exactly one layer.
//!
//! With a cycle the result is complete but not a valid partial order: the
//! forced node may sit in a layer before one of its parents.

#![allow(clippy::module_name_repetitions)]

use tracing::{debug, instrument, trace};

use crate::graph::index::GraphIndex;

/// Layer assignment for every node of a [`GraphIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layering {
    layers: Vec<Vec<usize>>,
    /// Layer of each arena index.
    layer_of: Vec<usize>,
    /// Column (position within its layer) of each arena index.
    column_of: Vec<usize>,
    forced_picks: usize,
}

impl Layering {
    /// Layer every node of `index`.
    #[must_use]
    #[instrument(skip_all, fields(nodes = index.node_count()))]
    pub fn compute(index: &GraphIndex<'_>) -> Self {
        let n = index.node_count();
        let mut in_degree: Vec<usize> = (0..n).map(|idx| index.in_degree(idx)).collect();
        let mut processed = vec![false; n];
        let mut layer_of = vec![0; n];
        let mut column_of = vec![0; n];
        let mut layers: Vec<Vec<usize>> = Vec::new();
        let mut forced_picks = 0;

        let mut frontier: Vec<usize> = (0..n).filter(|&idx| in_degree[idx] == 0).collect();
        // Every index below `cursor` is processed.
        let mut cursor = 0;
        let mut remaining = n;

        while remaining > 0 {
            let layer = if frontier.is_empty() {
                let Some(offset) = processed[cursor..].iter().position(|done| !done) else {
                    break;
                };
                cursor += offset;
                forced_picks += 1;
                debug!(
                    node_id = index.id(cursor),
                    layer = layers.len(),
                    "no zero in-degree node left; forcing pick"
                );
                vec![cursor]
            } else {
                std::mem::take(&mut frontier)
            };

            for (column, &idx) in layer.iter().enumerate() {
                processed[idx] = true;
                layer_of[idx] = layers.len();
                column_of[idx] = column;
            }
            remaining -= layer.len();

            for &idx in &layer {
                for &next in index.forward(idx) {
                    if in_degree[next] == 0 {
                        continue;
                    }
                    in_degree[next] -= 1;
                    if in_degree[next] == 0 && !processed[next] {
                        frontier.push(next);
                    }
                }
            }

            trace!(layer = layers.len(), width = layer.len(), "layer emitted");
            layers.push(layer);
        }

        Self {
            layers,
            layer_of,
            column_of,
            forced_picks,
        }
    }

    /// Layers in order; each holds arena indices in column order.
    #[must_use]
    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[must_use]
    pub fn layer_of(&self, idx: usize) -> Option<usize> {
        self.layer_of.get(idx).copied()
    }

    #[must_use]
    pub fn column_of(&self, idx: usize) -> Option<usize> {
        self.column_of.get(idx).copied()
    }

    /// Size of the widest layer (0 when empty).
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// How many times the cycle fallback fired.
    #[must_use]
    pub const fn forced_picks(&self) -> usize {
        self.forced_picks
    }

    /// Arena indices in processing order (layer by layer).
    pub fn order(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.iter().flatten().copied()
    }
}
