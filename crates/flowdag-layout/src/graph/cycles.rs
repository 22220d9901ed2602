//! Strict cycle detection.
//!
//! Layering never fails on a cyclic graph; it force-picks a node and moves
//! on. Callers that want to reject or flag cyclic workflows run these
//! helpers first.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::index::GraphIndex;

/// Return `true` if the resolved topology contains any cycle, self-loops
/// included.
#[must_use]
pub fn has_cycle(index: &GraphIndex<'_>) -> bool {
    is_cyclic_directed(&index.to_petgraph())
}

/// Find every cycle in the graph.
///
/// Each entry is the sorted list of node ids in one strongly connected
/// component with more than one member. A self-loop is reported as a
/// one-element cycle. Entries are sorted for deterministic output.
#[must_use]
pub fn find_cycles(index: &GraphIndex<'_>) -> Vec<Vec<String>> {
    let graph = index.to_petgraph();
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&node| has_self_loop(&graph, node))
        })
        .map(|component| {
            let mut ids: Vec<String> = component
                .into_iter()
                .filter_map(|idx| graph.node_weight(idx).map(|id| (*id).to_string()))
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

fn has_self_loop(graph: &DiGraph<&str, ()>, node: NodeIndex) -> bool {
    graph.find_edge(node, node).is_some()
}
