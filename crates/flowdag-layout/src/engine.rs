//! Pipeline entry points.
//!
//! ```text
//! WorkflowGraph ─► GraphIndex ─► Layering ─► place_nodes ─► route_edges ─► LayoutResult
//!                      │             ├─► compute_critical_path ─► CriticalPath
//!                      │             └─► WorkflowStats::from_parts ─► WorkflowStats
//! ```
//!
//! Every call starts from scratch: there is no cache to go stale. Callers
//! re-invoke when the graph or the parameters change, and can compare
//! [`LayoutResult::fingerprint`] to tell whether geometry may have moved.
//! Label, status, and metadata edits do not move anything and are not
//! covered; re-read those from the graph.

use std::collections::HashMap;

use flowdag_core::{LayoutParams, Orientation, WorkflowGraph};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::critical_path::{CriticalPath, compute_critical_path};
use crate::graph::{GraphIndex, Layering};
use crate::layout::{PositionedEdge, PositionedNode, place_nodes, route_edges};
use crate::stats::WorkflowStats;

/// Input anomalies the engine recovered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDiagnostics {
    /// Ids of edges whose source or target is unknown.
    pub dangling_edges: Vec<String>,
    /// Ids that appear on more than one node.
    pub duplicate_node_ids: Vec<String>,
    /// Times the layering had to break a cycle.
    pub forced_picks: usize,
}

impl LayoutDiagnostics {
    /// Return `true` if the input was a well-formed DAG.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling_edges.is_empty()
            && self.duplicate_node_ids.is_empty()
            && self.forced_picks == 0
    }
}

/// Axis-aligned box around every placed node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Positioned output for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// One entry per input node, in input order.
    pub positioned_nodes: Vec<PositionedNode>,
    /// One entry per input edge, in input order.
    pub positioned_edges: Vec<PositionedEdge>,
    /// Parameters actually used, after sanitizing.
    pub params: LayoutParams,
    pub diagnostics: LayoutDiagnostics,
    /// BLAKE3 hash of the topology and the sanitized parameters.
    pub fingerprint: String,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl LayoutResult {
    /// Look up a positioned node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.by_id.get(id).and_then(|&i| self.positioned_nodes.get(i))
    }

    /// Look up a positioned edge by id (first match).
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&PositionedEdge> {
        self.positioned_edges.iter().find(|e| e.edge.id == id)
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.positioned_nodes
            .iter()
            .map(|n| n.layer + 1)
            .max()
            .unwrap_or(0)
    }

    /// Bounding box of all node boxes, `None` for an empty layout.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let (w, h) = (self.params.node_width, self.params.node_height);
        self.positioned_nodes.iter().fold(None, |acc, n| {
            let b = Bounds {
                min_x: n.x,
                min_y: n.y,
                max_x: n.x + w,
                max_y: n.y + h,
            };
            Some(match acc {
                None => b,
                Some(a) => Bounds {
                    min_x: a.min_x.min(b.min_x),
                    min_y: a.min_y.min(b.min_y),
                    max_x: a.max_x.max(b.max_x),
                    max_y: a.max_y.max(b.max_y),
                },
            })
        })
    }
}

/// Lay out `graph` with `params`.
///
/// Never fails: dangling edges come back degenerate, cycles are broken by
/// forced picks, unusable parameters are replaced by defaults. What was
/// recovered is listed in [`LayoutResult::diagnostics`].
#[must_use]
#[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn compute_layout(graph: &WorkflowGraph, params: &LayoutParams) -> LayoutResult {
    let index = GraphIndex::build(graph);
    let layering = Layering::compute(&index);
    layout_from_parts(&index, &layering, params)
}

fn layout_from_parts(
    index: &GraphIndex<'_>,
    layering: &Layering,
    params: &LayoutParams,
) -> LayoutResult {
    let params = params.sanitized();
    let positioned_nodes = place_nodes(index, layering, &params);
    let positioned_edges = route_edges(index, &positioned_nodes, &params);

    let diagnostics = LayoutDiagnostics {
        dangling_edges: index.dangling_edges().map(|e| e.id.clone()).collect(),
        duplicate_node_ids: index.duplicate_nodes().map(|n| n.id.clone()).collect(),
        forced_picks: layering.forced_picks(),
    };
    if diagnostics.forced_picks > 0 {
        debug!(forced_picks = diagnostics.forced_picks, "graph contains a cycle");
    }
    debug!(layers = layering.len(), "layout computed");

    // Reversed so the first node with a given id wins.
    let by_id = (0..index.node_count())
        .rev()
        .map(|idx| (index.id(idx).to_string(), idx))
        .collect();

    LayoutResult {
        positioned_nodes,
        positioned_edges,
        params,
        diagnostics,
        fingerprint: layout_fingerprint(index, &params),
        by_id,
    }
}

/// Hash everything node and edge coordinates depend on.
fn layout_fingerprint(index: &GraphIndex<'_>, params: &LayoutParams) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(index.fingerprint().as_bytes());
    for value in [
        params.width,
        params.height,
        params.node_width,
        params.node_height,
        params.horizontal_spacing,
        params.vertical_spacing,
    ] {
        hasher.update(&value.to_le_bytes());
    }
    let orientation: &[u8] = match params.orientation {
        Orientation::Horizontal => b"h",
        Orientation::Vertical => b"v",
    };
    hasher.update(orientation);
    format!("blake3:{}", hasher.finalize())
}

/// Critical path of `graph`.
#[must_use]
pub fn critical_path(graph: &WorkflowGraph) -> CriticalPath {
    let index = GraphIndex::build(graph);
    let layering = Layering::compute(&index);
    compute_critical_path(&index, &layering)
}

/// Summary statistics of `graph`.
#[must_use]
pub fn stats(graph: &WorkflowGraph) -> WorkflowStats {
    WorkflowStats::compute(graph)
}

/// Layout, critical path, and statistics from one index build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAnalysis {
    #[serde(flatten)]
    pub layout: LayoutResult,
    pub critical_path: CriticalPath,
    pub stats: WorkflowStats,
}

impl WorkflowAnalysis {
    /// Return `true` if `node_id` lies on the critical path.
    #[must_use]
    pub fn is_on_critical_path(&self, node_id: &str) -> bool {
        self.critical_path.contains(node_id)
    }

    /// Return `true` if the positioned edge `edge_id` joins two
    /// consecutive critical-path nodes.
    #[must_use]
    pub fn is_edge_on_critical_path(&self, edge_id: &str) -> bool {
        self.layout
            .edge(edge_id)
            .is_some_and(|e| self.critical_path.contains_edge(&e.edge))
    }
}

/// Run the full pipeline: layout, critical path, and statistics.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn analyze(graph: &WorkflowGraph, params: &LayoutParams) -> WorkflowAnalysis {
    let index = GraphIndex::build(graph);
    let layering = Layering::compute(&index);

    WorkflowAnalysis {
        layout: layout_from_parts(&index, &layering, params),
        critical_path: compute_critical_path(&index, &layering),
        stats: WorkflowStats::from_parts(&index, &layering),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdag_core::{Edge, Node, NodeType};

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> WorkflowGraph {
        WorkflowGraph::new(
            nodes
                .iter()
                .map(|id| Node::new(*id, NodeType::Task, *id))
                .collect(),
            edges
                .iter()
                .enumerate()
                .map(|(i, (s, t))| Edge::new(format!("e{i}"), *s, *t))
                .collect(),
        )
    }

    #[test]
    fn clean_dag_has_clean_diagnostics() {
        let result = compute_layout(&graph(&["a", "b"], &[("a", "b")]), &LayoutParams::default());
        assert!(result.diagnostics.is_clean());
        assert_eq!(result.layer_count(), 2);
    }

    #[test]
    fn diagnostics_list_recovered_problems() {
        let result = compute_layout(
            &graph(&["a", "b", "a"], &[("a", "b"), ("b", "a"), ("a", "zz")]),
            &LayoutParams::default(),
        );
        assert_eq!(result.diagnostics.dangling_edges, vec!["e2"]);
        assert_eq!(result.diagnostics.duplicate_node_ids, vec!["a"]);
        assert_eq!(result.diagnostics.forced_picks, 1);
        assert!(!result.diagnostics.is_clean());
    }

    #[test]
    fn node_lookup_prefers_first_duplicate() {
        let result = compute_layout(
            &graph(&["a", "b", "a"], &[("b", "a")]),
            &LayoutParams::default(),
        );
        let a = result.node("a").expect("a is placed");
        assert_eq!(a.layer, 1);
        assert!(result.node("missing").is_none());
    }

    #[test]
    fn bad_params_are_sanitized() {
        let params = LayoutParams {
            node_width: f64::INFINITY,
            ..LayoutParams::default()
        };
        let result = compute_layout(&graph(&["a", "b"], &[("a", "b")]), &params);
        assert!((result.params.node_width - 180.0).abs() < f64::EPSILON);
        assert!(result.positioned_nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
    }

    #[test]
    fn huge_sizes_never_overflow_to_nan() {
        let params = LayoutParams {
            node_width: f64::MAX,
            horizontal_spacing: f64::MAX,
            node_height: f64::MAX,
            ..LayoutParams::default()
        };
        let result = compute_layout(&graph(&["a", "b", "c"], &[("a", "b"), ("a", "c")]), &params);

        assert!(result.params.validate().is_ok());
        for n in &result.positioned_nodes {
            assert!(n.x.is_finite() && n.y.is_finite(), "{} is off the plane", n.id());
        }
        for e in &result.positioned_edges {
            assert!(e.source_x.is_finite() && e.target_y.is_finite());
        }
    }

    #[test]
    fn largest_accepted_sizes_stay_finite() {
        let params = LayoutParams {
            node_width: flowdag_core::MAX_DIMENSION,
            node_height: flowdag_core::MAX_DIMENSION,
            horizontal_spacing: flowdag_core::MAX_DIMENSION,
            vertical_spacing: flowdag_core::MAX_DIMENSION,
            ..LayoutParams::default()
        };
        let result = compute_layout(&graph(&["a", "b", "c"], &[("a", "b"), ("a", "c")]), &params);

        assert!((result.params.node_width - flowdag_core::MAX_DIMENSION).abs() < f64::EPSILON);
        let b = result.bounds().expect("non-empty layout");
        assert!(b.width().is_finite() && b.height().is_finite());
    }

    #[test]
    fn bounds_cover_all_boxes() {
        let result = compute_layout(
            &graph(&["a", "b", "c"], &[("a", "b"), ("a", "c")]),
            &LayoutParams::default(),
        );
        let b = result.bounds().expect("non-empty layout");
        for n in &result.positioned_nodes {
            assert!(n.x >= b.min_x && n.x + result.params.node_width <= b.max_x);
            assert!(n.y >= b.min_y && n.y + result.params.node_height <= b.max_y);
        }
        assert!(b.width() > 0.0 && b.height() > 0.0);
    }

    #[test]
    fn fingerprint_follows_topology_and_params() {
        let g = graph(&["a", "b"], &[("a", "b")]);
        let params = LayoutParams::default();
        let base = compute_layout(&g, &params).fingerprint;

        assert!(base.starts_with("blake3:"));
        assert_eq!(base, compute_layout(&g, &params).fingerprint);

        let vertical = params.with_orientation(Orientation::Vertical);
        assert_ne!(base, compute_layout(&g, &vertical).fingerprint);
        let wider = params.with_viewport(1200.0, 600.0);
        assert_ne!(base, compute_layout(&g, &wider).fingerprint);
        let rewired = graph(&["a", "b"], &[("b", "a")]);
        assert_ne!(base, compute_layout(&rewired, &params).fingerprint);

        let mut relabeled = g.clone();
        relabeled.nodes[0].label = "renamed".to_string();
        assert_eq!(base, compute_layout(&relabeled, &params).fingerprint);
    }

    #[test]
    fn empty_graph_has_no_bounds() {
        let result = compute_layout(&WorkflowGraph::default(), &LayoutParams::default());
        assert!(result.bounds().is_none());
        assert_eq!(result.layer_count(), 0);
    }

    #[test]
    fn analysis_answers_render_queries() {
        let analysis = analyze(
            &graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("a", "d")]),
            &LayoutParams::default(),
        );
        assert!(analysis.is_on_critical_path("b"));
        assert!(!analysis.is_on_critical_path("d"));
        assert!(analysis.is_edge_on_critical_path("e1"));
        assert!(!analysis.is_edge_on_critical_path("e2"));
        assert!(!analysis.is_edge_on_critical_path("nope"));
        assert_eq!(analysis.stats.longest_path, analysis.critical_path.len());
    }
}
