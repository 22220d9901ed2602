//! Known-topology regression tests for the full pipeline.
//!
//! Each test feeds a hand-crafted graph through [`analyze`] and checks the
//! layering, critical path, geometry, and statistics against values worked
//! out by hand.

use flowdag_core::{Edge, LayoutParams, Node, NodeStatus, NodeType, Orientation, WorkflowGraph};
use flowdag_layout::{WorkflowAnalysis, analyze, compute_layout, critical_path, stats};

const EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_graph(nodes: &[&str], edges: &[(&str, &str)]) -> WorkflowGraph {
    WorkflowGraph::new(
        nodes
            .iter()
            .map(|id| Node::new(*id, NodeType::Task, id.to_uppercase()))
            .collect(),
        edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(format!("e{i}"), *s, *t))
            .collect(),
    )
}

fn layers_of(analysis: &WorkflowAnalysis) -> Vec<Vec<&str>> {
    let mut layers: Vec<Vec<(usize, &str)>> = Vec::new();
    for node in &analysis.layout.positioned_nodes {
        if layers.len() <= node.layer {
            layers.resize(node.layer + 1, Vec::new());
        }
        layers[node.layer].push((node.column, node.id()));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_unstable();
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn linear_chain() {
    let g = build_graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
    let analysis = analyze(&g, &LayoutParams::default());

    assert_eq!(layers_of(&analysis), vec![vec!["A"], vec!["B"], vec!["C"]]);
    assert_eq!(analysis.stats.layers, 3);
    assert_eq!(analysis.stats.longest_path, 3);
    assert_eq!(analysis.critical_path.node_ids, vec!["A", "B", "C"]);
}

#[test]
fn diamond() {
    let g = build_graph(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
    );
    let analysis = analyze(&g, &LayoutParams::default());

    assert_eq!(
        layers_of(&analysis),
        vec![vec!["A"], vec!["B", "C"], vec!["D"]]
    );
    assert_eq!(analysis.stats.longest_path, 3);
    assert_eq!(analysis.stats.max_nodes_per_layer, 2);
    assert_eq!(analysis.critical_path.node_ids, vec!["A", "B", "D"]);
}

#[test]
fn two_isolated_nodes() {
    let g = build_graph(&["X", "Y"], &[]);
    let analysis = analyze(&g, &LayoutParams::default());

    assert_eq!(layers_of(&analysis), vec![vec!["X", "Y"]]);
    assert_eq!(analysis.stats.layers, 1);
    assert_eq!(analysis.stats.max_nodes_per_layer, 2);
    assert_eq!(analysis.stats.longest_path, 1);
}

#[test]
fn two_node_cycle_terminates() {
    let g = build_graph(&["A", "B"], &[("A", "B"), ("B", "A")]);
    let analysis = analyze(&g, &LayoutParams::default());

    assert_eq!(layers_of(&analysis), vec![vec!["A"], vec!["B"]]);
    assert_eq!(analysis.layout.diagnostics.forced_picks, 1);
    assert_eq!(analysis.stats.layers, 2);
}

#[test]
fn dangling_edge_is_degenerate_and_harmless() {
    let with_dangling = build_graph(&["A", "B"], &[("A", "B"), ("A", "Z")]);
    let without = build_graph(&["A", "B"], &[("A", "B")]);
    let params = LayoutParams::default();

    let result = compute_layout(&with_dangling, &params);
    let edge = result.edge("e1").expect("dangling edge is still emitted");
    assert!(edge.path.is_empty());
    assert!(edge.source_x.abs() < EPS && edge.source_y.abs() < EPS);
    assert!(edge.target_x.abs() < EPS && edge.target_y.abs() < EPS);
    assert_eq!(result.diagnostics.dangling_edges, vec!["e1"]);

    let baseline = compute_layout(&without, &params);
    assert_eq!(result.node("A"), baseline.node("A"));
    assert_eq!(result.edge("e0"), baseline.edge("e0"));
}

#[test]
fn empty_graph() {
    let g = WorkflowGraph::default();
    let analysis = analyze(&g, &LayoutParams::default());

    assert!(analysis.layout.positioned_nodes.is_empty());
    assert!(analysis.layout.positioned_edges.is_empty());
    assert!(analysis.critical_path.is_empty());
    assert_eq!(analysis.stats.total_nodes, 0);
    assert_eq!(analysis.stats.layers, 0);
    assert_eq!(analysis.stats.longest_path, 0);
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn vertical_flow_swaps_axes() {
    let g = build_graph(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);
    let params = LayoutParams::default().with_orientation(Orientation::Vertical);
    let result = compute_layout(&g, &params);

    let a = result.node("A").expect("A placed");
    let b = result.node("B").expect("B placed");
    let c = result.node("C").expect("C placed");

    assert!((a.y - params.vertical_spacing).abs() < EPS);
    assert!((b.y - c.y).abs() < EPS);
    assert!(b.y > a.y);
    assert!((b.x + c.x - (params.width - params.node_width)).abs() < EPS);

    let edge = result.edge("e0").expect("edge routed");
    assert!((edge.source_y - (a.y + params.node_height)).abs() < EPS);
    assert!((edge.target_y - b.y).abs() < EPS);
}

#[test]
fn viewport_change_moves_cross_axis_only() {
    let g = build_graph(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);
    let small = compute_layout(&g, &LayoutParams::default().with_viewport(800.0, 400.0));
    let large = compute_layout(&g, &LayoutParams::default().with_viewport(800.0, 1000.0));

    for id in ["A", "B", "C"] {
        let (s, l) = (
            small.node(id).expect("placed"),
            large.node(id).expect("placed"),
        );
        assert!((s.x - l.x).abs() < EPS, "{id} x should not depend on height");
        assert!((l.y - s.y - 300.0).abs() < EPS, "{id} shifts by half the growth");
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[test]
fn stats_and_critical_path_entry_points_agree_with_analyze() {
    let mut g = build_graph(
        &["s", "fetch", "parse", "store", "end"],
        &[("s", "fetch"), ("fetch", "parse"), ("parse", "store"), ("s", "store"), ("store", "end")],
    );
    g.nodes[0].node_type = NodeType::Start;
    g.nodes[1].node_type = NodeType::Api;
    g.nodes[3].node_type = NodeType::Database;
    g.nodes[4].node_type = NodeType::End;
    g.nodes[1].status = Some(NodeStatus::Success);
    g.nodes[2].status = Some(NodeStatus::Running);

    let analysis = analyze(&g, &LayoutParams::default());
    assert_eq!(analysis.stats, stats(&g));
    assert_eq!(analysis.critical_path, critical_path(&g));

    assert_eq!(
        analysis.critical_path.node_ids,
        vec!["s", "fetch", "parse", "store", "end"]
    );
    assert_eq!(analysis.stats.type_count(NodeType::Task), 1);
    assert_eq!(analysis.stats.nodes_with_status(), 2);
    assert!(analysis.is_edge_on_critical_path("e2"));
    assert!(!analysis.is_edge_on_critical_path("e3"));
}

#[test]
fn json_round_trip_of_input_and_output() {
    let g = WorkflowGraph::from_json_str(
        r#"{
            "nodes": [
                {"id": "start", "type": "start", "label": "Start", "status": "success"},
                {"id": "check", "type": "condition", "label": "OK?"},
                {"id": "notify", "type": "notification", "label": "Page"}
            ],
            "edges": [
                {"id": "e1", "source": "start", "target": "check"},
                {"id": "e2", "source": "check", "target": "notify",
                 "conditionType": "failure", "style": "dashed", "label": "no"}
            ],
            "metadata": {"name": "deploy"}
        }"#,
    )
    .expect("valid graph");

    let analysis = analyze(&g, &LayoutParams::default());
    let json = serde_json::to_value(&analysis).expect("serialize analysis");

    assert_eq!(json["positionedNodes"][1]["id"], "check");
    assert_eq!(json["positionedNodes"][1]["layer"], 1);
    assert_eq!(json["positionedEdges"][1]["conditionType"], "failure");
    assert_eq!(json["criticalPath"]["nodeIds"][2], "notify");
    assert_eq!(json["stats"]["nodesByType"]["condition"], 1);
    assert!(json["fingerprint"].as_str().is_some_and(|f| f.starts_with("blake3:")));
}
