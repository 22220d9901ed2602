#![forbid(unsafe_code)]
//! flowdag-layout library.
//!
//! Turns a workflow graph into a layered 2-D arrangement (positioned nodes
//! and Bezier-routed edges) plus critical-path and summary analytics.
//!
//! The engine is a pure function of `(graph, params)`: synchronous, no
//! I/O, no shared state, no caching. Malformed input (dangling edges,
//! cycles, duplicate ids, non-finite parameters) degrades to best-effort
//! output instead of an error.
//!
//! # Conventions
//!
//! - **Errors**: none at runtime; input decoding errors live in `flowdag-core`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! ```rust
//! use flowdag_core::{Edge, LayoutParams, Node, NodeType, WorkflowGraph};
//! use flowdag_layout::analyze;
//!
//! let graph = WorkflowGraph::new(
//!     vec![
//!         Node::new("a", NodeType::Start, "Begin"),
//!         Node::new("b", NodeType::End, "Done"),
//!     ],
//!     vec![Edge::new("e1", "a", "b")],
//! );
//! let analysis = analyze(&graph, &LayoutParams::default());
//!
//! assert_eq!(analysis.stats.layers, 2);
//! assert!(analysis.is_on_critical_path("b"));
//! ```

pub mod critical_path;
pub mod engine;
pub mod graph;
pub mod layout;
pub mod stats;

pub use critical_path::{CriticalPath, compute_critical_path, longest_path_length};
pub use engine::{
    Bounds, LayoutDiagnostics, LayoutResult, WorkflowAnalysis, analyze, compute_layout,
    critical_path, stats,
};
pub use graph::{GraphIndex, Layering, find_cycles, has_cycle};
pub use layout::{EdgePath, PathSegment, Point, PositionedEdge, PositionedNode};
pub use stats::WorkflowStats;
