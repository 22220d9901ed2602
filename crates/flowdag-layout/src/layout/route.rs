//! Edge routing: boundary anchors and cubic Bezier S-curves.
//!
//! Horizontal flow anchors on the right-center of the source box and the
//! left-center of the target box; both control points sit on the vertical
//! line halfway between the anchors, one at the source's height and one at
//! the target's. Vertical flow anchors bottom-center to top-center and
//! puts the control points on the horizontal midline instead.
//!
//! An edge with an unknown endpoint is emitted with an empty path and all
//! anchors at zero.

use std::fmt::Write as _;

use flowdag_core::{Edge, LayoutParams, Orientation};
use serde::Serialize;

use crate::graph::GraphIndex;
use crate::layout::place::PositionedNode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawing command of an edge path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathSegment {
    MoveTo { to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
}

/// Renderer-agnostic edge geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EdgePath {
    segments: Vec<PathSegment>,
}

impl EdgePath {
    /// The path of an edge that cannot be drawn.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A single cubic Bezier from `from` to `to`.
    #[must_use]
    pub fn cubic(from: Point, c1: Point, c2: Point, to: Point) -> Self {
        Self {
            segments: vec![PathSegment::MoveTo { to: from }, PathSegment::CubicTo { c1, c2, to }],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Render as an SVG path `d` attribute; `""` for an empty path.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for segment in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match segment {
                PathSegment::MoveTo { to } => write!(d, "M {} {}", to.x, to.y),
                PathSegment::CubicTo { c1, c2, to } => write!(
                    d,
                    "C {} {}, {} {}, {} {}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                ),
            };
        }
        d
    }
}

/// An edge with its drawable path and anchor points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEdge {
    #[serde(flatten)]
    pub edge: Edge,
    pub path: EdgePath,
    pub source_x: f64,
    pub source_y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

impl PositionedEdge {
    fn dangling(edge: &Edge) -> Self {
        Self {
            edge: edge.clone(),
            path: EdgePath::empty(),
            source_x: 0.0,
            source_y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.edge.id
    }

    /// Midpoint between the anchors, for label placement.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.source_x + self.target_x) / 2.0,
            (self.source_y + self.target_y) / 2.0,
        )
    }
}

/// Route every edge of `index` between the boxes in `nodes`.
///
/// `nodes` must be the output of [`crate::layout::place_nodes`] for the
/// same index (one entry per arena index). Output is in input edge order.
#[must_use]
pub fn route_edges(
    index: &GraphIndex<'_>,
    nodes: &[PositionedNode],
    params: &LayoutParams,
) -> Vec<PositionedEdge> {
    index
        .graph()
        .edges
        .iter()
        .enumerate()
        .map(|(edge_idx, edge)| {
            let boxes = index
                .endpoints(edge_idx)
                .and_then(|(s, t)| nodes.get(s).zip(nodes.get(t)));
            match boxes {
                Some((source, target)) => route_one(edge, source, target, params),
                None => PositionedEdge::dangling(edge),
            }
        })
        .collect()
}

fn route_one(
    edge: &Edge,
    source: &PositionedNode,
    target: &PositionedNode,
    params: &LayoutParams,
) -> PositionedEdge {
    let (w, h) = (params.node_width, params.node_height);

    let (from, to, c1, c2) = match params.orientation {
        Orientation::Horizontal => {
            let from = Point::new(source.x + w, source.y + h / 2.0);
            let to = Point::new(target.x, target.y + h / 2.0);
            let mid_x = (from.x + to.x) / 2.0;
            (from, to, Point::new(mid_x, from.y), Point::new(mid_x, to.y))
        }
        Orientation::Vertical => {
            let from = Point::new(source.x + w / 2.0, source.y + h);
            let to = Point::new(target.x + w / 2.0, target.y);
            let mid_y = (from.y + to.y) / 2.0;
            (from, to, Point::new(from.x, mid_y), Point::new(to.x, mid_y))
        }
    };

    PositionedEdge {
        edge: edge.clone(),
        path: EdgePath::cubic(from, c1, c2, to),
        source_x: from.x,
        source_y: from.y,
        target_x: to.x,
        target_y: to.y,
    }
}
