//! Node placement: layer/column assignment to pixel coordinates.
//!
//! For layer `L` holding `k` nodes:
//!
//! - primary axis (direction of flow): `L * (node_size + spacing) + spacing`
//! - cross axis: the `k` boxes span `k * node_size + (k - 1) * spacing`,
//!   centered in the viewport, so column `c` starts at
//!   `(viewport - span) / 2 + c * (node_size + spacing)`.
//!
//! Horizontal flow uses `node_width`/`horizontal_spacing` on x and
//! `node_height`/`vertical_spacing` on y; vertical flow swaps the roles.
//! A layer wider than the viewport gets a negative start offset.
//!
//! No crossing minimization is attempted: columns keep layering order.

use flowdag_core::{LayoutParams, Node, Orientation};
use serde::Serialize;

use crate::graph::{GraphIndex, Layering};

/// A node with its computed box origin and grid position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    /// Left edge of the bounding box.
    pub x: f64,
    /// Top edge of the bounding box.
    pub y: f64,
    /// Topological depth.
    pub layer: usize,
    /// Index within the layer.
    pub column: usize,
}

impl PositionedNode {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

/// Position the layer/column grid of one axis pair.
#[derive(Debug, Clone, Copy)]
struct Axes {
    primary_size: f64,
    primary_spacing: f64,
    cross_size: f64,
    cross_spacing: f64,
    cross_viewport: f64,
}

impl Axes {
    const fn for_params(params: &LayoutParams) -> Self {
        match params.orientation {
            Orientation::Horizontal => Self {
                primary_size: params.node_width,
                primary_spacing: params.horizontal_spacing,
                cross_size: params.node_height,
                cross_spacing: params.vertical_spacing,
                cross_viewport: params.height,
            },
            Orientation::Vertical => Self {
                primary_size: params.node_height,
                primary_spacing: params.vertical_spacing,
                cross_size: params.node_width,
                cross_spacing: params.horizontal_spacing,
                cross_viewport: params.width,
            },
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn primary(&self, layer: usize) -> f64 {
        (layer as f64).mul_add(self.primary_size + self.primary_spacing, self.primary_spacing)
    }

    #[allow(clippy::cast_precision_loss)]
    fn cross_start(&self, count: usize) -> f64 {
        let k = count as f64;
        let span = k.mul_add(self.cross_size, (k - 1.0) * self.cross_spacing);
        (self.cross_viewport - span) / 2.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn cross(&self, start: f64, column: usize) -> f64 {
        (column as f64).mul_add(self.cross_size + self.cross_spacing, start)
    }
}

/// Place every node of `index` according to `layering`.
///
/// The result is in input node order (arena index order), one entry per
/// input node. `params` is used as given; callers wanting protection
/// against NaN geometry pass [`LayoutParams::sanitized`] output.
#[must_use]
pub fn place_nodes(
    index: &GraphIndex<'_>,
    layering: &Layering,
    params: &LayoutParams,
) -> Vec<PositionedNode> {
    let axes = Axes::for_params(params);
    let mut coords = vec![(0.0, 0.0, 0, 0); index.node_count()];

    for (layer, members) in layering.layers().iter().enumerate() {
        let primary = axes.primary(layer);
        let start = axes.cross_start(members.len());
        for (column, &idx) in members.iter().enumerate() {
            let cross = axes.cross(start, column);
            let (x, y) = match params.orientation {
                Orientation::Horizontal => (primary, cross),
                Orientation::Vertical => (cross, primary),
            };
            coords[idx] = (x, y, layer, column);
        }
    }

    index
        .graph()
        .nodes
        .iter()
        .zip(coords)
        .map(|(node, (x, y, layer, column))| PositionedNode {
            node: node.clone(),
            x,
            y,
            layer,
            column,
        })
        .collect()
}
