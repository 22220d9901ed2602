//! Geometry: node placement and edge routing.

pub mod place;
pub mod route;

pub use place::{PositionedNode, place_nodes};
pub use route::{EdgePath, PathSegment, Point, PositionedEdge, route_edges};
