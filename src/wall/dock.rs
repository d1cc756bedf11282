use crate::geometry::{Edge, Orientation};
use crate::math::Point2;
use crate::scene::ShapeObject;

/// The edge a new wall attaches to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    /// Center of the polygon owning the edge.
    pub based: Point2,
    pub edge: Edge,
    /// Distance from the query point to the edge.
    pub distance: f64,
    /// Orientation of the owning shape.
    pub orientation: Orientation,
}

/// Finds the edge nearest to `point` across all shapes.
///
/// Shapes are scanned in order and edges in loop order; on an exact tie the
/// first one seen wins (lowest shape index, then lowest edge index).
/// Returns `None` when there are no shapes.
#[must_use]
pub fn get_dock_edge(shapes: &[ShapeObject], point: &Point2) -> Option<EdgeInfo> {
    let mut best: Option<EdgeInfo> = None;
    for shape in shapes {
        let based = shape.polygon.center();
        for edge in shape.polygon.edges() {
            let distance = edge.distance_to(point);
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(EdgeInfo {
                    based,
                    edge: *edge,
                    distance,
                    orientation: shape.orientation,
                });
            }
        }
    }
    best
}
