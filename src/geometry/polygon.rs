use serde::{Deserialize, Serialize};

use super::bbox::Aabb2;
use super::edge::Edge;
use crate::error::{GeometryError, Result};
use crate::math::arc_2d::circular_segment_area;
use crate::math::{cross, points_eq, Point2, Vector2, LENGTH_TOLERANCE};

/// Rotational direction of an edge loop in its usage context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Clockwise = -1,
    CounterClockwise = 1,
}

impl Orientation {
    /// Returns `-1.0` for clockwise and `1.0` for counter-clockwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// A closed, ordered loop of edges.
///
/// The loop carries no owner and no stored bounding box; derived data is
/// computed on demand. Values handed out by the engine are fresh copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonData", into = "PolygonData")]
pub struct WinPolygon {
    edges: Vec<Edge>,
}

#[derive(Serialize, Deserialize)]
struct PolygonData {
    edges: Vec<Edge>,
}

impl TryFrom<PolygonData> for WinPolygon {
    type Error = crate::error::SashframeError;

    fn try_from(data: PolygonData) -> Result<Self> {
        Self::new(data.edges)
    }
}

impl From<WinPolygon> for PolygonData {
    fn from(poly: WinPolygon) -> Self {
        Self { edges: poly.edges }
    }
}

impl WinPolygon {
    /// Creates a polygon from a closed edge loop.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than two edges and
    /// `GeometryError::LoopNotClosed` when an edge does not end where the
    /// next one starts.
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 2 edges, got {}",
                edges.len()
            ))
            .into());
        }
        let n = edges.len();
        for i in 0..n {
            let next = &edges[(i + 1) % n];
            if !points_eq(&edges[i].end(), &next.start(), LENGTH_TOLERANCE) {
                return Err(GeometryError::LoopNotClosed { index: i }.into());
            }
        }
        Ok(Self { edges })
    }

    /// Joins consecutive points with straight segments, closing the loop.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than three points.
    pub fn from_points(points: &[Point2]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            ))
            .into());
        }
        let n = points.len();
        let edges = (0..n)
            .map(|i| Edge::segment(points[i], points[(i + 1) % n]))
            .collect();
        Self::new(edges)
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        let mut bbox = self.edges[0].bounding_box();
        for e in &self.edges[1..] {
            bbox = bbox.union(&e.bounding_box());
        }
        bbox
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.bounding_box().center()
    }

    /// Signed enclosed area; arcs contribute their circular segment.
    ///
    /// Positive for counter-clockwise loops.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let mut sum = 0.0;
        for e in &self.edges {
            sum += 0.5 * cross(&e.start().coords, &e.end().coords);
            if let Edge::Arc { radius, sweep, .. } = *e {
                sum += circular_segment_area(radius, sweep);
            }
        }
        sum
    }

    /// Winding derived from the signed area.
    #[must_use]
    pub fn winding(&self) -> Orientation {
        if self.signed_area() < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }

    #[must_use]
    pub fn translated(&self, v: &Vector2) -> Self {
        Self {
            edges: self.edges.iter().map(|e| e.translated(v)).collect(),
        }
    }

    /// The same loop traversed the other way round.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            edges: self.edges.iter().rev().map(Edge::reversed).collect(),
        }
    }

    /// Returns true when both loops consist of the same edges within `tol`,
    /// irrespective of start edge and direction.
    ///
    /// Edges are matched one to one, so a repeated edge must be repeated on
    /// both sides.
    #[must_use]
    pub fn same_shape(&self, other: &Self, tol: f64) -> bool {
        if self.edges.len() != other.edges.len() {
            return false;
        }
        let mut unmatched: Vec<&Edge> = other.edges.iter().collect();
        self.edges.iter().all(|e| {
            match unmatched.iter().position(|o| e.same_geometry(o, tol)) {
                Some(i) => {
                    unmatched.swap_remove(i);
                    true
                }
                None => false,
            }
        })
    }
}
