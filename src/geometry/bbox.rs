use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// A coordinate axis in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Returns the coordinate of `p` along this axis.
    #[must_use]
    pub fn coord(self, p: &Point2) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

}

/// An axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb2 {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }

    /// Returns `(low, high)` along `axis`.
    #[must_use]
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        (axis.coord(&self.min), axis.coord(&self.max))
    }

    /// Length of the box along `axis`.
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f64 {
        let (lo, hi) = self.span(axis);
        hi - lo
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.extent(Axis::X)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.extent(Axis::Y)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns true when `[lo, hi]` along `axis` encloses this box's span.
    #[must_use]
    pub fn within_range(&self, axis: Axis, lo: f64, hi: f64, tol: f64) -> bool {
        let (a, b) = self.span(axis);
        a >= lo - tol && b <= hi + tol
    }
}
