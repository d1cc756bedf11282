use crate::error::{GeometryError, Result};
use crate::geometry::WinPolygon;
use crate::math::{Point2, TOLERANCE};

/// Creates an axis-aligned, counter-clockwise rectangle centered on a point.
#[derive(Debug)]
pub struct MakeRect {
    center: Point2,
    width: f64,
    height: f64,
}

impl MakeRect {
    /// Creates a new `MakeRect` operation.
    #[must_use]
    pub fn new(center: Point2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Creates the operation from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self::new(
            nalgebra::center(&a, &b),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if either side is not positive.
    pub fn execute(&self) -> Result<WinPolygon> {
        if self.width < TOLERANCE || self.height < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "rectangle {} x {} has no area",
                self.width, self.height
            ))
            .into());
        }
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        let c = self.center;
        WinPolygon::from_points(&[
            Point2::new(c.x - hw, c.y - hh),
            Point2::new(c.x + hw, c.y - hh),
            Point2::new(c.x + hw, c.y + hh),
            Point2::new(c.x - hw, c.y + hh),
        ])
    }
}
