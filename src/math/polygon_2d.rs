use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            a.x, a.y, b.x, b.y
        ))
        .into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}
