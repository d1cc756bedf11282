pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Tolerance for model-space lengths (millimetres) when matching edges,
/// spans and click positions.
pub const LENGTH_TOLERANCE: f64 = 1e-6;

/// Returns true when two points coincide within `tol`.
#[must_use]
pub fn points_eq(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a - b).norm() <= tol
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
