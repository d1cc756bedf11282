use super::{cross, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross(&delta, d2) / denom;
    let u = cross(&delta, d1) / denom;
    Some((t, u))
}

/// Intersects the infinite line `origin + s * dir` with a circle.
///
/// Returns the intersection points (zero, one or two), ordered along `dir`.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<Point2> {
    let a = dir.norm_squared();
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return Vec::new();
    }
    let f = origin - center;
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    let disc = b * b - 4.0 * a * c;

    if disc < -TOLERANCE {
        return Vec::new();
    }
    if disc.abs() <= TOLERANCE {
        let s = -b / (2.0 * a);
        return vec![origin + dir * s];
    }
    let sq = disc.sqrt();
    let s0 = (-b - sq) / (2.0 * a);
    let s1 = (-b + sq) / (2.0 * a);
    vec![origin + dir * s0, origin + dir * s1]
}
