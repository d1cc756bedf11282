use super::arc_2d::{angle_in_arc_range, arc_point_at};
use super::Point2;

/// Returns the minimum distance from point `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project onto the infinite line, clamp to the segment.
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns the minimum distance from point `p` to a circular arc.
///
/// If the point's angle around `center` falls inside the arc's sweep the
/// distance is radial; otherwise it is the distance to the nearer endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let rel = p - center;
    let angle = rel.y.atan2(rel.x);
    if angle_in_arc_range(angle, start_angle, sweep) {
        return (rel.norm() - radius).abs();
    }

    let ep0 = arc_point_at(center, radius, start_angle, sweep, 0.0);
    let ep1 = arc_point_at(center, radius, start_angle, sweep, 1.0);
    (p - ep0).norm().min((p - ep1).norm())
}
