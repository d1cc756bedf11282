//! Circular arc helpers.
//!
//! Arcs are stored as `(center, radius, start_angle, sweep)`; a positive
//! sweep runs counter-clockwise.
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2};

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the unit tangent on an arc at parameter `t`, pointing in the
/// direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Checks if an angle falls within an arc's angular range.
#[must_use]
pub fn angle_in_arc_range(angle: f64, start_angle: f64, sweep: f64) -> bool {
    arc_param_of_angle(angle, start_angle, sweep).is_some()
}

/// Maps an absolute angle to the arc parameter `t` in `[0, 1]`, or `None`
/// if the angle lies outside the sweep.
#[must_use]
pub fn arc_param_of_angle(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    let eps = 1e-10;
    if !sweep.is_finite() || sweep.abs() < eps {
        return None;
    }
    // Angular distance travelled from the start in the sweep direction.
    let mut delta = (sweep.signum() * (angle - start_angle)).rem_euclid(TAU);
    if !delta.is_finite() {
        return None;
    }
    if delta > TAU - eps && sweep.abs() < TAU - eps {
        delta -= TAU;
    }
    let t = delta / sweep.abs();
    (-eps..=1.0 + eps).contains(&t).then(|| t.clamp(0.0, 1.0))
}

/// Area of the circular segment between an arc and its chord.
///
/// Signed like the arc sweep: positive for counter-clockwise arcs.
#[must_use]
pub fn circular_segment_area(radius: f64, sweep: f64) -> f64 {
    let theta = sweep.abs().min(TAU);
    let area = 0.5 * radius * radius * (theta - theta.sin());
    if sweep >= 0.0 {
        area
    } else {
        -area
    }
}

/// Normalizes an angle to `(-PI, PI]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}
