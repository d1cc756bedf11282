use serde::{Deserialize, Serialize};

use super::bbox::Aabb2;
use crate::error::{GeometryError, OperationError, Result};
use std::f64::consts::TAU;

use crate::math::arc_2d::{arc_param_of_angle, arc_point_at, arc_tangent_at, normalize_angle};
use crate::math::distance_2d::{point_to_arc_dist, point_to_segment_dist};
use crate::math::intersect_2d::{line_circle_intersect_2d, line_line_intersect_2d};
use crate::math::polygon_2d::left_normal;
use crate::math::{points_eq, Point2, Vector2, TOLERANCE};

/// A single polygon edge: a straight segment or a circular arc.
///
/// Arcs sweep from `start_angle` by `sweep` radians; positive sweeps run
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EdgeData", into = "EdgeData")]
pub enum Edge {
    Segment {
        start: Point2,
        end: Point2,
    },
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

/// Wire form of [`Edge`]; arcs are revalidated on the way in.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
enum EdgeData {
    Segment {
        start: Point2,
        end: Point2,
    },
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl TryFrom<EdgeData> for Edge {
    type Error = crate::error::SashframeError;

    fn try_from(data: EdgeData) -> Result<Self> {
        match data {
            EdgeData::Segment { start, end } => {
                if !(is_finite(&start) && is_finite(&end)) {
                    return Err(
                        GeometryError::Degenerate("segment has non-finite endpoints".into()).into(),
                    );
                }
                Ok(Self::segment(start, end))
            }
            EdgeData::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Self::arc(center, radius, start_angle, sweep),
        }
    }
}

impl From<Edge> for EdgeData {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Segment { start, end } => Self::Segment { start, end },
            Edge::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            },
        }
    }
}

fn is_finite(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

impl Edge {
    /// Creates a straight segment.
    #[must_use]
    pub fn segment(start: Point2, end: Point2) -> Self {
        Self::Segment { start, end }
    }

    /// Creates an arc from its circle parameters.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for non-finite parameters, a
    /// non-positive radius, or a sweep that is zero or exceeds a full turn.
    pub fn arc(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if !(is_finite(&center) && start_angle.is_finite() && sweep.is_finite()) {
            return Err(GeometryError::Degenerate("arc parameters must be finite".into()).into());
        }
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE || sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc sweep must be non-zero and at most a full turn, got {sweep}"
            ))
            .into());
        }
        Ok(Self::Arc {
            center,
            radius,
            start_angle: normalize_angle(start_angle),
            sweep,
        })
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }

    /// Evaluates the edge at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        match *self {
            Self::Segment { start, end } => start + (end - start) * t,
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => arc_point_at(&center, radius, start_angle, sweep, t),
        }
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        match *self {
            Self::Segment { start, .. } => start,
            Self::Arc { .. } => self.point_at(0.0),
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match *self {
            Self::Segment { end, .. } => end,
            Self::Arc { .. } => self.point_at(1.0),
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.point_at(0.5)
    }

    /// Unit tangent at `t`, in the direction of travel.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector2 {
        match *self {
            Self::Segment { start, end } => {
                let d = end - start;
                let len = d.norm();
                if len < TOLERANCE {
                    Vector2::zeros()
                } else {
                    d / len
                }
            }
            Self::Arc {
                start_angle, sweep, ..
            } => arc_tangent_at(start_angle, sweep, t),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match *self {
            Self::Segment { start, end } => (end - start).norm(),
            Self::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    /// Tight bounding box, including the arc's axis extremes.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        let mut bbox = Aabb2::from_corners(self.start(), self.end());
        if let Self::Arc {
            center,
            radius,
            start_angle,
            sweep,
        } = *self
        {
            for k in 0..4 {
                let angle = f64::from(k) * std::f64::consts::FRAC_PI_2;
                if arc_param_of_angle(angle, start_angle, sweep).is_some() {
                    bbox.include(&Point2::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }
            }
        }
        bbox
    }

    /// Returns the same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Segment { start, end } => Self::Segment {
                start: end,
                end: start,
            },
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Self::Arc {
                center,
                radius,
                start_angle: normalize_angle(start_angle + sweep),
                sweep: -sweep,
            },
        }
    }

    #[must_use]
    pub fn translated(&self, v: &Vector2) -> Self {
        match *self {
            Self::Segment { start, end } => Self::Segment {
                start: start + v,
                end: end + v,
            },
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Self::Arc {
                center: center + v,
                radius,
                start_angle,
                sweep,
            },
        }
    }

    /// Returns the portion of this edge between parameters `t0` and `t1`.
    #[must_use]
    pub fn sub_edge(&self, t0: f64, t1: f64) -> Self {
        match *self {
            Self::Segment { .. } => Self::Segment {
                start: self.point_at(t0),
                end: self.point_at(t1),
            },
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Self::Arc {
                center,
                radius,
                start_angle: normalize_angle(start_angle + sweep * t0),
                sweep: sweep * (t1 - t0),
            },
        }
    }

    /// Shortest distance from `p` to any point on the edge.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        match *self {
            Self::Segment { start, end } => point_to_segment_dist(p, &start, &end),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => point_to_arc_dist(p, &center, radius, start_angle, sweep),
        }
    }

    /// Offsets the edge sideways by `distance`.
    ///
    /// Positive distances move to the left of the direction of travel. For a
    /// counter-clockwise arc the left side faces the center.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if an arc would collapse, or
    /// `GeometryError::Degenerate` for a zero-length segment.
    pub fn offset(&self, distance: f64) -> Result<Self> {
        match *self {
            Self::Segment { start, end } => {
                let dir = self.tangent_at(0.0);
                if dir.norm() < TOLERANCE {
                    return Err(GeometryError::Degenerate(format!(
                        "cannot offset zero-length segment at ({}, {})",
                        start.x, start.y
                    ))
                    .into());
                }
                let shift = left_normal(&dir) * distance;
                Ok(Self::Segment {
                    start: start + shift,
                    end: end + shift,
                })
            }
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let new_radius = radius - sweep.signum() * distance;
                if new_radius <= TOLERANCE {
                    return Err(OperationError::Failed(format!(
                        "offset of {distance} collapses arc of radius {radius}"
                    ))
                    .into());
                }
                Ok(Self::Arc {
                    center,
                    radius: new_radius,
                    start_angle,
                    sweep,
                })
            }
        }
    }

    /// Parameters in `(0, 1)` where the infinite line `origin + s * dir`
    /// crosses this edge, sorted ascending. Endpoint touches are excluded.
    #[must_use]
    pub fn intersect_line_params(&self, origin: &Point2, dir: &Vector2) -> Vec<f64> {
        let eps = 1e-9;
        let mut params: Vec<f64> = match *self {
            Self::Segment { start, end } => {
                line_line_intersect_2d(origin, dir, &start, &(end - start))
                    .map(|(_, u)| u)
                    .into_iter()
                    .collect()
            }
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => line_circle_intersect_2d(origin, dir, &center, radius)
                .iter()
                .filter_map(|hit| {
                    let angle = (hit.y - center.y).atan2(hit.x - center.x);
                    arc_param_of_angle(angle, start_angle, sweep)
                })
                .collect(),
        };
        params.retain(|t| *t > eps && *t < 1.0 - eps);
        params.sort_by(f64::total_cmp);
        params.dedup_by(|a, b| (*a - *b).abs() < eps);
        params
    }

    /// Directional equality within `tol`: same kind, same start, middle and end.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.is_arc() == other.is_arc()
            && points_eq(&self.start(), &other.start(), tol)
            && points_eq(&self.end(), &other.end(), tol)
            && points_eq(&self.midpoint(), &other.midpoint(), tol)
    }

    /// Equality within `tol` regardless of direction of travel.
    #[must_use]
    pub fn same_geometry(&self, other: &Self, tol: f64) -> bool {
        self.approx_eq(other, tol) || self.approx_eq(&other.reversed(), tol)
    }
}
