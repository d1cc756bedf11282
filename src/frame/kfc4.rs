use serde::{Deserialize, Serialize};

use super::layout::{TopologyLayout, KFC4_LAYOUT};
use super::{check_edge_count, FrameTopology};
use crate::error::{GeometryError, OperationError, Result, SashframeError};
use crate::geometry::{Edge, WinPolygon};
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::{Point2, Vector2};

/// Default outer size of a freshly placed frame.
pub(super) const DEFAULT_SIZE: f64 = 2100.0;

/// Square frame split into thirds by two interior verticals.
///
/// Edges 0-2 and 4, 6, 7 form the outer ring; edges 3 and 5 are the
/// interior verticals. The edge set is not a simple closed loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Kfc4Data", into = "Kfc4Data")]
pub struct Kfc4Polygon {
    edges: Vec<Edge>,
    position: Point2,
    /// Height the sashes are pulled up by.
    pub pulling_height: f64,
    /// Dimension the bottom bars on their inner side.
    pub bottom_inner_dim: bool,
}

/// Serialized body: the edges plus placement state under the short keys
/// stored in design files.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Kfc4Data {
    edges: Vec<Edge>,
    cpt: Point2,
    #[serde(default)]
    bid: bool,
    #[serde(default)]
    pulling_height: f64,
}

impl TryFrom<Kfc4Data> for Kfc4Polygon {
    type Error = SashframeError;

    fn try_from(data: Kfc4Data) -> Result<Self> {
        let mut poly = Self::new(data.cpt, data.edges)?;
        poly.pulling_height = data.pulling_height;
        poly.bottom_inner_dim = data.bid;
        Ok(poly)
    }
}

impl From<Kfc4Polygon> for Kfc4Data {
    fn from(poly: Kfc4Polygon) -> Self {
        Self {
            edges: poly.edges,
            cpt: poly.position,
            bid: poly.bottom_inner_dim,
            pulling_height: poly.pulling_height,
        }
    }
}

impl Kfc4Polygon {
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeCount` unless exactly 8 edges are given.
    pub fn new(position: Point2, edges: Vec<Edge>) -> Result<Self> {
        check_edge_count(&KFC4_LAYOUT, edges.len())?;
        Ok(Self {
            edges,
            position,
            pulling_height: 0.0,
            bottom_inner_dim: false,
        })
    }

    /// Default layout centered on `origin`.
    #[must_use]
    pub fn with_layout(origin: Point2) -> Self {
        let s = DEFAULT_SIZE;
        let third = s / 3.0;
        let p = |x: f64, y: f64| Point2::new(x, y);
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(third, 0.0), p(2.0 * third, 0.0), p(s, 0.0));
        let (p4, p5, p6, p7) = (p(0.0, s), p(third, s), p(2.0 * third, s), p(s, s));
        let shift = origin.coords - Vector2::new(s / 2.0, s / 2.0);
        let edges = [
            (p3, p0),
            (p0, p4),
            (p4, p5),
            (p5, p1),
            (p5, p6),
            (p2, p6),
            (p6, p7),
            (p7, p3),
        ]
        .into_iter()
        .map(|(a, b)| Edge::segment(a + shift, b + shift))
        .collect();
        Self {
            edges,
            position: origin,
            pulling_height: 0.0,
            bottom_inner_dim: false,
        }
    }

    /// Where the frame was placed.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Outer ring as a closed loop through the ends of edges 0, 1, 2, 4, 6
    /// and 7, leaving out the interior verticals.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if two of those points coincide.
    pub fn boundary(&self) -> Result<WinPolygon> {
        let points: Vec<Point2> = [0, 1, 2, 4, 6, 7]
            .into_iter()
            .map(|i| self.edges[i].end())
            .collect();
        WinPolygon::from_points(&points)
    }

    /// Moves edge `index` by `offset` and re-joins the edges meeting it.
    ///
    /// The moved edge keeps its direction. Outer sides (1, 7) stretch the
    /// top and bottom; the top (0) and any bottom piece (2, 4, 6) stretch
    /// every vertical; an interior vertical (3, 5) slides between the top
    /// and the bottom, resizing the bottom pieces on either side. Placement
    /// state carries over.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an index past edge 7, or
    /// `GeometryError::Degenerate` when the moved edge runs parallel to an
    /// edge it has to meet.
    pub fn drag_edge(&self, index: usize, offset: &Vector2) -> Result<Self> {
        let no_edge = || OperationError::InvalidInput(format!("kfc4 polygon has no edge {index}"));
        let dragged = self.edges.get(index).ok_or_else(no_edge)?;
        let origin = dragged.start() + offset;
        let dir = dragged.end() - dragged.start();
        let meet = |other: usize| -> Result<Point2> {
            let e = &self.edges[other];
            line_line_intersect_2d(&origin, &dir, &e.start(), &(e.end() - e.start()))
                .map(|(t, _)| origin + dir * t)
                .ok_or_else(|| {
                    GeometryError::Degenerate(format!(
                        "dragged edge {index} never meets edge {other}"
                    ))
                    .into()
                })
        };

        let e = &self.edges;
        let seg = Edge::segment;
        let mut edges = e.clone();
        match index {
            0 => {
                let (i1, i3, i5, i7) = (meet(1)?, meet(3)?, meet(5)?, meet(7)?);
                edges[0] = seg(i7, i1);
                edges[1] = seg(i1, e[1].end());
                edges[3] = seg(e[3].start(), i3);
                edges[5] = seg(i5, e[5].end());
                edges[7] = seg(e[7].start(), i7);
            }
            1 => {
                let (i0, i2) = (meet(0)?, meet(2)?);
                edges[0] = seg(e[0].start(), i0);
                edges[1] = seg(i0, i2);
                edges[2] = seg(i2, e[2].end());
            }
            7 => {
                let (i6, i0) = (meet(6)?, meet(0)?);
                edges[6] = seg(e[6].start(), i6);
                edges[7] = seg(i6, i0);
                edges[0] = seg(i0, e[0].end());
            }
            2 | 4 | 6 => {
                let (i1, i3, i5, i7) = (meet(1)?, meet(3)?, meet(5)?, meet(7)?);
                edges[1] = seg(e[1].start(), i1);
                edges[2] = seg(i1, i3);
                edges[3] = seg(i3, e[3].end());
                edges[4] = seg(i3, i5);
                edges[5] = seg(e[5].start(), i5);
                edges[6] = seg(i5, i7);
                edges[7] = seg(i7, e[7].end());
            }
            3 => {
                let (i0, i2) = (meet(0)?, meet(2)?);
                edges[2] = seg(e[2].start(), i2);
                edges[3] = seg(i2, i0);
                edges[4] = seg(i2, e[4].end());
            }
            5 => {
                let (i0, i6) = (meet(0)?, meet(6)?);
                edges[4] = seg(e[4].start(), i6);
                edges[5] = seg(i0, i6);
                edges[6] = seg(i6, e[6].end());
            }
            _ => return Err(no_edge().into()),
        }
        Ok(Self {
            edges,
            ..self.clone()
        })
    }
}

impl FrameTopology for Kfc4Polygon {
    fn layout(&self) -> &'static TopologyLayout {
        &KFC4_LAYOUT
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
