use serde::{Deserialize, Serialize};

use super::kfc4::DEFAULT_SIZE;
use super::layout::{TopologyLayout, HOLLOW2_LAYOUT};
use super::{check_edge_count, EdgeList, FrameTopology};
use crate::error::{Result, SashframeError};
use crate::geometry::{Edge, WinPolygon};
use crate::math::{Point2, Vector2};

/// U-shaped frame: an outer square with a notch cut down from the top,
/// glazed as two hollows either side of the notch.
///
/// Edge order: notch left wall, top-left, left, bottom, right, top-right,
/// notch right wall, notch bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EdgeList", into = "EdgeList")]
pub struct Hollow2Polygon {
    edges: Vec<Edge>,
}

impl TryFrom<EdgeList> for Hollow2Polygon {
    type Error = SashframeError;

    fn try_from(list: EdgeList) -> Result<Self> {
        Self::new(list.edges)
    }
}

impl From<Hollow2Polygon> for EdgeList {
    fn from(poly: Hollow2Polygon) -> Self {
        Self { edges: poly.edges }
    }
}

impl Hollow2Polygon {
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeCount` unless exactly 8 edges are given.
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        check_edge_count(&HOLLOW2_LAYOUT, edges.len())?;
        Ok(Self { edges })
    }

    /// Default layout centered on `origin`, notch one third wide and deep.
    #[must_use]
    pub fn with_layout(origin: Point2) -> Self {
        let s = DEFAULT_SIZE;
        let t = s / 3.0;
        let pts = [
            Point2::new(t, 2.0 * t),
            Point2::new(t, s),
            Point2::new(0.0, s),
            Point2::new(0.0, 0.0),
            Point2::new(s, 0.0),
            Point2::new(s, s),
            Point2::new(2.0 * t, s),
            Point2::new(2.0 * t, 2.0 * t),
        ];
        let shift = origin.coords - Vector2::new(s / 2.0, s / 2.0);
        let edges = (0..pts.len())
            .map(|i| Edge::segment(pts[i] + shift, pts[(i + 1) % pts.len()] + shift))
            .collect();
        Self { edges }
    }

    /// The edges as a closed outline.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::LoopNotClosed` if the edges were edited apart.
    pub fn outline(&self) -> Result<WinPolygon> {
        WinPolygon::new(self.edges.clone())
    }
}

impl FrameTopology for Hollow2Polygon {
    fn layout(&self) -> &'static TopologyLayout {
        &HOLLOW2_LAYOUT
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
