//! Frame topology: logical polygon edges collapsed onto physical bars.
//!
//! Each concrete variant owns its edge geometry and points at a static
//! [`TopologyLayout`]; the layout is never copied or mutated per instance.
mod bar;
mod hollow2;
mod kfc4;
mod layout;

pub use bar::{DockEnd, DockType, FrameBar, SINGLE_CONNECT_COUNT, SINGLE_DOCK_COUNT};
pub use hollow2::Hollow2Polygon;
pub use kfc4::Kfc4Polygon;
pub use layout::{MulBar, MulRule, PolyKind, TopologyLayout, HOLLOW2_LAYOUT, KFC4_LAYOUT};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::geometry::Edge;

/// Shared behaviour of polygons whose edges map onto connector bars.
pub trait FrameTopology {
    /// The variant's static topology table.
    fn layout(&self) -> &'static TopologyLayout;

    /// Concrete edges, one per bar.
    fn edges(&self) -> &[Edge];

    /// Maps a logical slot to its bar index.
    fn idx_from_inner(&self, slot: usize) -> Option<usize> {
        self.layout().idx_from_inner(slot)
    }

    /// Bar indices permitted multiple topological connections.
    fn as_mul_edge_indexes(&self) -> Vec<usize> {
        self.layout().mul_edge_indexes()
    }

    /// Returns `bars` with the multi-connection counts applied.
    ///
    /// Must be re-run whenever the caller rebuilds its bars.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if `bars` does not match the layout.
    fn fix_frame_cc_bars(&self, bars: &[FrameBar]) -> Result<Vec<FrameBar>> {
        self.layout().fix_frame_cc_bars(bars)
    }

    /// Builds undocked bars for the edges.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if the edge count does not match the layout.
    fn frametify(&self) -> Result<Vec<FrameBar>> {
        let docks = vec![(DockType::None, DockType::None); self.layout().bar_count];
        self.frametify_with_docks(&docks)
    }

    /// Builds the bars for the edges with the given `(start, end)` docks,
    /// then applies [`FrameTopology::fix_frame_cc_bars`].
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if the edge or dock count does not match
    /// the layout.
    fn frametify_with_docks(&self, docks: &[(DockType, DockType)]) -> Result<Vec<FrameBar>> {
        let layout = self.layout();
        check_edge_count(layout, self.edges().len())?;
        if docks.len() != layout.bar_count {
            return Err(TopologyError::BarCount {
                kind: layout.kind.as_str(),
                expected: layout.bar_count,
                found: docks.len(),
            }
            .into());
        }
        let bars: Vec<FrameBar> = self
            .edges()
            .iter()
            .zip(docks)
            .enumerate()
            .map(|(i, (edge, (start, end)))| {
                FrameBar::new(i, *edge, layout.slots_of(i)).with_docks(*start, *end)
            })
            .collect();
        let bars = layout.fix_frame_cc_bars(&bars)?;
        debug!(
            kind = layout.kind.as_str(),
            bars = bars.len(),
            multi = bars.iter().filter(|b| b.is_multi()).count(),
            "frame built"
        );
        Ok(bars)
    }
}

/// Serialized body shared by the frame variants.
#[derive(Serialize, Deserialize)]
pub(crate) struct EdgeList {
    pub edges: Vec<Edge>,
}

pub(crate) fn check_edge_count(layout: &TopologyLayout, found: usize) -> Result<()> {
    if found == layout.bar_count {
        Ok(())
    } else {
        Err(TopologyError::EdgeCount {
            kind: layout.kind.as_str(),
            expected: layout.bar_count,
            found,
        }
        .into())
    }
}

/// Type-tagged frame polygon: `{"type": "hollow2", "edges": [...]}`.
///
/// Deserializing dispatches on `type` and revalidates the edge count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FramePolygon {
    Kfc4(Kfc4Polygon),
    Hollow2(Hollow2Polygon),
}

impl FramePolygon {
    #[must_use]
    pub fn kind(&self) -> PolyKind {
        self.topology().layout().kind
    }

    #[must_use]
    pub fn topology(&self) -> &dyn FrameTopology {
        match self {
            Self::Kfc4(p) => p,
            Self::Hollow2(p) => p,
        }
    }

    /// # Errors
    ///
    /// Returns `SashframeError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuilds a polygon from its tagged form.
    ///
    /// # Errors
    ///
    /// Returns `SashframeError::Serialization` for an unknown `type` or a
    /// malformed body, including a wrong edge count.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl From<Kfc4Polygon> for FramePolygon {
    fn from(p: Kfc4Polygon) -> Self {
        Self::Kfc4(p)
    }
}

impl From<Hollow2Polygon> for FramePolygon {
    fn from(p: Hollow2Polygon) -> Self {
        Self::Hollow2(p)
    }
}
