use serde::{Deserialize, Serialize};

use super::bar::{DockEnd, DockType, FrameBar};
use crate::error::{Result, TopologyError};

/// Concrete frame polygon variants; doubles as the serialized type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolyKind {
    Kfc4,
    Hollow2,
}

impl PolyKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kfc4 => "kfc4",
            Self::Hollow2 => "hollow2",
        }
    }
}

/// How a multi-connection bar derives its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulRule {
    /// Always the given counts.
    Fixed { connect_count: u8, dock_count: u8 },
    /// One connection when both watched bar ends are undocked, two otherwise;
    /// two docking points when the bar's own start docks on a frame.
    DockAware { watched: [(usize, DockEnd); 2] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulBar {
    pub bar: usize,
    pub rule: MulRule,
}

/// Read-only topology table shared by every instance of a variant.
#[derive(Debug)]
pub struct TopologyLayout {
    pub kind: PolyKind,
    pub bar_count: usize,
    /// Logical edge slot -> physical bar index.
    pub slot_to_bar: &'static [usize],
    pub multi_bars: &'static [MulBar],
}

/// Outer ring plus two interior verticals; the verticals (bars 3 and 5)
/// each serve two inner sections.
pub static KFC4_LAYOUT: TopologyLayout = TopologyLayout {
    kind: PolyKind::Kfc4,
    bar_count: 8,
    slot_to_bar: &[1, 2, 3, 0, 3, 4, 5, 0, 5, 6, 7, 0],
    multi_bars: &[
        MulBar {
            bar: 3,
            rule: MulRule::DockAware {
                watched: [(2, DockEnd::End), (3, DockEnd::Start)],
            },
        },
        MulBar {
            bar: 5,
            rule: MulRule::DockAware {
                watched: [(5, DockEnd::End), (6, DockEnd::Start)],
            },
        },
    ],
};

/// U-shaped outline around a notch, glazed as two hollows.
///
/// Slots 0-5 walk the left hollow, 6-11 the right one. The notch bottom
/// (bar 7) bounds both hollows and carries the divider between them.
pub static HOLLOW2_LAYOUT: TopologyLayout = TopologyLayout {
    kind: PolyKind::Hollow2,
    bar_count: 8,
    slot_to_bar: &[1, 2, 3, 7, 7, 0, 3, 4, 5, 6, 7, 7],
    multi_bars: &[MulBar {
        bar: 7,
        rule: MulRule::Fixed {
            connect_count: 2,
            dock_count: 2,
        },
    }],
};

impl TopologyLayout {
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_to_bar.len()
    }

    /// Maps a logical slot to its bar.
    #[must_use]
    pub fn idx_from_inner(&self, slot: usize) -> Option<usize> {
        self.slot_to_bar.get(slot).copied()
    }

    /// Slots realized by `bar`, ascending.
    #[must_use]
    pub fn slots_of(&self, bar: usize) -> Vec<usize> {
        self.slot_to_bar
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == bar)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Bar indices allowed more than one topological connection.
    #[must_use]
    pub fn mul_edge_indexes(&self) -> Vec<usize> {
        self.multi_bars.iter().map(|m| m.bar).collect()
    }

    /// Returns a copy of `bars` with multi-connection counts applied.
    ///
    /// Only bars named in `multi_bars` change; the rules read dock types, never
    /// previous counts, so applying this twice gives the same result.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::BarCount` or `TopologyError::BarIndexMismatch`
    /// when `bars` was not built for this layout.
    pub fn fix_frame_cc_bars(&self, bars: &[FrameBar]) -> Result<Vec<FrameBar>> {
        if bars.len() != self.bar_count {
            return Err(TopologyError::BarCount {
                kind: self.kind.as_str(),
                expected: self.bar_count,
                found: bars.len(),
            }
            .into());
        }
        if let Some((position, bar)) = bars.iter().enumerate().find(|(i, b)| b.index != *i) {
            return Err(TopologyError::BarIndexMismatch {
                position,
                index: bar.index,
            }
            .into());
        }

        let mut fixed = bars.to_vec();
        for mul in self.multi_bars {
            let (connect_count, dock_count) = match mul.rule {
                MulRule::Fixed {
                    connect_count,
                    dock_count,
                } => (connect_count, dock_count),
                MulRule::DockAware { watched } => {
                    let free = watched
                        .iter()
                        .all(|(bar, end)| bars[*bar].dock(*end) == DockType::None);
                    let connect = if free { 1 } else { 2 };
                    let dock = if bars[mul.bar].start_dock == DockType::Frame { 2 } else { 1 };
                    (connect, dock)
                }
            };
            fixed[mul.bar].connect_count = connect_count;
            fixed[mul.bar].dock_count = dock_count;
        }
        Ok(fixed)
    }
}
