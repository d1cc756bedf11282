use serde::{Deserialize, Serialize};

use crate::geometry::Edge;

/// Bars carry one connection and one docking point unless their layout
/// marks them as multi-connection bars.
pub const SINGLE_CONNECT_COUNT: u8 = 1;
pub const SINGLE_DOCK_COUNT: u8 = 1;

/// What a bar end is docked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DockType {
    #[default]
    None,
    Frame,
    Mullion,
}

/// Which end of a bar a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockEnd {
    Start,
    End,
}

/// A physical connector bar realizing one or more logical edge slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBar {
    pub index: usize,
    pub edge: Edge,
    /// Logical slots mapped onto this bar.
    pub slots: Vec<usize>,
    pub connect_count: u8,
    pub dock_count: u8,
    pub start_dock: DockType,
    pub end_dock: DockType,
}

impl FrameBar {
    /// Creates an undocked single-connection bar.
    #[must_use]
    pub fn new(index: usize, edge: Edge, slots: Vec<usize>) -> Self {
        Self {
            index,
            edge,
            slots,
            connect_count: SINGLE_CONNECT_COUNT,
            dock_count: SINGLE_DOCK_COUNT,
            start_dock: DockType::None,
            end_dock: DockType::None,
        }
    }

    #[must_use]
    pub fn with_docks(mut self, start_dock: DockType, end_dock: DockType) -> Self {
        self.start_dock = start_dock;
        self.end_dock = end_dock;
        self
    }

    #[must_use]
    pub fn dock(&self, end: DockEnd) -> DockType {
        match end {
            DockEnd::Start => self.start_dock,
            DockEnd::End => self.end_dock,
        }
    }

    /// True when the bar joins more than one other bar.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.connect_count > SINGLE_CONNECT_COUNT
    }
}
