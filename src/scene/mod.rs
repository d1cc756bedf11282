//! Host-side collections the wall tool reads from and appends to.
use slotmap::SlotMap;

use crate::geometry::{Orientation, WinPolygon};

slotmap::new_key_type! {
    /// Unique identifier for a shape held by a [`ShapeManager`].
    pub struct ShapeId;
}

/// A polygon placed in the design, with the winding it is used with.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeObject {
    pub polygon: WinPolygon,
    pub orientation: Orientation,
}

impl ShapeObject {
    #[must_use]
    pub fn new(polygon: WinPolygon, orientation: Orientation) -> Self {
        Self {
            polygon,
            orientation,
        }
    }

    /// Wraps `polygon`, taking the orientation from its winding.
    #[must_use]
    pub fn from_polygon(polygon: WinPolygon) -> Self {
        let orientation = polygon.winding();
        Self::new(polygon, orientation)
    }
}

/// Arena owning the design's shapes, couplings and walls for the life of
/// the document.
///
/// Iteration follows insertion order as long as nothing is removed.
#[derive(Debug, Default)]
pub struct ShapeManager {
    shapes: SlotMap<ShapeId, ShapeObject>,
    couplings: SlotMap<ShapeId, ShapeObject>,
    walls: SlotMap<ShapeId, ShapeObject>,
}

impl ShapeManager {
    /// Creates a new, empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Shapes ---

    pub fn add_shape(&mut self, shape: ShapeObject) -> ShapeId {
        self.shapes.insert(shape)
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&ShapeObject> {
        self.shapes.get(id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &ShapeObject> {
        self.shapes.values()
    }

    // --- Couplings ---

    pub fn add_coupling(&mut self, shape: ShapeObject) -> ShapeId {
        self.couplings.insert(shape)
    }

    pub fn couplings(&self) -> impl Iterator<Item = &ShapeObject> {
        self.couplings.values()
    }

    // --- Walls ---

    pub fn add_wall(&mut self, wall: ShapeObject) -> ShapeId {
        self.walls.insert(wall)
    }

    #[must_use]
    pub fn wall(&self, id: ShapeId) -> Option<&ShapeObject> {
        self.walls.get(id)
    }

    pub fn walls(&self) -> impl Iterator<Item = &ShapeObject> {
        self.walls.values()
    }

    /// Everything a new wall may dock to: shapes first, then walls.
    #[must_use]
    pub fn dock_candidates(&self) -> Vec<ShapeObject> {
        self.shapes.values().chain(self.walls.values()).cloned().collect()
    }

    /// Polygons of the existing walls, for duplicate checks.
    #[must_use]
    pub fn wall_polygons(&self) -> Vec<WinPolygon> {
        self.walls.values().map(|w| w.polygon.clone()).collect()
    }
}

/// Interactive tools a host can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Wall,
}

/// Tracks the active interactive tool.
#[derive(Debug, Default)]
pub struct ToolManager {
    active: Option<ToolKind>,
}

impl ToolManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, tool: ToolKind) {
        self.active = Some(tool);
    }

    /// Releases the active tool, returning it.
    pub fn release(&mut self) -> Option<ToolKind> {
        self.active.take()
    }

    #[must_use]
    pub fn active(&self) -> Option<ToolKind> {
        self.active
    }
}
