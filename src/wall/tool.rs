use tracing::{debug, instrument};

use super::generate::wall_shape_for_click;
use super::WallToolConfig;
use crate::error::{OperationError, Result};
use crate::geometry::WinPolygon;
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::Point2;
use crate::scene::{ShapeId, ShapeManager, ShapeObject, ToolManager};

/// Interactive wall placement.
///
/// A press followed by a release at (nearly) the same point is a click and
/// docks a wall to the nearest edge. A press and release further apart
/// draws a straight wall along the dragged segment.
#[derive(Debug, Clone, Default)]
pub struct WallTool {
    config: WallToolConfig,
    first_pt: Option<Point2>,
    cur_pt: Option<Point2>,
}

impl WallTool {
    #[must_use]
    pub fn new(config: WallToolConfig) -> Self {
        Self {
            config,
            first_pt: None,
            cur_pt: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WallToolConfig {
        &self.config
    }

    pub fn on_press(&mut self, point: Point2) {
        self.first_pt = Some(point);
        self.cur_pt = Some(point);
    }

    /// Tracks the pointer. Ignored until a press has been seen.
    pub fn on_move(&mut self, point: Point2) {
        if self.first_pt.is_some() {
            self.cur_pt = Some(point);
        }
    }

    /// True when the current gesture has not moved past the click epsilon.
    #[must_use]
    pub fn is_click(&self) -> bool {
        match (self.first_pt, self.cur_pt) {
            (Some(first), Some(cur)) => (cur - first).norm() <= self.config.click_epsilon,
            _ => false,
        }
    }

    /// Wall along the dragged segment, `thickness` wide and centered on it.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` without a press, or
    /// `GeometryError::Degenerate` when the drag has zero length.
    pub fn drag_shape(&self) -> Result<WinPolygon> {
        let (first, cur) = self.gesture()?;
        let dir = segment_direction(&first, &cur)?;
        let n = left_normal(&dir) * (self.config.thickness / 2.0);
        WinPolygon::from_points(&[first - n, cur - n, cur + n, first + n])
    }

    /// Finishes the gesture: builds the wall, stores it and releases the
    /// tool.
    ///
    /// Returns the new wall's id, or `None` when a docked wall would
    /// duplicate an existing one. The tool is released and its state reset
    /// whether or not a wall was added.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if nothing was pressed, or any
    /// geometry error from building the wall. The tool is still released.
    #[instrument(skip_all)]
    pub fn complete(
        &mut self,
        shapes: &mut ShapeManager,
        tools: &mut ToolManager,
    ) -> Result<Option<ShapeId>> {
        let wall = self.build(shapes);
        self.first_pt = None;
        self.cur_pt = None;
        tools.release();

        let Some(wall) = wall? else {
            return Ok(None);
        };
        let id = shapes.add_wall(ShapeObject::from_polygon(wall));
        debug!(walls = shapes.walls().count(), "wall added");
        Ok(Some(id))
    }

    fn build(&self, shapes: &ShapeManager) -> Result<Option<WinPolygon>> {
        let (first, _) = self.gesture()?;
        if self.is_click() {
            let candidates = shapes.dock_candidates();
            let walls = shapes.wall_polygons();
            wall_shape_for_click(
                &candidates,
                &walls,
                &first,
                self.config.thickness,
                (self.config.default_click_width, self.config.default_click_height),
            )
        } else {
            self.drag_shape().map(Some)
        }
    }

    fn gesture(&self) -> Result<(Point2, Point2)> {
        match (self.first_pt, self.cur_pt) {
            (Some(first), Some(cur)) => Ok((first, cur)),
            _ => Err(OperationError::InvalidInput("wall tool was never pressed".into()).into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;
    use crate::scene::ToolKind;
    use approx::assert_relative_eq;

    fn square() -> WinPolygon {
        WinPolygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            Point2::new(1000.0, 1000.0),
            Point2::new(0.0, 1000.0),
        ])
        .unwrap()
    }

    fn scene() -> (ShapeManager, ToolManager) {
        let mut shapes = ShapeManager::new();
        shapes.add_shape(ShapeObject::from_polygon(square()));
        let mut tools = ToolManager::new();
        tools.activate(ToolKind::Wall);
        (shapes, tools)
    }

    #[test]
    fn click_docks_and_releases_tool() {
        let (mut shapes, mut tools) = scene();
        let mut tool = WallTool::default();
        tool.on_press(Point2::new(1200.0, 500.0));
        assert!(tool.is_click());

        let id = tool.complete(&mut shapes, &mut tools).unwrap().unwrap();
        let bbox = shapes.wall(id).unwrap().polygon.bounding_box();
        assert_relative_eq!(bbox.min.x, 1000.0);
        assert_relative_eq!(bbox.max.x, 1500.0);
        assert_eq!(tools.active(), None);
    }

    #[test]
    fn repeated_click_adds_no_duplicate() {
        let (mut shapes, mut tools) = scene();
        let mut tool = WallTool::default();
        tool.on_press(Point2::new(500.0, -100.0));
        assert!(tool.complete(&mut shapes, &mut tools).unwrap().is_some());

        tools.activate(ToolKind::Wall);
        tool.on_press(Point2::new(500.0, -100.0));
        assert!(tool.complete(&mut shapes, &mut tools).unwrap().is_none());
        assert_eq!(shapes.walls().count(), 1);
        assert_eq!(tools.active(), None);
    }

    #[test]
    fn drag_draws_centered_wall() {
        let (mut shapes, mut tools) = scene();
        let mut tool = WallTool::new(WallToolConfig {
            thickness: 200.0,
            ..WallToolConfig::default()
        });
        tool.on_press(Point2::new(0.0, 2000.0));
        tool.on_move(Point2::new(1500.0, 2000.0));
        assert!(!tool.is_click());

        let id = tool.complete(&mut shapes, &mut tools).unwrap().unwrap();
        let wall = &shapes.wall(id).unwrap().polygon;
        assert_eq!(wall.winding(), Orientation::CounterClockwise);
        let bbox = wall.bounding_box();
        assert_relative_eq!(bbox.min.y, 1900.0);
        assert_relative_eq!(bbox.max.y, 2100.0);
        assert_relative_eq!(bbox.width(), 1500.0);
    }

    #[test]
    fn complete_without_press_fails_but_releases() {
        let (mut shapes, mut tools) = scene();
        let mut tool = WallTool::default();
        assert!(tool.complete(&mut shapes, &mut tools).is_err());
        assert_eq!(tools.active(), None);
    }

    #[test]
    fn move_before_press_is_ignored() {
        let mut tool = WallTool::default();
        tool.on_move(Point2::new(1.0, 1.0));
        assert!(!tool.is_click());
        assert!(tool.drag_shape().is_err());
    }

    #[test]
    fn click_in_empty_scene_uses_configured_size() {
        let mut shapes = ShapeManager::new();
        let mut tools = ToolManager::new();
        let mut tool = WallTool::new(WallToolConfig {
            default_click_width: 800.0,
            default_click_height: 100.0,
            ..WallToolConfig::default()
        });
        tool.on_press(Point2::new(10.0, 10.0));
        let id = tool.complete(&mut shapes, &mut tools).unwrap().unwrap();
        let bbox = shapes.wall(id).unwrap().polygon.bounding_box();
        assert_relative_eq!(bbox.width(), 800.0);
        assert_relative_eq!(bbox.height(), 100.0);
    }
}
