use tracing::{debug, instrument};

use super::dock::{get_dock_edge, EdgeInfo};
use super::{DEFAULT_CLICK_HEIGHT, DEFAULT_CLICK_WIDTH};
use crate::error::{OperationError, Result};
use crate::geometry::{Edge, Orientation, WinPolygon};
use crate::math::{Point2, LENGTH_TOLERANCE, TOLERANCE};
use crate::operations::creation::MakeRect;
use crate::scene::ShapeObject;

/// Builds a wall of `thickness` on the outer side of `edge`.
///
/// The outer side cannot be read off the edge alone: for a counter-clockwise
/// owner the interior is on the left, so the wall goes to the right, and the
/// other way round for a clockwise owner. The result is counter-clockwise.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` for a non-positive thickness, or
/// the offset error if the edge cannot be offset.
pub fn make_wall(edge: &Edge, orientation: Orientation, thickness: f64) -> Result<WinPolygon> {
    if thickness.is_nan() || thickness < TOLERANCE {
        return Err(OperationError::InvalidInput(format!(
            "wall thickness must be positive, got {thickness}"
        ))
        .into());
    }
    // Positive offsets go left of travel.
    let outer = edge.offset(-orientation.sign() * thickness)?;
    let wall = WinPolygon::new(vec![
        *edge,
        Edge::segment(edge.end(), outer.end()),
        outer.reversed(),
        Edge::segment(outer.start(), edge.start()),
    ])?;
    Ok(match wall.winding() {
        Orientation::CounterClockwise => wall,
        Orientation::Clockwise => wall.reversed(),
    })
}

/// Builds the wall for `info` unless an identical wall already exists.
///
/// A duplicate is not an error; the caller simply skips creation.
///
/// # Errors
///
/// Propagates errors from [`make_wall`].
pub fn generate_wall(
    existing_walls: &[WinPolygon],
    info: &EdgeInfo,
    thickness: f64,
) -> Result<Option<WinPolygon>> {
    let wall = make_wall(&info.edge, info.orientation, thickness)?;
    if existing_walls
        .iter()
        .any(|w| w.same_shape(&wall, LENGTH_TOLERANCE))
    {
        debug!(distance = info.distance, "wall already exists, skipping");
        return Ok(None);
    }
    Ok(Some(wall))
}

/// Picks the wall to add for a click at `click_point`.
///
/// Docks to the nearest edge of `shapes`; with nothing to dock to, places a
/// `DEFAULT_CLICK_WIDTH` x `DEFAULT_CLICK_HEIGHT` rectangle centered on the
/// click. Returns `None` when the docked wall would duplicate one of `walls`.
///
/// # Errors
///
/// Propagates geometry errors from wall construction.
pub fn wall_shape_to_append(
    shapes: &[ShapeObject],
    walls: &[WinPolygon],
    click_point: &Point2,
    thickness: f64,
) -> Result<Option<WinPolygon>> {
    wall_shape_for_click(
        shapes,
        walls,
        click_point,
        thickness,
        (DEFAULT_CLICK_WIDTH, DEFAULT_CLICK_HEIGHT),
    )
}

#[instrument(skip(shapes, walls), fields(shapes = shapes.len(), walls = walls.len()))]
pub(super) fn wall_shape_for_click(
    shapes: &[ShapeObject],
    walls: &[WinPolygon],
    click_point: &Point2,
    thickness: f64,
    default_size: (f64, f64),
) -> Result<Option<WinPolygon>> {
    match get_dock_edge(shapes, click_point) {
        Some(info) => generate_wall(walls, &info, thickness),
        None => {
            debug!("nothing to dock to, placing default wall");
            let (width, height) = default_size;
            MakeRect::new(*click_point, width, height).execute().map(Some)
        }
    }
}
