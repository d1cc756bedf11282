#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use sashframe::error::{SashframeError, ValidationError};
use sashframe::frame::{FramePolygon, FrameTopology, Hollow2Polygon, Kfc4Polygon};
use sashframe::geometry::{Axis, WinPolygon};
use sashframe::math::Point2;
use sashframe::operations::creation::MakeRect;
use sashframe::operations::partition::{PartitionOverlap, SashConfig, SplitterConfig};
use sashframe::scene::{ShapeManager, ShapeObject, ToolKind, ToolManager};
use sashframe::wall::{wall_shape_to_append, WallTool, DEFAULT_CLICK_HEIGHT, DEFAULT_CLICK_WIDTH};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn frame_300x100() -> WinPolygon {
    MakeRect::from_corners(Point2::new(0.0, 0.0), Point2::new(300.0, 100.0))
        .execute()
        .unwrap()
}

fn square_1000() -> WinPolygon {
    MakeRect::from_corners(Point2::new(0.0, 0.0), Point2::new(1000.0, 1000.0))
        .execute()
        .unwrap()
}

#[test]
fn overlapping_tracks_cover_span() {
    init_tracing();
    let splitter = SplitterConfig::new(vec![
        vec![Some(SashConfig::ratio(1.0, true))],
        vec![Some(SashConfig::ratio(1.0, true))],
        vec![Some(SashConfig::ratio(1.0, false))],
    ]);
    let grid = PartitionOverlap::new(frame_300x100())
        .partition_slide_by_slide_comp(&splitter, 20.0, true)
        .unwrap();

    let spans: Vec<(f64, f64)> = grid
        .iter()
        .map(|row| row[0].as_ref().unwrap().polygon.bounding_box().span(Axis::X))
        .collect();
    assert_relative_eq!(spans[0].0, 0.0, epsilon = 1e-6);
    assert_relative_eq!(spans[2].1, 300.0, epsilon = 1e-6);
    for pair in spans.windows(2) {
        assert_relative_eq!(pair[0].1 - pair[1].0, 20.0, epsilon = 1e-6);
    }

    let primaries = grid
        .iter()
        .filter(|row| !row[0].as_ref().unwrap().is_secondary)
        .count();
    assert_eq!(primaries, 1);
}

#[test]
fn columns_lay_out_independently_with_holes() {
    init_tracing();
    let splitter = SplitterConfig::new(vec![
        vec![Some(SashConfig::ratio(1.0, true)), Some(SashConfig::figure(300.0, false))],
        vec![Some(SashConfig::ratio(1.0, false)), None],
    ]);
    let grid = PartitionOverlap::new(frame_300x100())
        .partition_slide_by_slide_comp(&splitter, 0.0, true)
        .unwrap();

    assert!(grid[1][1].is_none());
    let wide = grid[0][1].as_ref().unwrap().polygon.bounding_box();
    assert_relative_eq!(wide.width(), 300.0, epsilon = 1e-6);
    let left = grid[0][0].as_ref().unwrap().polygon.bounding_box();
    assert_relative_eq!(left.span(Axis::X).1, 150.0, epsilon = 1e-6);
}

#[test]
fn ratio_and_figure_widths() {
    let poly = PartitionOverlap::new(frame_300x100());

    let halves = SplitterConfig::new(vec![
        vec![Some(SashConfig::ratio(0.5, false))],
        vec![Some(SashConfig::ratio(0.5, true))],
    ]);
    let grid = poly.partition_slide_by_slide_comp(&halves, 0.0, true).unwrap();
    let a = grid[0][0].as_ref().unwrap().polygon.bounding_box();
    let b = grid[1][0].as_ref().unwrap().polygon.bounding_box();
    assert_relative_eq!(a.width(), 150.0, epsilon = 1e-6);
    assert_relative_eq!(b.span(Axis::X).0, 150.0, epsilon = 1e-6);

    let mixed = SplitterConfig::new(vec![
        vec![Some(SashConfig::figure(100.0, false))],
        vec![Some(SashConfig::ratio(1.0, true))],
    ]);
    let grid = poly.partition_slide_by_slide_comp(&mixed, 0.0, true).unwrap();
    assert_relative_eq!(grid[0][0].as_ref().unwrap().polygon.bounding_box().width(), 100.0, epsilon = 1e-6);
    assert_relative_eq!(grid[1][0].as_ref().unwrap().polygon.bounding_box().width(), 200.0, epsilon = 1e-6);
}

#[test]
fn malformed_matrices_are_rejected() {
    let poly = PartitionOverlap::new(frame_300x100());
    let ok_row = || vec![Some(SashConfig::ratio(1.0, false))];

    let ragged = SplitterConfig::new(vec![ok_row(), vec![None, None]]);
    assert!(matches!(
        poly.partition_slide_by_slide_comp(&ragged, 0.0, true),
        Err(SashframeError::Validation(ValidationError::RaggedMatrix { .. }))
    ));

    let single = SplitterConfig::new(vec![ok_row()]);
    assert!(matches!(
        poly.partition_slide_by_slide_comp(&single, -1.0, true),
        Err(SashframeError::Validation(ValidationError::NegativeOverlap(_)))
    ));

    let two_primaries = SplitterConfig::new(vec![ok_row(), ok_row()]);
    assert!(matches!(
        poly.partition_slide_by_slide_comp(&two_primaries, 0.0, true),
        Err(SashframeError::Validation(ValidationError::PrimaryCount { count: 2, .. }))
    ));

    let no_primary = SplitterConfig::new(vec![vec![Some(SashConfig::ratio(1.0, true))]]);
    assert!(matches!(
        poly.partition_slide_by_slide_comp(&no_primary, 0.0, true),
        Err(SashframeError::Validation(ValidationError::PrimaryCount { count: 0, .. }))
    ));
}

#[test]
fn splitter_reads_from_json() {
    let splitter: SplitterConfig = serde_json::from_str(
        r#"[
            [{"widthType": "Figure", "widthValue": 100.0, "isSecondary": false}],
            [{"widthType": "Ratio", "widthValue": 1.0, "isSecondary": true}]
        ]"#,
    )
    .unwrap();
    let poly = PartitionOverlap::new(frame_300x100());
    let grid = poly.partition_slide_by_slide_comp(&splitter, 0.0, true).unwrap();
    assert_relative_eq!(grid[1][0].as_ref().unwrap().polygon.bounding_box().width(), 200.0, epsilon = 1e-6);

    // Along y the frame is only 100 high, leaving nothing for the ratio sash.
    assert!(matches!(
        poly.partition_slide_by_slide_comp(&splitter, 0.0, false),
        Err(SashframeError::Validation(ValidationError::FiguresExceedSpan { .. }))
    ));
}

fn equal_tracks(count: usize) -> SplitterConfig {
    SplitterConfig::new(
        (0..count)
            .map(|t| vec![Some(SashConfig::ratio(1.0, t > 0))])
            .collect(),
    )
}

/// True if some edge of `poly` runs through the open notch of the default
/// Hollow2 frame.
fn crosses_notch(poly: &WinPolygon) -> bool {
    poly.edges().iter().any(|e| {
        let m = e.midpoint();
        m.x > -350.0 + 1e-6 && m.x < 350.0 - 1e-6 && m.y > 350.0 + 1e-6
    })
}

#[test]
fn concave_frame_splits_around_the_notch() {
    init_tracing();
    let outline = Hollow2Polygon::with_layout(Point2::origin()).outline().unwrap();
    let grid = PartitionOverlap::new(outline)
        .partition_slide_by_slide_comp(&equal_tracks(3), 0.0, true)
        .unwrap();

    let middle = &grid[1][0].as_ref().unwrap().polygon;
    let bbox = middle.bounding_box();
    assert_relative_eq!(bbox.span(Axis::X).0, -350.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.span(Axis::X).1, 350.0, epsilon = 1e-6);
    assert_relative_eq!(bbox.max.y, 350.0, epsilon = 1e-6);
    assert_relative_eq!(middle.signed_area(), 980_000.0, epsilon = 1e-3);
    for row in &grid {
        let sash = &row[0].as_ref().unwrap().polygon;
        assert!(!crosses_notch(sash));
    }
    let total: f64 = grid
        .iter()
        .map(|row| row[0].as_ref().unwrap().polygon.signed_area())
        .sum();
    assert_relative_eq!(total, 2100.0 * 2100.0 - 700.0 * 700.0, epsilon = 1e-3);
}

#[test]
fn vertical_split_keeps_the_notched_top_whole() {
    let outline = Hollow2Polygon::with_layout(Point2::origin()).outline().unwrap();
    let grid = PartitionOverlap::new(outline)
        .partition_slide_by_slide_comp(&equal_tracks(2), 0.0, false)
        .unwrap();

    let bottom = &grid[0][0].as_ref().unwrap().polygon;
    let top = &grid[1][0].as_ref().unwrap().polygon;
    assert_relative_eq!(bottom.signed_area(), 2100.0 * 1050.0, epsilon = 1e-3);
    assert_relative_eq!(top.signed_area(), 2100.0 * 1050.0 - 700.0 * 700.0, epsilon = 1e-3);
    assert!(!crosses_notch(top));
}

#[test]
fn sash_split_by_the_notch_is_rejected() {
    // The top quarter starts above the notch floor, leaving two prongs.
    let outline = Hollow2Polygon::with_layout(Point2::origin()).outline().unwrap();
    let err = PartitionOverlap::new(outline)
        .partition_slide_by_slide_comp(&equal_tracks(4), 0.0, false)
        .unwrap_err();
    assert!(matches!(
        err,
        SashframeError::Validation(ValidationError::DisconnectedSash {
            track: 3,
            column: 0,
            regions: 2
        })
    ));
}

#[test]
fn hollow2_topology_is_stable() {
    let poly = Hollow2Polygon::with_layout(Point2::origin());
    assert_eq!(poly.as_mul_edge_indexes(), vec![7]);

    let bars = poly.frametify().unwrap();
    let once = poly.fix_frame_cc_bars(&bars).unwrap();
    let twice = poly.fix_frame_cc_bars(&once).unwrap();
    assert_eq!(once, twice);
    assert_eq!((twice[7].connect_count, twice[7].dock_count), (2, 2));
    assert!(twice[..7].iter().all(|b| b.connect_count == 1 && b.dock_count == 1));
}

#[test]
fn frame_polygons_round_trip_through_json() {
    for frame in [
        FramePolygon::from(Kfc4Polygon::with_layout(Point2::new(100.0, 0.0))),
        FramePolygon::from(Hollow2Polygon::with_layout(Point2::origin())),
    ] {
        let json = frame.to_json().unwrap();
        assert_eq!(json["type"], frame.kind().as_str());
        assert_eq!(FramePolygon::from_json(json).unwrap(), frame);
    }
}

#[test]
fn wall_docks_outward_then_suppresses_duplicate() {
    init_tracing();
    let square = square_1000();
    let shapes = vec![ShapeObject::from_polygon(square.clone())];
    let walls = vec![square.clone()];
    let click = Point2::new(1100.0, 500.0);

    let wall = wall_shape_to_append(&shapes, &walls, &click, 500.0)
        .unwrap()
        .unwrap();
    let bbox = wall.bounding_box();
    assert_relative_eq!(bbox.span(Axis::X).0, 1000.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.span(Axis::X).1, 1500.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.height(), 1000.0, epsilon = 1e-9);
    assert!(!walls.iter().any(|w| w.same_shape(&wall, 1e-6)));

    let walls = vec![square.clone(), wall.clone()];
    let shapes = vec![ShapeObject::from_polygon(square), ShapeObject::from_polygon(wall)];
    assert!(wall_shape_to_append(&shapes, &walls, &click, 500.0)
        .unwrap()
        .is_none());
}

#[test]
fn empty_scene_places_default_wall() {
    let p = Point2::new(-300.0, 75.0);
    let wall = wall_shape_to_append(&[], &[], &p, 500.0).unwrap().unwrap();
    let bbox = wall.bounding_box();
    assert_relative_eq!(bbox.center(), p, epsilon = 1e-9);
    assert_relative_eq!(bbox.width(), DEFAULT_CLICK_WIDTH, epsilon = 1e-9);
    assert_relative_eq!(bbox.height(), DEFAULT_CLICK_HEIGHT, epsilon = 1e-9);
}

#[test]
fn wall_tool_session() {
    init_tracing();
    let mut shapes = ShapeManager::new();
    shapes.add_shape(ShapeObject::from_polygon(square_1000()));
    let mut tools = ToolManager::new();
    let mut tool = WallTool::default();

    tools.activate(ToolKind::Wall);
    tool.on_press(Point2::new(500.0, 1050.0));
    let top = tool.complete(&mut shapes, &mut tools).unwrap();
    assert!(top.is_some());
    assert_eq!(tools.active(), None);

    tools.activate(ToolKind::Wall);
    tool.on_press(Point2::new(-2000.0, 0.0));
    tool.on_move(Point2::new(-2000.0, 1000.0));
    let dragged = tool.complete(&mut shapes, &mut tools).unwrap().unwrap();
    let bbox = shapes.wall(dragged).unwrap().polygon.bounding_box();
    assert_relative_eq!(bbox.width(), 500.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.height(), 1000.0, epsilon = 1e-9);
    assert_eq!(shapes.walls().count(), 2);
}
