mod cut;
mod layout;
mod sash;

pub use cut::{split_polygon, CutLine, CutPolygon};
pub use sash::{PartitionGrid, PartitionResult, SashConfig, SplitterConfig, WidthType};

use tracing::{debug, instrument, trace};

use crate::error::{OperationError, Result, ValidationError};
use crate::geometry::{Axis, WinPolygon};
use crate::math::LENGTH_TOLERANCE;
use layout::{column_spans, validate_and_flatten, CellSpan, SashCell};

/// Splits a frame polygon into overlapping sliding-sash regions.
///
/// Computes where to cut from a sash matrix and an overlap amount, hands the
/// cutting to [`CutPolygon`], and maps the returned regions back to their
/// `(track, column)` cells.
///
/// # Algorithm
///
/// 1. Validate and flatten the matrix into per-cell records
/// 2. Read the polygon's span along the partition axis
/// 3. Lay out each column's sashes over that span, inserting the overlap
/// 4. Turn each cell's extent into axis-aligned cut lines
/// 5. Cut the polygon and take the one region lying inside the cell's extent
///
/// On a concave polygon a cell can come out in several disconnected pieces
/// (the two prongs either side of a notch). That is rejected rather than
/// joined, since a sash is a single panel.
///
/// Columns are independent sash lanes over the same outer bounds, so two
/// columns may cut at different coordinates for the same track.
#[derive(Debug)]
pub struct PartitionOverlap {
    polygon: WinPolygon,
}

impl PartitionOverlap {
    /// Creates a partitioner for `polygon`.
    #[must_use]
    pub fn new(polygon: WinPolygon) -> Self {
        Self { polygon }
    }

    /// Partitions the polygon along x (`is_horizontal`) or y.
    ///
    /// Returns a grid shaped like `splitter`; holes stay `None`.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for an empty or ragged matrix, a negative overlap,
    ///   a column without exactly one primary sash, non-positive widths,
    ///   sashes that do not cover the span, an overlap wider than a sash, or
    ///   a cell whose region falls apart into several pieces
    /// - `OperationError::Failed` if the cut yields no region for a cell
    #[instrument(skip(self, splitter), fields(tracks = splitter.track_count(), columns = splitter.column_count()))]
    pub fn partition_slide_by_slide_comp(
        &self,
        splitter: &SplitterConfig,
        overlap: f64,
        is_horizontal: bool,
    ) -> Result<PartitionGrid> {
        let cells = validate_and_flatten(splitter, overlap)?;

        let axis = if is_horizontal { Axis::X } else { Axis::Y };
        let (lo, hi) = self.polygon.bounding_box().span(axis);
        if hi - lo <= LENGTH_TOLERANCE {
            return Err(ValidationError::ZeroSpan.into());
        }

        let mut grid: PartitionGrid = splitter
            .rows()
            .iter()
            .map(|row| vec![None; row.len()])
            .collect();

        for column in 0..splitter.column_count() {
            let lane: Vec<SashCell> = cells.iter().copied().filter(|c| c.column == column).collect();
            let spans = column_spans(column, &lane, lo, hi, overlap)?;
            debug!(column, sashes = spans.len(), "column laid out");

            for span in &spans {
                let polygon = self.cut_cell(axis, lo, hi, span)?;
                grid[span.track][column] = Some(PartitionResult {
                    polygon,
                    is_secondary: span.is_secondary,
                });
            }
        }
        Ok(grid)
    }

    /// Cuts out the region for one cell and matches it by axis range.
    fn cut_cell(&self, axis: Axis, lo: f64, hi: f64, span: &CellSpan) -> Result<WinPolygon> {
        let lines: Vec<CutLine> = [span.lo, span.hi]
            .into_iter()
            .filter(|c| *c > lo + LENGTH_TOLERANCE && *c < hi - LENGTH_TOLERANCE)
            .map(|c| CutLine::axis_aligned(axis, c))
            .collect();
        trace!(track = span.track, column = span.column, lo = span.lo, hi = span.hi, cuts = lines.len());

        let mut regions: Vec<WinPolygon> = CutPolygon::new(&self.polygon, lines)
            .execute()?
            .into_iter()
            .filter(|r| r.bounding_box().within_range(axis, span.lo, span.hi, LENGTH_TOLERANCE))
            .collect();
        match regions.len() {
            0 => Err(OperationError::Failed(format!(
                "no region for track {} column {} in [{}, {}]",
                span.track, span.column, span.lo, span.hi
            ))
            .into()),
            1 => Ok(regions.swap_remove(0)),
            n => Err(ValidationError::DisconnectedSash {
                track: span.track,
                column: span.column,
                regions: n,
            }
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SashframeError;
    use crate::geometry::Edge;
    use crate::math::Point2;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn rect(w: f64, h: f64) -> WinPolygon {
        WinPolygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ])
        .unwrap()
    }

    fn validation(err: SashframeError) -> ValidationError {
        match err {
            SashframeError::Validation(v) => v,
            other => panic!("expected validation error, got {other}"),
        }
    }

    fn x_span(result: &Option<PartitionResult>) -> (f64, f64) {
        result.as_ref().unwrap().polygon.bounding_box().span(Axis::X)
    }

    #[test]
    fn ratio_split_at_midpoint() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(0.5, false))],
            vec![Some(SashConfig::ratio(0.5, true))],
        ]);
        let grid = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, true)
            .unwrap();
        let (a0, a1) = x_span(&grid[0][0]);
        let (b0, b1) = x_span(&grid[1][0]);
        assert_relative_eq!(a0, 0.0, epsilon = 1e-9);
        assert_relative_eq!(a1, 150.0, epsilon = 1e-9);
        assert_relative_eq!(b0, 150.0, epsilon = 1e-9);
        assert_relative_eq!(b1, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn figure_then_remaining_ratio() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::figure(100.0, false))],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let grid = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, true)
            .unwrap();
        let (a0, a1) = x_span(&grid[0][0]);
        let (b0, b1) = x_span(&grid[1][0]);
        assert_relative_eq!(a1 - a0, 100.0, epsilon = 1e-9);
        assert_relative_eq!(b1 - b0, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn overlap_is_exact_between_neighbours() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, true))],
            vec![Some(SashConfig::ratio(1.0, false))],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let grid = PartitionOverlap::new(rect(900.0, 500.0))
            .partition_slide_by_slide_comp(&splitter, 30.0, true)
            .unwrap();
        for t in 0..2 {
            let (_, a1) = x_span(&grid[t][0]);
            let (b0, _) = x_span(&grid[t + 1][0]);
            assert_relative_eq!(a1 - b0, 30.0, epsilon = 1e-6);
        }
        assert!(!grid[1][0].as_ref().unwrap().is_secondary);
    }

    #[test]
    fn vertical_partition_uses_y() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::figure(200.0, false))],
            vec![Some(SashConfig::figure(200.0, true))],
        ]);
        let grid = PartitionOverlap::new(rect(100.0, 400.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, false)
            .unwrap();
        let bottom = grid[0][0].as_ref().unwrap().polygon.bounding_box();
        assert_relative_eq!(bottom.max.y, 200.0, epsilon = 1e-9);
        assert_relative_eq!(bottom.width(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn holes_stay_absent_and_columns_are_independent() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, false)), Some(SashConfig::figure(100.0, true))],
            vec![None, Some(SashConfig::ratio(1.0, false))],
        ]);
        let grid = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, true)
            .unwrap();
        assert!(grid[1][0].is_none());
        let (a0, a1) = x_span(&grid[0][0]);
        assert_relative_eq!(a1 - a0, 300.0, epsilon = 1e-9);
        let (_, b1) = x_span(&grid[0][1]);
        assert_relative_eq!(b1, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, false)), None],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let err = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, true)
            .unwrap_err();
        assert_eq!(
            validation(err),
            ValidationError::RaggedMatrix {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn negative_overlap_is_rejected() {
        let splitter = SplitterConfig::new(vec![vec![Some(SashConfig::ratio(1.0, false))]]);
        let err = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, -1.0, true)
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::NegativeOverlap(-1.0));
    }

    #[test]
    fn primary_count_is_enforced() {
        let none = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, true))],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let two = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, false))],
            vec![Some(SashConfig::ratio(1.0, false))],
        ]);
        let op = PartitionOverlap::new(rect(300.0, 100.0));
        assert_eq!(
            validation(op.partition_slide_by_slide_comp(&none, 0.0, true).unwrap_err()),
            ValidationError::PrimaryCount { column: 0, count: 0 }
        );
        assert_eq!(
            validation(op.partition_slide_by_slide_comp(&two, 0.0, true).unwrap_err()),
            ValidationError::PrimaryCount { column: 0, count: 2 }
        );
    }

    #[test]
    fn empty_splitter_is_rejected() {
        let op = PartitionOverlap::new(rect(300.0, 100.0));
        let err = op
            .partition_slide_by_slide_comp(&SplitterConfig::default(), 0.0, true)
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::EmptySplitter);
    }

    #[test]
    fn arched_frame_keeps_arc_pieces() {
        // 200 wide, 100 high, with a half-circle head of radius 100.
        let arched = WinPolygon::new(vec![
            Edge::segment(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0)),
            Edge::segment(Point2::new(200.0, 0.0), Point2::new(200.0, 100.0)),
            Edge::arc(Point2::new(100.0, 100.0), 100.0, 0.0, PI).unwrap(),
            Edge::segment(Point2::new(0.0, 100.0), Point2::new(0.0, 0.0)),
        ])
        .unwrap();
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, false))],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let grid = PartitionOverlap::new(arched)
            .partition_slide_by_slide_comp(&splitter, 20.0, true)
            .unwrap();

        let primary = &grid[0][0].as_ref().unwrap().polygon;
        let secondary = &grid[1][0].as_ref().unwrap().polygon;
        assert_relative_eq!(primary.signed_area(), 10_000.0 + PI * 2_500.0, epsilon = 1e-6);
        assert_relative_eq!(primary.bounding_box().max.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(x_span(&grid[1][0]).0, 80.0, epsilon = 1e-9);
        for sash in [primary, secondary] {
            assert!(sash.edges().iter().any(Edge::is_arc));
            assert_relative_eq!(sash.bounding_box().max.y, 200.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn flat_polygon_has_zero_span() {
        let flat = WinPolygon::new(vec![
            Edge::segment(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)),
            Edge::segment(Point2::new(100.0, 0.0), Point2::new(0.0, 0.0)),
        ])
        .unwrap();
        let splitter = SplitterConfig::new(vec![vec![Some(SashConfig::ratio(1.0, false))]]);
        let err = PartitionOverlap::new(flat)
            .partition_slide_by_slide_comp(&splitter, 0.0, false)
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::ZeroSpan);
    }

    #[test]
    fn zero_ratio_is_rejected() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::ratio(1.0, false))],
            vec![Some(SashConfig::ratio(0.0, true))],
        ]);
        let err = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 0.0, true)
            .unwrap_err();
        assert_eq!(
            validation(err),
            ValidationError::NonPositiveWidth {
                track: 1,
                column: 0,
                value: 0.0
            }
        );
    }

    #[test]
    fn overlap_swallowing_a_sash_is_rejected() {
        let splitter = SplitterConfig::new(vec![
            vec![Some(SashConfig::figure(50.0, false))],
            vec![Some(SashConfig::ratio(1.0, true))],
        ]);
        let err = PartitionOverlap::new(rect(300.0, 100.0))
            .partition_slide_by_slide_comp(&splitter, 60.0, true)
            .unwrap_err();
        assert_eq!(
            validation(err),
            ValidationError::InsufficientSpanForOverlap {
                column: 0,
                track: 0,
                overlap: 60.0
            }
        );
    }
}
