use crate::error::{OperationError, Result};
use crate::geometry::{Axis, Edge, Orientation, WinPolygon};
use crate::math::{cross, points_eq, Point2, Vector2, LENGTH_TOLERANCE, TOLERANCE};

/// Areas below this are treated as slivers and dropped from cut results.
const MIN_REGION_AREA: f64 = 1e-6;

/// An infinite cutting line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub point: Point2,
    pub direction: Vector2,
}

impl CutLine {
    #[must_use]
    pub fn new(point: Point2, direction: Vector2) -> Self {
        Self { point, direction }
    }

    /// A line perpendicular to `axis` at `coordinate`.
    ///
    /// The direction is chosen so the low-coordinate side is the left side,
    /// which makes [`split_polygon`] return `(low, high)`.
    #[must_use]
    pub fn axis_aligned(axis: Axis, coordinate: f64) -> Self {
        match axis {
            Axis::X => Self::new(Point2::new(coordinate, 0.0), Vector2::new(0.0, 1.0)),
            Axis::Y => Self::new(Point2::new(0.0, coordinate), Vector2::new(-1.0, 0.0)),
        }
    }

    /// Signed side of `p`: positive on the left of the direction.
    #[must_use]
    pub fn side(&self, p: &Point2) -> f64 {
        cross(&self.direction, &(p - self.point))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A maximal run of boundary pieces on one side of the line.
#[derive(Debug)]
struct Chain {
    side: Side,
    edges: Vec<Edge>,
    start: Point2,
    end: Point2,
}

/// Splits a polygon by one line into its left and right parts.
///
/// Edges crossing the line are split exactly (arcs included). Pieces lying
/// on the line go to the side their interior faces. Each side's boundary
/// chains are then closed along the line, one region per connected
/// component: a concave loop crossing the line four times gives two regions
/// on one side.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if the line has no direction, or
/// `OperationError::Failed` if the boundary chains cannot be closed.
pub fn split_polygon(
    polygon: &WinPolygon,
    line: &CutLine,
) -> Result<(Vec<WinPolygon>, Vec<WinPolygon>)> {
    let scale = line.direction.norm();
    if scale < TOLERANCE {
        return Err(OperationError::InvalidInput(format!(
            "cut line through ({}, {}) has no direction",
            line.point.x, line.point.y
        ))
        .into());
    }
    let unit = line.direction / scale;
    let ccw = polygon.winding() == Orientation::CounterClockwise;

    let mut pieces: Vec<(Edge, Side)> = Vec::new();
    for edge in polygon.edges() {
        let mut bounds = vec![0.0];
        bounds.extend(edge.intersect_line_params(&line.point, &line.direction));
        bounds.push(1.0);
        for w in bounds.windows(2) {
            let piece = edge.sub_edge(w[0], w[1]);
            let s = line.side(&piece.midpoint()) / scale;
            let side = if s > LENGTH_TOLERANCE {
                Side::Left
            } else if s < -LENGTH_TOLERANCE {
                Side::Right
            } else if (piece.tangent_at(0.5).dot(&unit) > 0.0) == ccw {
                // On the line; the interior lies left of travel on a
                // counter-clockwise loop.
                Side::Left
            } else {
                Side::Right
            };
            pieces.push((piece, side));
        }
    }

    let Some(chains) = chains(&pieces) else {
        let edges: Vec<Edge> = pieces.iter().map(|(e, _)| *e).collect();
        let whole: Vec<WinPolygon> = keep_region(WinPolygon::new(edges)?).into_iter().collect();
        return Ok(match pieces.first().map(|(_, side)| *side) {
            Some(Side::Left) => (whole, Vec::new()),
            _ => (Vec::new(), whole),
        });
    };
    Ok((
        close_side(&chains, Side::Left, line, ccw)?,
        close_side(&chains, Side::Right, line, ccw)?,
    ))
}

/// Groups the pieces into chains starting at a side change, or `None` when
/// the whole loop lies on one side.
fn chains(pieces: &[(Edge, Side)]) -> Option<Vec<Chain>> {
    let n = pieces.len();
    let first = (0..n).find(|&i| pieces[i].1 != pieces[(i + n - 1) % n].1)?;
    let mut out: Vec<Chain> = Vec::new();
    for k in 0..n {
        let (edge, side) = pieces[(first + k) % n];
        match out.last_mut() {
            Some(chain) if chain.side == side => {
                chain.edges.push(edge);
                chain.end = edge.end();
            }
            _ => out.push(Chain {
                side,
                edges: vec![edge],
                start: edge.start(),
                end: edge.end(),
            }),
        }
    }
    Some(out)
}

/// Closes one side's chains into regions.
///
/// Every chain ends on the line; the segment closing it runs along the line
/// to the nearest chain start ahead. On a counter-clockwise loop left-side
/// regions close in the line direction and right-side regions against it.
fn close_side(chains: &[Chain], side: Side, line: &CutLine, ccw: bool) -> Result<Vec<WinPolygon>> {
    let unit = line.direction.normalize();
    let along = |p: &Point2| (p - line.point).dot(&unit);
    let sense = if (side == Side::Left) == ccw { 1.0 } else { -1.0 };
    let own: Vec<&Chain> = chains.iter().filter(|c| c.side == side).collect();

    let mut used = vec![false; own.len()];
    let mut regions = Vec::new();
    for seed in 0..own.len() {
        if used[seed] {
            continue;
        }
        let mut edges = Vec::new();
        let mut cur = seed;
        loop {
            used[cur] = true;
            edges.extend_from_slice(&own[cur].edges);
            let end = own[cur].end;
            let u_end = along(&end);
            let next = own
                .iter()
                .enumerate()
                .map(|(i, c)| (i, sense * (along(&c.start) - u_end)))
                .filter(|(_, d)| *d >= -LENGTH_TOLERANCE)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i)
                .ok_or_else(|| {
                    OperationError::Failed(format!(
                        "no chain continues the cut at ({}, {})",
                        end.x, end.y
                    ))
                })?;
            let start = own[next].start;
            if !points_eq(&end, &start, LENGTH_TOLERANCE) {
                edges.push(Edge::segment(end, start));
            }
            if next == seed {
                break;
            }
            if used[next] {
                return Err(OperationError::Failed(format!(
                    "cut chains at ({}, {}) do not form a closed region",
                    start.x, start.y
                ))
                .into());
            }
            cur = next;
        }
        regions.extend(keep_region(WinPolygon::new(edges)?));
    }
    Ok(regions)
}

fn keep_region(region: WinPolygon) -> Option<WinPolygon> {
    (region.signed_area().abs() > MIN_REGION_AREA).then_some(region)
}

/// Cuts a polygon by a set of lines into sub-regions.
///
/// Each line splits every region produced so far; the result lists the
/// surviving regions in a deterministic order (left part before right part).
/// It knows nothing about sashes or tracks.
#[derive(Debug)]
pub struct CutPolygon<'a> {
    polygon: &'a WinPolygon,
    lines: Vec<CutLine>,
}

impl<'a> CutPolygon<'a> {
    /// Creates a new cut operation.
    #[must_use]
    pub fn new(polygon: &'a WinPolygon, lines: Vec<CutLine>) -> Self {
        Self { polygon, lines }
    }

    /// Executes the cut.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if a line has no direction, or
    /// the error from [`split_polygon`] when a cut cannot be closed.
    pub fn execute(&self) -> Result<Vec<WinPolygon>> {
        let mut regions = vec![self.polygon.clone()];
        for line in &self.lines {
            let mut next = Vec::with_capacity(regions.len() * 2);
            for region in &regions {
                let (left, right) = split_polygon(region, line)?;
                next.extend(left);
                next.extend(right);
            }
            regions = next;
        }
        Ok(regions)
    }
}
