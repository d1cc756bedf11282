use super::sash::{SplitterConfig, WidthType};
use crate::error::{Result, ValidationError};
use crate::math::LENGTH_TOLERANCE;

/// Flattened matrix cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SashCell {
    pub track: usize,
    pub column: usize,
    pub width_type: WidthType,
    pub width_value: f64,
    pub is_secondary: bool,
}

/// Resolved extent of one cell along the partition axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CellSpan {
    pub track: usize,
    pub column: usize,
    pub lo: f64,
    pub hi: f64,
    pub is_secondary: bool,
}

/// Checks the matrix shape and overlap, then flattens it row by row.
///
/// Fails on the first problem found; nothing is computed for a bad matrix.
pub(super) fn validate_and_flatten(splitter: &SplitterConfig, overlap: f64) -> Result<Vec<SashCell>> {
    let rows = splitter.rows();
    let columns = splitter.column_count();
    if rows.is_empty() || columns == 0 {
        return Err(ValidationError::EmptySplitter.into());
    }
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != columns {
            return Err(ValidationError::RaggedMatrix {
                row,
                expected: columns,
                found: cells.len(),
            }
            .into());
        }
    }
    if overlap.is_nan() || overlap < 0.0 {
        return Err(ValidationError::NegativeOverlap(overlap).into());
    }

    let mut primaries = vec![0_usize; columns];
    let mut flat = Vec::new();
    for (track, cells) in rows.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            let Some(sash) = cell else { continue };
            if !sash.width_value.is_finite() || sash.width_value <= 0.0 {
                return Err(ValidationError::NonPositiveWidth {
                    track,
                    column,
                    value: sash.width_value,
                }
                .into());
            }
            if !sash.is_secondary {
                primaries[column] += 1;
            }
            flat.push(SashCell {
                track,
                column,
                width_type: sash.width_type,
                width_value: sash.width_value,
                is_secondary: sash.is_secondary,
            });
        }
    }
    if let Some((column, &count)) = primaries.iter().enumerate().find(|(_, c)| **c != 1) {
        return Err(ValidationError::PrimaryCount { column, count }.into());
    }
    Ok(flat)
}

/// Lays one column's sashes (in track order) over `[lo, hi]`.
///
/// Figure cells take their literal width; the remaining span is shared among
/// Ratio cells by ratio. At each internal boundary the secondary side reaches
/// over the primary by `overlap`; two secondaries split it evenly. Adjacent
/// spans therefore intersect by exactly `overlap`.
pub(super) fn column_spans(
    column: usize,
    cells: &[SashCell],
    lo: f64,
    hi: f64,
    overlap: f64,
) -> Result<Vec<CellSpan>> {
    let span = hi - lo;
    let fixed: f64 = cells
        .iter()
        .filter(|c| c.width_type == WidthType::Figure)
        .map(|c| c.width_value)
        .sum();
    let ratio_total: f64 = cells
        .iter()
        .filter(|c| c.width_type == WidthType::Ratio)
        .map(|c| c.width_value)
        .sum();

    let pool = span - fixed;
    if ratio_total > 0.0 {
        if pool <= LENGTH_TOLERANCE {
            return Err(ValidationError::FiguresExceedSpan { column, fixed, span }.into());
        }
    } else if fixed > span + LENGTH_TOLERANCE {
        return Err(ValidationError::FiguresExceedSpan { column, fixed, span }.into());
    } else if fixed < span - LENGTH_TOLERANCE {
        return Err(ValidationError::InsufficientSashes {
            column,
            covered: fixed,
            span,
        }
        .into());
    }

    let widths: Vec<f64> = cells
        .iter()
        .map(|c| match c.width_type {
            WidthType::Figure => c.width_value,
            WidthType::Ratio => pool * c.width_value / ratio_total,
        })
        .collect();

    let n = cells.len();
    let mut reach_lo = vec![0.0; n];
    let mut reach_hi = vec![0.0; n];
    for i in 0..n.saturating_sub(1) {
        match (cells[i].is_secondary, cells[i + 1].is_secondary) {
            (true, false) => reach_hi[i] += overlap,
            (false, true) => reach_lo[i + 1] += overlap,
            _ => {
                reach_hi[i] += overlap * 0.5;
                reach_lo[i + 1] += overlap * 0.5;
            }
        }
    }

    // A sash cannot be covered completely by its neighbours.
    for j in 0..n {
        let from_left = if j > 0 { reach_hi[j - 1] } else { 0.0 };
        let from_right = if j + 1 < n { reach_lo[j + 1] } else { 0.0 };
        if from_left + from_right > 0.0 && from_left + from_right >= widths[j] - LENGTH_TOLERANCE {
            return Err(ValidationError::InsufficientSpanForOverlap {
                column,
                track: cells[j].track,
                overlap,
            }
            .into());
        }
    }

    let mut out = Vec::with_capacity(n);
    let mut start = lo;
    for (j, cell) in cells.iter().enumerate() {
        // Snap the last boundary to the outer bound to absorb rounding.
        let end = if j + 1 == n { hi } else { start + widths[j] };
        out.push(CellSpan {
            track: cell.track,
            column,
            lo: start - reach_lo[j],
            hi: end + reach_hi[j],
            is_secondary: cell.is_secondary,
        });
        start = end;
    }
    Ok(out)
}
