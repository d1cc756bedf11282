use serde::{Deserialize, Serialize};

use crate::geometry::WinPolygon;

/// How a sash's `width_value` is interpreted along the partition axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthType {
    /// Share of the span left over after all fixed widths.
    Ratio,
    /// Literal distance.
    Figure,
}

/// One cell of the sash design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SashConfig {
    pub width_type: WidthType,
    pub width_value: f64,
    pub is_secondary: bool,
}

impl SashConfig {
    #[must_use]
    pub fn ratio(value: f64, is_secondary: bool) -> Self {
        Self {
            width_type: WidthType::Ratio,
            width_value: value,
            is_secondary,
        }
    }

    #[must_use]
    pub fn figure(value: f64, is_secondary: bool) -> Self {
        Self {
            width_type: WidthType::Figure,
            width_value: value,
            is_secondary,
        }
    }
}

/// A tracks x columns matrix of optional sashes; `None` is a hole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitterConfig {
    rows: Vec<Vec<Option<SashConfig>>>,
}

impl SplitterConfig {
    #[must_use]
    pub fn new(rows: Vec<Vec<Option<SashConfig>>>) -> Self {
        Self { rows }
    }

    /// Rows indexed by track.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<SashConfig>>] {
        &self.rows
    }

    #[must_use]
    pub fn track_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row; rows are checked for equal length separately.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// A partitioned sash region tagged with its originating primary flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionResult {
    pub polygon: WinPolygon,
    pub is_secondary: bool,
}

/// Output grid with the same shape as the input [`SplitterConfig`].
pub type PartitionGrid = Vec<Vec<Option<PartitionResult>>>;
