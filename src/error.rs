use thiserror::Error;

/// Top-level error type for the sashframe engine.
#[derive(Debug, Error)]
pub enum SashframeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("edge loop is not closed at edge {index}")]
    LoopNotClosed { index: usize },
}

/// Malformed design data. These are never recovered from locally.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("splitter matrix is empty")]
    EmptySplitter,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {column} has {count} primary sashes, expected exactly one")]
    PrimaryCount { column: usize, count: usize },

    #[error("overlap must be non-negative, got {0}")]
    NegativeOverlap(f64),

    #[error("sash at track {track}, column {column} has non-positive width {value}")]
    NonPositiveWidth {
        track: usize,
        column: usize,
        value: f64,
    },

    #[error("column {column}: sashes cover {covered} of a {span} span")]
    InsufficientSashes {
        column: usize,
        covered: f64,
        span: f64,
    },

    #[error("column {column}: fixed widths {fixed} exceed the {span} span")]
    FiguresExceedSpan { column: usize, fixed: f64, span: f64 },

    #[error("column {column}: insufficient span for overlap {overlap} at track {track}")]
    InsufficientSpanForOverlap {
        column: usize,
        track: usize,
        overlap: f64,
    },

    #[error("polygon has no extent along the partition axis")]
    ZeroSpan,

    #[error("track {track} column {column}: sash region splits into {regions} pieces")]
    DisconnectedSash {
        track: usize,
        column: usize,
        regions: usize,
    },
}

/// Errors related to frame topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("{kind} polygon needs {expected} edges, got {found}")]
    EdgeCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("bar at position {position} carries index {index}")]
    BarIndexMismatch { position: usize, index: usize },

    #[error("{kind} layout expects {expected} bars, got {found}")]
    BarCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Errors related to operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`SashframeError`].
pub type Result<T> = std::result::Result<T, SashframeError>;
