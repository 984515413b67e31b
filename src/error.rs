//! Error types for the gridscope analysis engine.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while loading or analysing a series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The data source is missing, unreadable or yielded no observations.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Too few observations for the requested analysis.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The decomposition mode cannot be applied to this series.
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamp-related error (ordering, duplicates, off-grid spacing).
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Undefined values detected where a fully defined series is required.
    #[error("missing values detected in data")]
    MissingValues,

    /// Dimension mismatch between parallel sequences.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
