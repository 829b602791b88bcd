//! Error types for dataset transformations.

use thiserror::Error;

use tabprep_ingest::IngestError;
use tabprep_model::ModelError;

/// Hard failures of a chain operation.
///
/// Soft conditions (absent column, no loaded table) never produce one of
/// these; they are logged and the table passes through unchanged.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Merge called without `data` or `path`.
    #[error("merge needs either data or a path")]
    MissingMergeSource,

    /// Merge called with both `data` and `path`.
    #[error("merge takes data or a path, not both")]
    AmbiguousMergeSource,

    /// Row events need a non-negative integer position.
    #[error("row index must be a non-negative integer, got {index}")]
    InvalidRowIndex { index: i64 },

    #[error("row index {index} is out of bounds for {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    /// Values supplied for a column do not cover every row.
    #[error("column '{column}' has {actual} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// A column whose values cannot be held as one type.
    #[error("values in the column '{column}' must be of the same type")]
    MixedTypes { column: String },

    /// Declared imputation policy without an implementation.
    #[error("missing-value policy '{policy}' is not implemented")]
    UnsupportedPolicy { policy: String },

    /// A recipe `sample` step asked for at least as many rows as exist.
    #[error("cannot sample {requested} rows from a table of {rows} rows")]
    SampleTooLarge { requested: usize, rows: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
