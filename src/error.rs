//! Error types for doctable

use thiserror::Error;

/// Errors that can occur while configuring or driving a table render.
///
/// Configuration mistakes (bad query expressions, duplicate headers) are
/// reported at construction time, before any record is processed. Per-cell
/// evaluation problems never surface here; they are rendered as cell text.
#[derive(Error, Debug)]
pub enum DoctableError {
    /// A column extraction expression failed to compile
    #[error("invalid query expression '{expression}': {message}")]
    InvalidQuery { expression: String, message: String },

    /// Two columns share the same header (headers are case-insensitive)
    #[error("duplicate column header: '{0}'")]
    DuplicateHeader(String),

    /// A column was configured with an empty header
    #[error("column header must not be empty")]
    EmptyHeader,

    /// The table was configured without any columns
    #[error("table has no columns")]
    NoColumns,

    /// A positional row did not match the configured column count
    #[error("row has {actual} cells, expected {expected}")]
    RowLength { expected: usize, actual: usize },

    /// Unrecognized output format name
    #[error("invalid output format: '{0}' (must be 'table' or 'json')")]
    InvalidFormat(String),

    /// Sink write failure while rendering
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize results as JSON
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
