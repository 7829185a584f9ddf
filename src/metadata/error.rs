//! Metadata error types.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for building and querying result set metadata.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while building or querying a column catalog.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The schema the catalog is built from is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A 1-based column position outside `[1, count]`.
    #[error("column index {index} out of range (1..={count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// No column carries the label.
    #[error("no column labelled '{0}'")]
    UnknownColumn(String),

    /// The label is defined by more than one datasource.
    #[error("column label '{0}' is defined by more than one datasource")]
    AmbiguousLabel(String),
}
