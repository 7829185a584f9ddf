//! Catalog error types.

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::schema::SchemaError;

/// Result type for catalog row builders.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building synthetic catalog rows.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A name pattern or exclusion expression does not compile.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
