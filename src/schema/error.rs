//! Schema error types.

use thiserror::Error;

/// Result type for schema parsing and resolution.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by structurally invalid schemas.
///
/// None of these are retriable: the input itself is wrong.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A node is missing the shape its kind requires (e.g. an empty union).
    #[error("invalid schema: {0}")]
    Malformed(String),

    /// A union member is itself a union or `Any`.
    #[error("invalid schema: anyOf subschema must have bsonType field; nested anyOf must be simplified")]
    NestedUnion,

    /// A node that must be an object schema with properties is not.
    #[error("schema for {0} must be an object with properties")]
    ExpectedObject(String),

    /// Nullability or type requested for a column the object does not
    /// describe and does not admit.
    #[error("nullability info requested for invalid column '{0}'")]
    InvalidColumn(String),

    /// A `bsonType` value names no known type.
    #[error("unknown bson type name: \"{0}\"")]
    UnknownBsonType(String),

    /// A schema keyword holds a value of the wrong JSON type.
    #[error("value of '{field}' expected to be {expected} but is {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The schema document is not valid JSON.
    #[error("failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
