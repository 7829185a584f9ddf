//! Result set metadata: the flattened, typed column catalog of a schema.
//!
//! A result row is a composite of one or more datasources (collections or
//! subqueries). The root schema names each datasource; each datasource is an
//! object schema whose properties are its columns:
//!
//! ```text
//! root: Object
//! ├── "a": Object { x: int, y: string }      ──►  1  a.x  int     label "x"
//! └── "b": Object { x: string }               ──►  2  a.y  string  label "y"
//!                                                  3  b.x  string  (by position only)
//! ```
//!
//! Datasources are walked in codepoint order, then columns in codepoint
//! order within each datasource. The first datasource to introduce a name
//! claims it as a label.
//!
//! # Example
//!
//! ```
//! use bsonrel::metadata::ResultSetMetadata;
//! use bsonrel::schema::{ObjectSchema, SchemaNode};
//! use bsonrel::types::BsonType;
//!
//! let root = ObjectSchema::new().with_property(
//!     "orders",
//!     ObjectSchema::new()
//!         .with_property("total", SchemaNode::Scalar(BsonType::Decimal))
//!         .with_required("total"),
//! );
//!
//! let metadata = ResultSetMetadata::new(&root.into()).unwrap();
//! assert_eq!(metadata.column_count(), 1);
//! assert_eq!(metadata.position_of_label("total").unwrap(), 1);
//! ```

mod error;
mod result_set;

pub use error::{MetadataError, MetadataResult};
pub use result_set::ResultSetMetadata;

use serde::{Deserialize, Serialize};

use crate::types::{JdbcType, Nullability, PrimitiveType};

/// One column of a flattened catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// The datasource (table) contributing this column.
    pub datasource: String,
    pub name: String,
    pub label: String,
    pub primitive_type: PrimitiveType,
    pub relational_type: JdbcType,
    pub nullability: Nullability,
    pub is_polymorphic: bool,
    /// 1-based and dense across the whole catalog.
    pub ordinal_position: usize,
}

/// Order of columns within a datasource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrder {
    /// Codepoint order of column names.
    #[default]
    Alphabetical,
    /// The order properties were declared in the schema.
    Declared,
}

/// A `(datasource, field)` pair naming one selected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub datasource: String,
    pub field: String,
}

impl SelectItem {
    pub fn new(datasource: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            datasource: datasource.into(),
            field: field.into(),
        }
    }
}
