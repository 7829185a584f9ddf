//! Collection and index listings as reported by the document store.
//!
//! These are the raw inputs of the table, privilege and index catalogs.
//! They deserialize straight from the store's `listCollections` and
//! `listIndexes` replies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::schema::ObjectSchema;

/// The collections of one database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseListing {
    pub database: String,
    pub collections: Vec<CollectionInfo>,
}

/// The schema of one collection, for column catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub database: String,
    pub table: String,
    pub schema: ObjectSchema,
}

impl TableSchema {
    pub fn new(database: impl Into<String>, table: impl Into<String>, schema: ObjectSchema) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            schema,
        }
    }
}

/// One entry of a collection listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    /// `"collection"`, `"view"` or `"timeseries"`.
    #[serde(rename = "type", default = "default_collection_type")]
    pub kind: String,
}

fn default_collection_type() -> String {
    "collection".to_string()
}

impl CollectionInfo {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// The relational table type: collections are `TABLE`, everything else
    /// is reported under its own name in upper case.
    pub fn table_type(&self) -> String {
        if self.kind.eq_ignore_ascii_case("collection") {
            "TABLE".to_string()
        } else {
            self.kind.to_ascii_uppercase()
        }
    }
}

/// One entry of an index listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    /// Indexed fields in key order, mapped to their direction or index type.
    pub key: Map<String, Value>,
    #[serde(default)]
    pub unique: Option<bool>,
}

/// Sort direction of one indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Ascending,
    Descending,
}

impl KeyDirection {
    /// `"A"` or `"D"`.
    pub fn code(self) -> &'static str {
        match self {
            KeyDirection::Ascending => "A",
            KeyDirection::Descending => "D",
        }
    }
}

impl IndexInfo {
    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }

    /// Indexed fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.key.keys().map(String::as_str)
    }

    /// Fields with an integer direction, in key order.
    ///
    /// Fields indexed by type name (`"2dsphere"`, `"text"`, `"hashed"`) have
    /// no relational sort sequence and are skipped.
    pub fn directed_fields(&self) -> impl Iterator<Item = (&str, KeyDirection)> {
        self.key.iter().filter_map(|(field, direction)| {
            let direction = direction.as_i64()?;
            let direction = if direction > 0 {
                KeyDirection::Ascending
            } else {
                KeyDirection::Descending
            };
            Some((field.as_str(), direction))
        })
    }
}
