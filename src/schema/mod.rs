//! Document schema model.
//!
//! A [`SchemaNode`] is the simplified form of the JSON schema the document
//! store reports for a collection or query result:
//!
//! ```text
//! SchemaNode
//! ├── Any                      {}                          admits every value
//! ├── Scalar(BsonType)         {"bsonType": "int"}
//! ├── Union(Vec<SchemaNode>)   {"anyOf": [...]}            flat, no Any/Union members
//! └── Object(ObjectSchema)     {"bsonType": "object", "properties": {...}, ...}
//! ```
//!
//! Raw JSON documents are converted with [`parse_schema`]; the resolver in
//! [`resolve`] turns nodes into column types and nullability.

mod error;
mod parse;
pub mod resolve;

pub use error::{SchemaError, SchemaResult};
pub use parse::{parse_schema, parse_schema_str, parse_versioned, VersionedSchema};
pub use resolve::{resolve_nullability, resolve_primitive_type, ResolvedType};

use std::collections::BTreeSet;

use crate::types::BsonType;

/// A node of a simplified document schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// The empty schema; every value is admitted.
    Any,
    /// Exactly one primitive type.
    Scalar(BsonType),
    /// One of several member schemas. Members are never `Any` or `Union`.
    Union(Vec<SchemaNode>),
    /// A document with known properties.
    Object(ObjectSchema),
}

impl SchemaNode {
    pub fn scalar(t: BsonType) -> Self {
        SchemaNode::Scalar(t)
    }

    pub fn union(members: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Union(members.into_iter().collect())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, SchemaNode::Any)
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow this node as an object schema or fail with `ExpectedObject`.
    ///
    /// `what` names the node in the error message ("root", a datasource name).
    pub fn expect_object(&self, what: &str) -> SchemaResult<&ObjectSchema> {
        self.as_object()
            .ok_or_else(|| SchemaError::ExpectedObject(what.to_string()))
    }

    /// Whether this node is the null type or a union with a null member.
    pub fn admits_null(&self) -> bool {
        match self {
            SchemaNode::Any => true,
            SchemaNode::Scalar(t) => *t == BsonType::Null,
            SchemaNode::Union(members) => members
                .iter()
                .any(|m| matches!(m, SchemaNode::Scalar(BsonType::Null))),
            SchemaNode::Object(_) => false,
        }
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(obj: ObjectSchema) -> Self {
        SchemaNode::Object(obj)
    }
}

/// An object schema: ordered properties, required names and whether
/// properties beyond the listed ones may appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    properties: Vec<(String, SchemaNode)>,
    pub required: BTreeSet<String>,
    pub additional_properties: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property, keeping the position of a replaced one.
    pub fn with_property(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    pub fn allow_additional_properties(mut self, allow: bool) -> Self {
        self.additional_properties = allow;
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) {
        let name = name.into();
        let schema = schema.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
    }

    /// Add scalar properties, marking the required ones.
    pub fn add_scalar_keys(&mut self, keys: &[ScalarProperty]) {
        for key in keys {
            if key.required {
                self.required.insert(key.name.to_string());
            }
            self.insert(key.name, SchemaNode::Scalar(key.bson_type));
        }
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.properties.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Property names in codepoint order.
    pub fn sorted_property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// Name, type and required flag of a scalar property, for building result
/// schemas of synthetic catalogs.
#[derive(Debug, Clone, Copy)]
pub struct ScalarProperty {
    pub name: &'static str,
    pub bson_type: BsonType,
    pub required: bool,
}

impl ScalarProperty {
    pub const fn required(name: &'static str, bson_type: BsonType) -> Self {
        Self {
            name,
            bson_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, bson_type: BsonType) -> Self {
        Self {
            name,
            bson_type,
            required: false,
        }
    }
}
