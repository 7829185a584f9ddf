//! Conversion from raw JSON schema documents to [`SchemaNode`].
//!
//! The store reports schemas in a permissive JSON-schema dialect:
//! `bsonType` may be a string or a list, `anyOf` may nest, and
//! `additionalProperties` may be a boolean or a sub-schema. Parsing
//! simplifies all of that into the closed [`SchemaNode`] form:
//!
//! - `{"bsonType": ["int", "string"]}` becomes `Union[int, string]`.
//! - `{"bsonType": "object", "properties": ...}` becomes `Object`.
//! - nested `anyOf`s are flattened into their parent union, duplicates are
//!   dropped and a single-member union collapses to that member.
//! - a union admitting `Any` collapses to `Any`.
//! - `{}` is `Any`.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::{ObjectSchema, SchemaError, SchemaNode, SchemaResult};
use crate::types::BsonType;

const BSON_TYPE: &str = "bsonType";
const PROPERTIES: &str = "properties";
const ANY_OF: &str = "anyOf";
const REQUIRED: &str = "required";
const ITEMS: &str = "items";
const ADDITIONAL_PROPERTIES: &str = "additionalProperties";

/// Parse a schema document from a JSON string.
pub fn parse_schema_str(json: &str) -> SchemaResult<SchemaNode> {
    let value: Value = serde_json::from_str(json)?;
    parse_schema(&value)
}

/// Parse and simplify a schema document.
pub fn parse_schema(value: &Value) -> SchemaResult<SchemaNode> {
    let doc = value.as_object().ok_or(SchemaError::InvalidField {
        field: "schema",
        expected: "a document",
        found: json_type_name(value),
    })?;
    parse_document(doc)
}

/// A collection schema together with its version, as returned by the
/// store's schema introspection command.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSchema {
    pub version: i64,
    pub schema: SchemaNode,
}

#[derive(Deserialize)]
struct SchemaEnvelope {
    ok: Value,
    schema: Option<RawVersionedSchema>,
}

#[derive(Deserialize)]
struct RawVersionedSchema {
    #[serde(default)]
    version: Value,
    #[serde(rename = "jsonSchema")]
    json_schema: Value,
}

/// Parse the `{ok, schema: {version, jsonSchema}}` envelope.
///
/// Fails with `Malformed` when `ok` is not 1 or the schema is missing.
pub fn parse_versioned(json: &str) -> SchemaResult<VersionedSchema> {
    let envelope: SchemaEnvelope = serde_json::from_str(json)?;
    if as_i64(&envelope.ok) != Some(1) {
        return Err(SchemaError::malformed("schema command did not succeed"));
    }
    let raw = envelope
        .schema
        .ok_or_else(|| SchemaError::malformed("schema command returned no schema"))?;

    Ok(VersionedSchema {
        version: as_i64(&raw.version).unwrap_or(0),
        schema: parse_schema(&raw.json_schema)?,
    })
}

/// Read an integer that may be encoded as a plain number, a float or an
/// extended-JSON `{"$numberLong": "1"}` / `{"$numberInt": "1"}` wrapper.
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Object(m) => m
            .get("$numberLong")
            .or_else(|| m.get("$numberInt"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        _ => None,
    }
}

fn parse_document(doc: &Map<String, Value>) -> SchemaResult<SchemaNode> {
    let object = parse_object_keywords(doc)?;

    if let Some(items) = doc.get(ITEMS) {
        if !(items.is_object() || items.is_array()) {
            return Err(SchemaError::InvalidField {
                field: ITEMS,
                expected: "a document or an array",
                found: json_type_name(items),
            });
        }
    }

    let mut members = Vec::new();
    if let Some(any_of) = doc.get(ANY_OF) {
        let list = any_of.as_array().ok_or(SchemaError::InvalidField {
            field: ANY_OF,
            expected: "an array",
            found: json_type_name(any_of),
        })?;
        for member in list {
            members.push(parse_schema(member)?);
        }
        if members.is_empty() {
            return Err(SchemaError::malformed("anyOf must have at least one member"));
        }
    }

    if let Some(bson_type) = doc.get(BSON_TYPE) {
        let types = drop_optional_null(parse_bson_types(bson_type)?);
        let object = object.clone().unwrap_or_default();
        for t in types {
            members.push(match t {
                // An array of unknown items admits anything.
                BsonType::Array if !doc.contains_key(ITEMS) => SchemaNode::Any,
                BsonType::Object => SchemaNode::Object(object.clone()),
                other => SchemaNode::Scalar(other),
            });
        }
    }

    if members.is_empty() {
        // No bsonType and no anyOf: only the empty schema is valid here.
        let constrained = object.is_some() || doc.contains_key(ITEMS);
        if constrained {
            return Err(SchemaError::malformed(
                "both bsonType and anyOf are missing and this is not ANY",
            ));
        }
        return Ok(SchemaNode::Any);
    }

    simplify_union(members)
}

/// Flatten nested unions, drop duplicates and collapse trivial unions.
fn simplify_union(members: Vec<SchemaNode>) -> SchemaResult<SchemaNode> {
    let mut flat: Vec<SchemaNode> = Vec::with_capacity(members.len());
    for member in members {
        match member {
            SchemaNode::Any => return Ok(SchemaNode::Any),
            SchemaNode::Union(inner) => {
                for m in inner {
                    if !flat.contains(&m) {
                        flat.push(m);
                    }
                }
            }
            other => {
                if !flat.contains(&other) {
                    flat.push(other);
                }
            }
        }
    }

    trace!(members = flat.len(), "simplified union");
    match flat.len() {
        0 => Err(SchemaError::malformed("anyOf must have at least one member")),
        1 => Ok(flat.remove(0)),
        _ => Ok(SchemaNode::Union(flat)),
    }
}

/// Read `properties`, `required` and `additionalProperties`.
///
/// Returns `None` when the document carries none of them.
fn parse_object_keywords(doc: &Map<String, Value>) -> SchemaResult<Option<ObjectSchema>> {
    let properties = doc.get(PROPERTIES);
    let required = doc.get(REQUIRED);
    let additional = parse_additional_properties(doc.get(ADDITIONAL_PROPERTIES))?;

    if properties.is_none() && required.is_none() && !additional {
        return Ok(None);
    }

    let mut object = ObjectSchema::new().allow_additional_properties(additional);

    if let Some(props) = properties {
        let props = props.as_object().ok_or(SchemaError::InvalidField {
            field: PROPERTIES,
            expected: "a document",
            found: json_type_name(props),
        })?;
        for (name, schema) in props {
            object.insert(name.clone(), parse_schema(schema)?);
        }
    }

    if let Some(required) = required {
        let list = required.as_array().ok_or(SchemaError::InvalidField {
            field: REQUIRED,
            expected: "an array",
            found: json_type_name(required),
        })?;
        for name in list {
            let name = name.as_str().ok_or(SchemaError::InvalidField {
                field: REQUIRED,
                expected: "an array of strings",
                found: json_type_name(name),
            })?;
            object.required.insert(name.to_string());
        }
    }

    Ok(Some(object))
}

/// `additionalProperties` is false when absent and true when it is a
/// sub-schema.
fn parse_additional_properties(value: Option<&Value>) -> SchemaResult<bool> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Object(_)) => Ok(true),
        Some(other) => Err(SchemaError::InvalidField {
            field: ADDITIONAL_PROPERTIES,
            expected: "a boolean or a document",
            found: json_type_name(other),
        }),
    }
}

/// `bsonType` is a single name or a list of names.
fn parse_bson_types(value: &Value) -> SchemaResult<Vec<BsonType>> {
    let names: Vec<&str> = match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(list) => list
            .iter()
            .map(|v| {
                v.as_str().ok_or(SchemaError::InvalidField {
                    field: BSON_TYPE,
                    expected: "an array of strings",
                    found: json_type_name(v),
                })
            })
            .collect::<SchemaResult<_>>()?,
        other => {
            return Err(SchemaError::InvalidField {
                field: BSON_TYPE,
                expected: "a string or an array",
                found: json_type_name(other),
            })
        }
    };

    let mut types = Vec::with_capacity(names.len());
    for name in names {
        let t = BsonType::from_name(name)
            .ok_or_else(|| SchemaError::UnknownBsonType(name.to_string()))?;
        if !types.contains(&t) {
            types.push(t);
        }
    }
    if types.is_empty() {
        return Err(SchemaError::malformed("bsonType must name at least one type"));
    }
    Ok(types)
}

/// `["int", "null"]` names a single type: a list of at most two entries
/// that leaves exactly one type once `null` is removed collapses to it.
/// Longer lists and `["null"]` are kept as they are.
fn drop_optional_null(types: Vec<BsonType>) -> Vec<BsonType> {
    if types.len() > 2 {
        return types;
    }
    let non_null: Vec<BsonType> = types
        .iter()
        .copied()
        .filter(|t| *t != BsonType::Null)
        .collect();
    if non_null.len() == 1 {
        non_null
    } else {
        types
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a document",
    }
}
