//! Column type and nullability resolution.
//!
//! ```text
//! SchemaNode ──► resolve_primitive_type ──► (PrimitiveType, polymorphic)
//!
//! (ObjectSchema, column) ──► resolve_nullability ──► Nullability
//! ```
//!
//! Null members never contribute a type: `Union[int, null]` is an `int`
//! column that admits nulls. Two or more distinct non-null types widen the
//! column to the generic type.

use tracing::trace;

use super::{ObjectSchema, SchemaError, SchemaNode, SchemaResult};
use crate::types::{BsonType, Nullability, PrimitiveType};

/// The relational view of a schema node's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    pub primitive: PrimitiveType,
    /// True when the node admits more than one non-null type.
    pub polymorphic: bool,
}

impl ResolvedType {
    fn exact(t: BsonType) -> Self {
        Self {
            primitive: PrimitiveType::Bson(t),
            polymorphic: false,
        }
    }

    fn generic() -> Self {
        Self {
            primitive: PrimitiveType::Generic,
            polymorphic: true,
        }
    }
}

/// Resolve a node to its column type.
///
/// Unions of only null members resolve to the null type. Fails with
/// `NestedUnion` when a union member is `Any` or another union and with
/// `Malformed` when a union has no members.
pub fn resolve_primitive_type(node: &SchemaNode) -> SchemaResult<ResolvedType> {
    match node {
        SchemaNode::Any => Ok(ResolvedType::generic()),
        SchemaNode::Scalar(t) => Ok(ResolvedType::exact(*t)),
        SchemaNode::Object(_) => Ok(ResolvedType::exact(BsonType::Object)),
        SchemaNode::Union(members) => resolve_union(members),
    }
}

fn resolve_union(members: &[SchemaNode]) -> SchemaResult<ResolvedType> {
    if members.is_empty() {
        return Err(SchemaError::malformed("anyOf must have at least one member"));
    }

    let mut found: Option<BsonType> = None;
    let mut polymorphic = false;
    for member in members {
        let t = match member {
            SchemaNode::Scalar(t) => *t,
            SchemaNode::Object(_) => BsonType::Object,
            SchemaNode::Any | SchemaNode::Union(_) => return Err(SchemaError::NestedUnion),
        };
        if t == BsonType::Null {
            continue;
        }
        match found {
            None => found = Some(t),
            Some(prev) if prev == t => {}
            // Compatible numeric types are not widened to each other.
            Some(_) => polymorphic = true,
        }
    }

    if polymorphic {
        return Ok(ResolvedType::generic());
    }
    Ok(ResolvedType::exact(found.unwrap_or(BsonType::Null)))
}

/// Classify whether `column` of `parent` may hold nulls.
///
/// Absent columns are `Unknown` when they are required or the object admits
/// additional properties, and `InvalidColumn` otherwise. A null member or a
/// generic type always makes a column `Nullable`, whether or not it is
/// required.
pub fn resolve_nullability(parent: &ObjectSchema, column: &str) -> SchemaResult<Nullability> {
    let Some(node) = parent.property(column) else {
        if parent.is_required(column) || parent.additional_properties {
            return Ok(Nullability::Unknown);
        }
        return Err(SchemaError::InvalidColumn(column.to_string()));
    };

    let resolved = resolve_primitive_type(node)?;
    let nullability = if resolved.primitive.is_generic() || node.admits_null() {
        Nullability::Nullable
    } else if parent.is_required(column) {
        Nullability::NoNulls
    } else {
        Nullability::Nullable
    };

    trace!(column, ?nullability, "resolved nullability");
    Ok(nullability)
}
