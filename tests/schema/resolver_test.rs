//! Integration tests for column type and nullability resolution.

use bsonrel::schema::{
    resolve_nullability, resolve_primitive_type, ObjectSchema, SchemaError, SchemaNode,
};
use bsonrel::types::{BsonType, Nullability, PrimitiveType};

fn scalar(t: BsonType) -> SchemaNode {
    SchemaNode::Scalar(t)
}

fn orders() -> ObjectSchema {
    ObjectSchema::new()
        .with_property("id", scalar(BsonType::ObjectId))
        .with_property("note", scalar(BsonType::String))
        .with_property(
            "discount",
            SchemaNode::union([scalar(BsonType::Decimal), scalar(BsonType::Null)]),
        )
        .with_property(
            "total",
            SchemaNode::union([scalar(BsonType::Int), scalar(BsonType::Long)]),
        )
        .with_property("payload", SchemaNode::Any)
        .with_required("id")
        .with_required("discount")
        .with_required("total")
        .with_required("payload")
}

// ============================================================================
// Type resolution
// ============================================================================

#[test]
fn test_scalar_and_object_types() {
    let r = resolve_primitive_type(&scalar(BsonType::Date)).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Bson(BsonType::Date));
    assert!(!r.polymorphic);

    let r = resolve_primitive_type(&ObjectSchema::new().into()).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Bson(BsonType::Object));
    assert!(!r.polymorphic);
}

#[test]
fn test_union_with_null_keeps_the_non_null_type() {
    let node = SchemaNode::union([scalar(BsonType::Null), scalar(BsonType::String)]);
    let r = resolve_primitive_type(&node).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Bson(BsonType::String));
    assert!(!r.polymorphic);
}

#[test]
fn test_union_of_two_types_is_generic() {
    let node = SchemaNode::union([
        scalar(BsonType::Int),
        scalar(BsonType::String),
        scalar(BsonType::Null),
    ]);
    let r = resolve_primitive_type(&node).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Generic);
    assert!(r.polymorphic);
}

#[test]
fn test_numeric_types_are_not_widened() {
    let node = SchemaNode::union([scalar(BsonType::Int), scalar(BsonType::Long)]);
    let r = resolve_primitive_type(&node).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Generic);
}

#[test]
fn test_object_members_count_as_one_type() {
    let node = SchemaNode::union([
        ObjectSchema::new().into(),
        ObjectSchema::new()
            .with_property("x", scalar(BsonType::Int))
            .into(),
    ]);
    let r = resolve_primitive_type(&node).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Bson(BsonType::Object));
}

#[test]
fn test_only_null_members_resolve_to_null() {
    let node = SchemaNode::union([scalar(BsonType::Null)]);
    let r = resolve_primitive_type(&node).unwrap();
    assert_eq!(r.primitive, PrimitiveType::Bson(BsonType::Null));
    assert!(!r.polymorphic);
}

#[test]
fn test_nested_union_is_rejected() {
    let node = SchemaNode::union([
        scalar(BsonType::Int),
        SchemaNode::union([scalar(BsonType::String), scalar(BsonType::Null)]),
    ]);
    assert!(matches!(
        resolve_primitive_type(&node),
        Err(SchemaError::NestedUnion)
    ));

    let node = SchemaNode::union([scalar(BsonType::Int), SchemaNode::Any]);
    assert!(matches!(
        resolve_primitive_type(&node),
        Err(SchemaError::NestedUnion)
    ));
}

#[test]
fn test_nested_member_is_rejected_in_any_position() {
    let nested = [
        SchemaNode::Any,
        SchemaNode::union([scalar(BsonType::Bool), scalar(BsonType::Null)]),
    ];
    for inner in nested {
        let orders = [
            vec![inner.clone(), scalar(BsonType::Int), scalar(BsonType::String)],
            vec![scalar(BsonType::Int), inner.clone(), scalar(BsonType::String)],
            vec![scalar(BsonType::Int), scalar(BsonType::String), inner.clone()],
        ];
        for members in orders {
            assert!(matches!(
                resolve_primitive_type(&SchemaNode::Union(members)),
                Err(SchemaError::NestedUnion)
            ));
        }
    }
}

#[test]
fn test_empty_union_is_malformed() {
    let node = SchemaNode::Union(Vec::new());
    assert!(matches!(
        resolve_primitive_type(&node),
        Err(SchemaError::Malformed(_))
    ));
}

// ============================================================================
// Nullability
// ============================================================================

#[test]
fn test_required_scalar_has_no_nulls() {
    assert_eq!(
        resolve_nullability(&orders(), "id").unwrap(),
        Nullability::NoNulls
    );
}

#[test]
fn test_optional_scalar_is_nullable() {
    assert_eq!(
        resolve_nullability(&orders(), "note").unwrap(),
        Nullability::Nullable
    );
}

#[test]
fn test_required_union_with_null_is_nullable() {
    assert_eq!(
        resolve_nullability(&orders(), "discount").unwrap(),
        Nullability::Nullable
    );
}

#[test]
fn test_required_generic_columns_are_nullable() {
    assert_eq!(
        resolve_nullability(&orders(), "total").unwrap(),
        Nullability::Nullable
    );
    assert_eq!(
        resolve_nullability(&orders(), "payload").unwrap(),
        Nullability::Nullable
    );
}

#[test]
fn test_absent_required_column_is_unknown() {
    let object = orders().with_required("shipped_at");
    assert_eq!(
        resolve_nullability(&object, "shipped_at").unwrap(),
        Nullability::Unknown
    );
}

#[test]
fn test_absent_column_with_additional_properties_is_unknown() {
    let object = orders().allow_additional_properties(true);
    assert_eq!(
        resolve_nullability(&object, "anything").unwrap(),
        Nullability::Unknown
    );
}

#[test]
fn test_absent_column_of_closed_object_is_invalid() {
    let err = resolve_nullability(&orders(), "missing").unwrap_err();
    assert!(matches!(err, SchemaError::InvalidColumn(ref c) if c == "missing"));
    assert_eq!(
        err.to_string(),
        "nullability info requested for invalid column 'missing'"
    );
}

#[test]
fn test_nested_union_column_fails() {
    let object = ObjectSchema::new().with_property(
        "bad",
        SchemaNode::union([SchemaNode::Any, scalar(BsonType::Int)]),
    );
    assert!(matches!(
        resolve_nullability(&object, "bad"),
        Err(SchemaError::NestedUnion)
    ));
}

#[test]
fn test_polymorphic_column_with_trailing_nested_member_fails() {
    let object = ObjectSchema::new()
        .with_property(
            "bad",
            SchemaNode::union([
                scalar(BsonType::Int),
                scalar(BsonType::String),
                SchemaNode::Any,
            ]),
        )
        .with_required("bad");
    assert!(matches!(
        resolve_nullability(&object, "bad"),
        Err(SchemaError::NestedUnion)
    ));
}
