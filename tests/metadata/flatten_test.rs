//! Integration tests for flattening result schemas into column catalogs.

use bsonrel::metadata::{MetadataError, ResultSetMetadata, SelectItem};
use bsonrel::render::render_columns;
use bsonrel::schema::{parse_schema_str, ObjectSchema, SchemaError, SchemaNode};
use bsonrel::types::{BsonType, JdbcType, Nullability, PrimitiveType};
use insta::assert_snapshot;

fn scalar(t: BsonType) -> SchemaNode {
    SchemaNode::Scalar(t)
}

/// Two datasources sharing the column name `x`.
fn two_datasources() -> SchemaNode {
    ObjectSchema::new()
        .with_property(
            "b",
            ObjectSchema::new().with_property("x", scalar(BsonType::String)),
        )
        .with_property(
            "a",
            ObjectSchema::new()
                .with_property("y", scalar(BsonType::String))
                .with_property("x", scalar(BsonType::Int))
                .with_required("x"),
        )
        .into()
}

#[test]
fn test_datasources_then_columns_in_codepoint_order() {
    let md = ResultSetMetadata::new(&two_datasources()).unwrap();
    assert_eq!(md.column_count(), 3);

    let order: Vec<(&str, &str, usize)> = md
        .columns()
        .iter()
        .map(|c| (c.datasource.as_str(), c.name.as_str(), c.ordinal_position))
        .collect();
    assert_eq!(order, vec![("a", "x", 1), ("a", "y", 2), ("b", "x", 3)]);

    assert_eq!(md.column_type(1).unwrap(), JdbcType::Integer);
    assert_eq!(md.column_type(3).unwrap(), JdbcType::LongVarchar);
}

#[test]
fn test_first_datasource_claims_the_label() {
    let md = ResultSetMetadata::new(&two_datasources()).unwrap();
    assert_eq!(md.position_of_label("x").unwrap(), 1);
    assert_eq!(md.position_of_label("y").unwrap(), 2);

    // b.x is reachable by position only.
    assert_eq!(md.labels_for("x"), &[1, 3]);
    assert_eq!(md.table_name(3).unwrap(), "b");
    assert_eq!(md.column_label(3).unwrap(), "x");
}

#[test]
fn test_render_two_datasources() {
    let md = ResultSetMetadata::new(&two_datasources()).unwrap();
    assert_snapshot!(render_columns(&md), @r"
    #  datasource  column  type    jdbc         nullable  label
    1  a           x       int     INTEGER      no        x
    2  a           y       string  LONGVARCHAR  yes       y
    3  b           x       string  LONGVARCHAR  yes       -
    ");
}

#[test]
fn test_flattening_is_deterministic() {
    let schema = two_datasources();
    let first = ResultSetMetadata::new(&schema).unwrap();
    let second = ResultSetMetadata::new(&schema).unwrap();
    assert_eq!(first.columns(), second.columns());
}

#[test]
fn test_parsed_schema_with_generic_column() {
    let schema = parse_schema_str(
        r#"{
            "bsonType": "object",
            "properties": {
                "orders": {
                    "bsonType": "object",
                    "properties": {
                        "total": {"bsonType": ["decimal", "null"]},
                        "tags": {"bsonType": "array"},
                        "meta": {},
                        "_id": {"bsonType": "objectId"}
                    },
                    "required": ["_id", "total", "meta"]
                }
            }
        }"#,
    )
    .unwrap();
    let md = ResultSetMetadata::new(&schema).unwrap();

    assert_snapshot!(render_columns(&md), @r"
    #  datasource  column  type      jdbc         nullable  label
    1  orders      _id     objectId  LONGVARCHAR  no        _id
    2  orders      meta    bson      OTHER        yes       meta
    3  orders      tags    bson      OTHER        yes       tags
    4  orders      total   decimal   DECIMAL      no        total
    ");

    let meta = md.position_of_label("meta").unwrap();
    assert!(md.is_polymorphic(meta).unwrap());
    assert_eq!(md.column_type_name(meta).unwrap(), "bson");
    assert_eq!(md.is_nullable(meta).unwrap(), Nullability::Nullable);

    // An array with no item schema is an unconstrained column.
    let tags = md.position_of_label("tags").unwrap();
    assert!(md.is_polymorphic(tags).unwrap());

    // A required `[type, null]` column never holds null.
    let total = md.position_of_label("total").unwrap();
    assert!(!md.is_polymorphic(total).unwrap());
    assert_eq!(md.is_nullable(total).unwrap(), Nullability::NoNulls);
}

#[test]
fn test_polymorphic_accessors() {
    let schema: SchemaNode = ObjectSchema::new()
        .with_property(
            "t",
            ObjectSchema::new()
                .with_property(
                    "v",
                    SchemaNode::union([scalar(BsonType::Long), scalar(BsonType::String)]),
                )
                .with_property("n", scalar(BsonType::Long)),
        )
        .into();
    let md = ResultSetMetadata::new(&schema).unwrap();

    // n at 1, v at 2
    assert_eq!(md.precision(1).unwrap(), 19);
    assert!(md.is_signed(1).unwrap());
    assert!(!md.is_case_sensitive(1).unwrap());

    assert_eq!(md.column_at(2).unwrap().primitive_type, PrimitiveType::Generic);
    assert_eq!(md.column_type(2).unwrap(), JdbcType::Other);
    assert_eq!(md.precision(2).unwrap(), 0);
    assert_eq!(md.scale(2).unwrap(), 0);
    assert!(md.is_signed(2).unwrap());
    assert!(md.is_case_sensitive(2).unwrap());
    assert!(md.is_read_only(2).unwrap());
    assert_eq!(md.catalog_name(2).unwrap(), "");
}

#[test]
fn test_select_order() {
    let select = [SelectItem::new("b", "x"), SelectItem::new("a", "x")];
    let md = ResultSetMetadata::with_select_order(&two_datasources(), &select).unwrap();
    assert_eq!(md.table_name(1).unwrap(), "b");
    assert_eq!(md.position_of_label("x").unwrap(), 1);
    assert_eq!(md.is_nullable(2).unwrap(), Nullability::NoNulls);

    let err = ResultSetMetadata::with_select_order(
        &two_datasources(),
        &[SelectItem::new("a", "missing")],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MetadataError::Schema(SchemaError::InvalidColumn(_))
    ));
}

#[test]
fn test_root_and_datasources_must_be_objects() {
    let err = ResultSetMetadata::new(&scalar(BsonType::Int)).unwrap_err();
    assert_eq!(err.to_string(), "schema for root must be an object with properties");

    let schema: SchemaNode = ObjectSchema::new()
        .with_property("a", scalar(BsonType::Int))
        .into();
    let err = ResultSetMetadata::new(&schema).unwrap_err();
    assert!(matches!(
        err,
        MetadataError::Schema(SchemaError::ExpectedObject(ref n)) if n == "a"
    ));
}

#[test]
fn test_empty_root_has_no_columns() {
    let md = ResultSetMetadata::new(&ObjectSchema::new().into()).unwrap();
    assert_eq!(md.column_count(), 0);
    assert!(!md.has_label("x"));
}
