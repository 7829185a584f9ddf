//! Integration tests for synthetic catalog rows.

use bsonrel::catalog::fields::*;
use bsonrel::catalog::{
    catalog_rows, column_privilege_rows, column_rows, index_info_rows, primary_key_rows, table_privilege_rows,
    table_rows, table_type_rows, type_info_rows, CatalogKind, CatalogValue, DatabaseListing,
    Exclusions, IndexInfo, ListingFilter, TableSchema,
};
use bsonrel::render::render_rows;
use bsonrel::schema::{ObjectSchema, SchemaNode};
use bsonrel::types::{BsonType, Nullability};
use insta::assert_snapshot;

fn listings() -> Vec<DatabaseListing> {
    serde_json::from_str(
        r#"[
            {"database": "zoo", "collections": [{"name": "animals", "type": "collection"}]},
            {"database": "admin", "collections": [{"name": "users", "type": "collection"}]},
            {"database": "shop", "collections": [
                {"name": "recent", "type": "view"},
                {"name": "orders"},
                {"name": "system.views", "type": "collection"},
                {"name": "metrics", "type": "timeseries"}
            ]}
        ]"#,
    )
    .unwrap()
}

fn orders_schema() -> ObjectSchema {
    ObjectSchema::new()
        .with_property("total", SchemaNode::Scalar(BsonType::Decimal))
        .with_property(
            "zip",
            SchemaNode::union([
                SchemaNode::Scalar(BsonType::Int),
                SchemaNode::Scalar(BsonType::String),
            ]),
        )
        .with_property("_id", SchemaNode::Scalar(BsonType::ObjectId))
        .with_property("name", SchemaNode::Scalar(BsonType::String))
        .with_required("_id")
}

fn indexes() -> Vec<IndexInfo> {
    serde_json::from_str(
        r#"[
            {"name": "_id_", "key": {"_id": 1}},
            {"name": "by_customer", "key": {"customer": 1, "placed": -1}},
            {"name": "sku_unique", "key": {"sku": 1, "region": 1}, "unique": true},
            {"name": "location_2dsphere", "key": {"location": "2dsphere"}}
        ]"#,
    )
    .unwrap()
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_catalog_rows_are_sorted_and_skip_internal_databases() {
    let mut databases = listings();
    databases.push(DatabaseListing {
        database: String::new(),
        collections: Vec::new(),
    });
    databases.push(DatabaseListing {
        database: "local".to_string(),
        collections: Vec::new(),
    });

    let rows = catalog_rows(&databases, &ListingFilter::default());
    assert_snapshot!(render_rows(&rows, &[TABLE_CAT]), @r"
    TABLE_CAT
    shop
    zoo
    ");
    assert!(rows
        .iter()
        .all(|r| r.len() == CatalogKind::Catalogs.result_columns().len()));

    // Empty names stay hidden under custom exclusions.
    let filter = ListingFilter::new(Exclusions::new("zoo", "orders").unwrap());
    let rows = catalog_rows(&databases, &filter);
    let names: Vec<&str> = rows.iter().filter_map(|r| r.str(TABLE_CAT)).collect();
    assert_eq!(names, vec!["admin", "local", "shop"]);
}

#[test]
fn test_table_rows_skip_system_names() {
    let rows = table_rows(&listings(), &ListingFilter::default());
    assert_snapshot!(render_rows(&rows, &[TABLE_CAT, TABLE_NAME, TABLE_TYPE]), @r"
    TABLE_CAT  TABLE_NAME  TABLE_TYPE
    shop       orders      TABLE
    zoo        animals     TABLE
    shop       metrics     TIMESERIES
    shop       recent      VIEW
    ");
    assert!(rows.iter().all(|r| r.get(TABLE_SCHEM) == Some(&CatalogValue::Null)));
}

#[test]
fn test_table_rows_with_pattern_and_types() {
    let filter = ListingFilter::default()
        .with_table_pattern(Some("%r%"))
        .unwrap()
        .with_table_types(&["table"]);
    let rows = table_rows(&listings(), &filter);

    let names: Vec<&str> = rows.iter().filter_map(|r| r.str(TABLE_NAME)).collect();
    assert_eq!(names, vec!["orders"]);
}

#[test]
fn test_custom_exclusions() {
    let filter = ListingFilter::new(Exclusions::new("zoo", "orders").unwrap());
    let rows = table_rows(&listings(), &filter);

    let names: Vec<&str> = rows.iter().filter_map(|r| r.str(TABLE_NAME)).collect();
    assert_eq!(names, vec!["users", "system.views", "metrics", "recent"]);
}

#[test]
fn test_table_privileges_grant_select() {
    let rows = table_privilege_rows(&listings(), &ListingFilter::default());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].str(TABLE_CAT), Some("shop"));
    assert_eq!(rows[0].str(TABLE_NAME), Some("metrics"));
    assert!(rows.iter().all(|r| r.str(PRIVILEGE) == Some("SELECT")));
    assert!(rows.iter().all(|r| r.str(GRANTEE) == Some("")));
}

#[test]
fn test_table_types() {
    let rows = table_type_rows();
    let types: Vec<&str> = rows.iter().filter_map(|r| r.str(TABLE_TYPE)).collect();
    assert_eq!(types, vec!["TABLE", "VIEW"]);
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_column_rows() {
    let tables = [TableSchema::new("shop", "orders", orders_schema())];
    let rows = column_rows(&tables, &ListingFilter::default()).unwrap();

    assert_snapshot!(render_rows(&rows, &[
        TABLE_NAME,
        COLUMN_NAME,
        ORDINAL_POSITION,
        DATA_TYPE,
        TYPE_NAME,
        COLUMN_SIZE,
        NULLABLE,
        IS_NULLABLE,
    ]), @r"
    TABLE_NAME  COLUMN_NAME  ORDINAL_POSITION  DATA_TYPE  TYPE_NAME  COLUMN_SIZE  NULLABLE  IS_NULLABLE
    orders      _id          1                 -1         objectId   24           0         NO
    orders      name         2                 -1         string     NULL         1         YES
    orders      total        3                 3          decimal    34           1         YES
    orders      zip          4                 1111       bson       NULL         1         YES
    ");

    let total = &rows[2];
    assert_eq!(total.int(NUM_PREC_RADIX), Some(10));
    assert_eq!(total.int(DECIMAL_DIGITS), Some(34));
    assert_eq!(total.str(IS_AUTOINCREMENT), Some("NO"));
    assert_eq!(total.len(), CatalogKind::Columns.result_columns().len());
}

#[test]
fn test_column_pattern_renumbers_positions() {
    let tables = [TableSchema::new("shop", "orders", orders_schema())];
    let filter = ListingFilter::default()
        .with_column_pattern(Some("%a%"))
        .unwrap();
    let rows = column_rows(&tables, &filter).unwrap();

    let columns: Vec<(&str, i64)> = rows
        .iter()
        .map(|r| (r.str(COLUMN_NAME).unwrap(), r.int(ORDINAL_POSITION).unwrap()))
        .collect();
    assert_eq!(columns, vec![("name", 1), ("total", 2)]);
}

#[test]
fn test_column_rows_sort_by_catalog_and_table() {
    let small = ObjectSchema::new().with_property("b", SchemaNode::Scalar(BsonType::Bool));
    let tables = [
        TableSchema::new("zoo", "animals", small.clone()),
        TableSchema::new("shop", "orders", orders_schema()),
        TableSchema::new("admin", "users", small),
    ];
    let rows = column_rows(&tables, &ListingFilter::default()).unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].str(TABLE_CAT), Some("shop"));
    assert_eq!(rows[4].str(TABLE_CAT), Some("zoo"));
    assert_eq!(rows[4].int(DATA_TYPE), Some(16));
}

#[test]
fn test_column_privileges() {
    let tables = [TableSchema::new("shop", "orders", orders_schema())];
    let filter = ListingFilter::default()
        .with_column_pattern(Some("_id"))
        .unwrap();
    let rows = column_privilege_rows(&tables, &filter).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].str(COLUMN_NAME), Some("_id"));
    assert_eq!(rows[0].str(PRIVILEGE), Some("SELECT"));
}

// ============================================================================
// Indexes
// ============================================================================

#[test]
fn test_primary_key_uses_first_unique_index() {
    let rows = primary_key_rows("shop", "orders", &indexes());
    let keys: Vec<(&str, i64)> = rows
        .iter()
        .map(|r| (r.str(COLUMN_NAME).unwrap(), r.int(KEY_SEQ).unwrap()))
        .collect();
    assert_eq!(keys, vec![("region", 2), ("sku", 1)]);
    assert!(rows.iter().all(|r| r.str(PK_NAME) == Some("sku_unique")));
}

#[test]
fn test_no_unique_index_means_no_primary_key() {
    let indexes: Vec<IndexInfo> =
        serde_json::from_str(r#"[{"name": "_id_", "key": {"_id": 1}}]"#).unwrap();
    assert!(primary_key_rows("shop", "orders", &indexes).is_empty());
}

#[test]
fn test_index_info_rows() {
    let rows = index_info_rows("shop", "orders", &indexes(), false);
    assert_snapshot!(render_rows(&rows, &[
        NON_UNIQUE,
        INDEX_NAME,
        ORDINAL_POSITION,
        COLUMN_NAME,
        ASC_OR_DESC,
    ]), @r"
    NON_UNIQUE  INDEX_NAME   ORDINAL_POSITION  COLUMN_NAME  ASC_OR_DESC
    false       sku_unique   1                 sku          A
    false       sku_unique   2                 region       A
    true        _id_         1                 _id          A
    true        by_customer  1                 customer     A
    true        by_customer  2                 placed       D
    ");

    let unique = index_info_rows("shop", "orders", &indexes(), true);
    assert_eq!(unique.len(), 2);
    assert!(unique.iter().all(|r| r.int(TYPE) == Some(3)));
}

// ============================================================================
// Type info and result metadata
// ============================================================================

#[test]
fn test_type_info_rows() {
    let rows = type_info_rows();
    assert_eq!(rows.len(), BsonType::ALL.len() + 1);

    let string = rows
        .iter()
        .find(|r| r.str(TYPE_NAME) == Some("string"))
        .unwrap();
    assert_eq!(string.str(LITERAL_PREFIX), Some("'"));
    assert_eq!(string.get(CASE_SENSITIVE), Some(&CatalogValue::Bool(true)));
    assert_eq!(string.int(SEARCHABLE), Some(3));

    let bin = rows
        .iter()
        .find(|r| r.str(TYPE_NAME) == Some("binData"))
        .unwrap();
    assert_eq!(bin.int(SEARCHABLE), Some(0));
    assert!(bin.get(LITERAL_PREFIX).unwrap().is_null());
}

#[test]
fn test_catalog_result_metadata() {
    let md = CatalogKind::IndexInfo.result_metadata().unwrap();
    assert_eq!(md.column_count(), 13);
    assert_eq!(md.column_name(4).unwrap(), "NON_UNIQUE");
    assert_eq!(md.column_type_name(4).unwrap(), "bool");
    assert_eq!(md.is_nullable(4).unwrap(), Nullability::NoNulls);
    assert_eq!(md.table_name(4).unwrap(), "");
    assert_eq!(md.position_of_label("FILTER_CONDITION").unwrap(), 13);
}
