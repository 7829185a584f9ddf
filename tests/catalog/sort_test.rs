//! Integration tests for catalog row ordering.

use std::cmp::Ordering;

use bsonrel::catalog::fields::*;
use bsonrel::catalog::{
    compare_rows, sort_rows, type_info_rows, CatalogKind, CatalogRow, CatalogValue, SortKey,
};
use bsonrel::render::render_rows;
use insta::assert_snapshot;

fn table(table_type: &str, cat: &str, name: &str) -> CatalogRow {
    CatalogRow::new()
        .with(TABLE_CAT, cat)
        .with(TABLE_NAME, name)
        .with(TABLE_TYPE, table_type)
}

#[test]
fn test_tables_sort_by_type_then_catalog_then_name() {
    let mut rows = vec![
        table("VIEW", "db1", "a"),
        table("TABLE", "db2", "a"),
        table("TABLE", "db1", "b"),
        table("TABLE", "db1", "a"),
    ];
    sort_rows(&mut rows, CatalogKind::Tables.sort_spec());

    assert_snapshot!(render_rows(&rows, &[TABLE_TYPE, TABLE_CAT, TABLE_NAME]), @r"
    TABLE_TYPE  TABLE_CAT  TABLE_NAME
    TABLE       db1        a
    TABLE       db1        b
    TABLE       db2        a
    VIEW        db1        a
    ");
}

#[test]
fn test_columns_sort_by_numeric_position() {
    let column = |name: &str, position: i64| {
        CatalogRow::new()
            .with(TABLE_CAT, "db")
            .with(TABLE_NAME, "t")
            .with(COLUMN_NAME, name.to_string())
            .with(ORDINAL_POSITION, position)
    };
    let mut rows = vec![column("c", 10), column("a", 2), column("b", 9)];
    sort_rows(&mut rows, CatalogKind::Columns.sort_spec());

    let names: Vec<&str> = rows.iter().filter_map(|r| r.str(COLUMN_NAME)).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_null_catalog_sorts_first() {
    let mut rows = vec![
        CatalogRow::new()
            .with(TABLE_CAT, "db")
            .with(TABLE_NAME, "a"),
        CatalogRow::new()
            .with(TABLE_CAT, CatalogValue::Null)
            .with(TABLE_NAME, "z"),
    ];
    sort_rows(&mut rows, CatalogKind::TablePrivileges.sort_spec());
    assert_eq!(rows[0].str(TABLE_NAME), Some("z"));
    assert!(rows[0].get(TABLE_CAT).unwrap().is_null());
}

#[test]
fn test_false_sorts_before_true() {
    let spec = [SortKey::bool(NON_UNIQUE)];
    let unique = CatalogRow::new().with(NON_UNIQUE, false);
    let non_unique = CatalogRow::new().with(NON_UNIQUE, true);
    assert_eq!(compare_rows(&unique, &non_unique, &spec), Ordering::Less);
    assert_eq!(compare_rows(&non_unique, &unique, &spec), Ordering::Greater);
}

#[test]
fn test_comparison_is_a_total_order_on_equal_keys() {
    let a = table("TABLE", "db", "x");
    let b = table("TABLE", "db", "x").with(REMARKS, "ignored");
    assert_eq!(
        compare_rows(&a, &b, CatalogKind::Tables.sort_spec()),
        Ordering::Equal
    );
}

#[test]
fn test_type_info_sorts_by_code_then_name() {
    let rows = type_info_rows();
    assert_snapshot!(render_rows(&rows, &[TYPE_NAME, DATA_TYPE]), @r"
    TYPE_NAME            DATA_TYPE
    long                 -5
    binData              -2
    objectId             -1
    string               -1
    null                 0
    decimal              3
    int                  4
    double               8
    bool                 16
    date                 93
    array                1111
    bson                 1111
    dbPointer            1111
    javascript           1111
    javascriptWithScope  1111
    maxKey               1111
    minKey               1111
    object               1111
    regex                1111
    symbol               1111
    timestamp            1111
    undefined            1111
    ");
}

#[test]
fn test_table_types_are_sorted() {
    let mut rows = vec![
        CatalogRow::new().with(TABLE_TYPE, "VIEW"),
        CatalogRow::new().with(TABLE_TYPE, "TABLE"),
    ];
    sort_rows(&mut rows, CatalogKind::TableTypes.sort_spec());
    assert_eq!(rows[0].str(TABLE_TYPE), Some("TABLE"));
}
