//! Synthetic catalog row builders.
//!
//! Each builder turns listing inputs into the rows of one relational
//! catalog, already sorted by that catalog's fixed sort keys.

use tracing::debug;

use super::fields::*;
use super::listing::{DatabaseListing, IndexInfo, TableSchema};
use super::pattern::{Exclusions, NamePattern};
use super::sort::{sort_rows, CatalogKind, CatalogRow, CatalogValue};
use super::CatalogResult;
use crate::metadata::{FieldOrder, MetadataResult, ResultSetMetadata};
use crate::schema::{ObjectSchema, ScalarProperty, SchemaNode};
use crate::types::{BsonType, Nullability, PrimitiveType, TYPE_TABLE};

/// `DatabaseMetaData.tableIndexOther`.
const TABLE_INDEX_OTHER: i32 = 3;

/// The only privilege granted on anything.
const SELECT_PRIVILEGE: &str = "SELECT";

/// Which tables and columns a listing includes.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub exclusions: Exclusions,
    pub table: NamePattern,
    pub column: NamePattern,
    /// Table types to keep, compared case-insensitively. `None` keeps all.
    pub table_types: Option<Vec<String>>,
}

impl ListingFilter {
    pub fn new(exclusions: Exclusions) -> Self {
        Self {
            exclusions,
            ..Self::default()
        }
    }

    pub fn with_table_pattern(mut self, pattern: Option<&str>) -> CatalogResult<Self> {
        self.table = NamePattern::new(pattern)?;
        Ok(self)
    }

    pub fn with_column_pattern(mut self, pattern: Option<&str>) -> CatalogResult<Self> {
        self.column = NamePattern::new(pattern)?;
        Ok(self)
    }

    pub fn with_table_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.table_types = Some(types.iter().map(|t| t.as_ref().to_string()).collect());
        self
    }

    fn allows_table(&self, database: &str, table: &str) -> bool {
        self.exclusions.allows_database(database)
            && self.exclusions.allows_collection(table)
            && self.table.matches(table)
    }

    fn allows_table_type(&self, table_type: &str) -> bool {
        self.table_types.as_ref().map_or(true, |types| {
            types.iter().any(|t| t.eq_ignore_ascii_case(table_type))
        })
    }
}

/// `getTables`: one row per listed collection.
pub fn table_rows(databases: &[DatabaseListing], filter: &ListingFilter) -> Vec<CatalogRow> {
    let mut rows = Vec::new();
    for db in databases {
        for collection in &db.collections {
            let table_type = collection.table_type();
            if !filter.allows_table(&db.database, &collection.name)
                || !filter.allows_table_type(&table_type)
            {
                continue;
            }
            rows.push(
                CatalogRow::new()
                    .with(TABLE_CAT, db.database.as_str())
                    .with(TABLE_SCHEM, CatalogValue::Null)
                    .with(TABLE_NAME, collection.name.as_str())
                    .with(TABLE_TYPE, table_type)
                    .with(REMARKS, CatalogValue::Null)
                    .with(TYPE_CAT, CatalogValue::Null)
                    .with(TYPE_SCHEM, CatalogValue::Null)
                    .with(TYPE_NAME, CatalogValue::Null)
                    .with(SELF_REFERENCING_COL_NAME, CatalogValue::Null)
                    .with(REF_GENERATION, CatalogValue::Null),
            );
        }
    }
    finish(CatalogKind::Tables, rows)
}

/// `getTablePrivileges`: every listed collection is readable.
pub fn table_privilege_rows(
    databases: &[DatabaseListing],
    filter: &ListingFilter,
) -> Vec<CatalogRow> {
    let mut rows = Vec::new();
    for db in databases {
        for collection in &db.collections {
            if !filter.allows_table(&db.database, &collection.name) {
                continue;
            }
            rows.push(
                CatalogRow::new()
                    .with(TABLE_CAT, db.database.as_str())
                    .with(TABLE_SCHEM, CatalogValue::Null)
                    .with(TABLE_NAME, collection.name.as_str())
                    .with(GRANTOR, CatalogValue::Null)
                    .with(GRANTEE, "")
                    .with(PRIVILEGE, SELECT_PRIVILEGE)
                    .with(IS_GRANTABLE, CatalogValue::Null),
            );
        }
    }
    finish(CatalogKind::TablePrivileges, rows)
}

/// `getTableTypes`.
pub fn table_type_rows() -> Vec<CatalogRow> {
    let rows = ["TABLE", "VIEW"]
        .into_iter()
        .map(|t| CatalogRow::new().with(TABLE_TYPE, t))
        .collect();
    finish(CatalogKind::TableTypes, rows)
}

/// `getCatalogs`: one row per listed database that is not excluded.
pub fn catalog_rows(databases: &[DatabaseListing], filter: &ListingFilter) -> Vec<CatalogRow> {
    let rows = databases
        .iter()
        .filter(|db| filter.exclusions.allows_database(&db.database))
        .map(|db| CatalogRow::new().with(TABLE_CAT, db.database.as_str()))
        .collect();
    finish(CatalogKind::Catalogs, rows)
}

/// `getColumns`: one row per column of each table schema.
///
/// Ordinal positions follow column-name order among the columns matching
/// the column pattern.
pub fn column_rows(tables: &[TableSchema], filter: &ListingFilter) -> CatalogResult<Vec<CatalogRow>> {
    let mut rows = Vec::new();
    for table in tables {
        if !filter.allows_table(&table.database, &table.table) {
            continue;
        }
        let metadata = table_metadata(table, &filter.column)?;
        for column in metadata.columns() {
            let info = TYPE_TABLE.get(column.primitive_type);
            rows.push(
                CatalogRow::new()
                    .with(TABLE_CAT, table.database.as_str())
                    .with(TABLE_SCHEM, CatalogValue::Null)
                    .with(TABLE_NAME, table.table.as_str())
                    .with(COLUMN_NAME, column.name.as_str())
                    .with(DATA_TYPE, column.relational_type.code())
                    .with(TYPE_NAME, column.primitive_type.name())
                    .with(COLUMN_SIZE, info.precision)
                    .with(BUFFER_LENGTH, 0)
                    .with(DECIMAL_DIGITS, info.decimal_digits)
                    .with(NUM_PREC_RADIX, info.num_prec_radix)
                    .with(NULLABLE, column.nullability.code())
                    .with(REMARKS, "")
                    .with(COLUMN_DEF, CatalogValue::Null)
                    .with(SQL_DATA_TYPE, 0)
                    .with(SQL_DATETIME_SUB, 0)
                    .with(CHAR_OCTET_LENGTH, info.char_octet_length())
                    .with(ORDINAL_POSITION, column.ordinal_position)
                    .with(IS_NULLABLE, column.nullability.is_nullable_text())
                    .with(SCOPE_CATALOG, CatalogValue::Null)
                    .with(SCOPE_SCHEMA, CatalogValue::Null)
                    .with(SCOPE_TABLE, CatalogValue::Null)
                    .with(SOURCE_DATA_TYPE, 0)
                    .with(IS_AUTOINCREMENT, "NO")
                    .with(IS_GENERATEDCOLUMN, ""),
            );
        }
    }
    Ok(finish(CatalogKind::Columns, rows))
}

/// `getColumnPrivileges`: every column is readable.
pub fn column_privilege_rows(
    tables: &[TableSchema],
    filter: &ListingFilter,
) -> CatalogResult<Vec<CatalogRow>> {
    let mut rows = Vec::new();
    for table in tables {
        if !filter.allows_table(&table.database, &table.table) {
            continue;
        }
        let metadata = table_metadata(table, &filter.column)?;
        for column in metadata.columns() {
            rows.push(
                CatalogRow::new()
                    .with(TABLE_CAT, table.database.as_str())
                    .with(TABLE_SCHEM, CatalogValue::Null)
                    .with(TABLE_NAME, table.table.as_str())
                    .with(COLUMN_NAME, column.name.as_str())
                    .with(GRANTOR, CatalogValue::Null)
                    .with(GRANTEE, "")
                    .with(PRIVILEGE, SELECT_PRIVILEGE)
                    .with(IS_GRANTABLE, CatalogValue::Null),
            );
        }
    }
    Ok(finish(CatalogKind::ColumnPrivileges, rows))
}

/// Flatten one table schema, keeping only the columns `column` matches.
fn table_metadata(table: &TableSchema, column: &NamePattern) -> CatalogResult<ResultSetMetadata> {
    let mut filtered = ObjectSchema::new().allow_additional_properties(table.schema.additional_properties);
    filtered.required = table.schema.required.clone();
    for (name, node) in table.schema.properties() {
        if column.matches(name) {
            filtered.insert(name, node.clone());
        }
    }
    let root: SchemaNode = ObjectSchema::new()
        .with_property(table.table.as_str(), filtered)
        .into();
    Ok(ResultSetMetadata::new(&root)?)
}

/// `getPrimaryKeys`: the fields of the first unique index.
pub fn primary_key_rows(database: &str, table: &str, indexes: &[IndexInfo]) -> Vec<CatalogRow> {
    let Some(index) = indexes.iter().find(|i| i.is_unique()) else {
        return Vec::new();
    };
    let rows = index
        .fields()
        .enumerate()
        .map(|(i, field)| {
            CatalogRow::new()
                .with(TABLE_CAT, database)
                .with(TABLE_SCHEM, CatalogValue::Null)
                .with(TABLE_NAME, table)
                .with(COLUMN_NAME, field)
                .with(KEY_SEQ, i + 1)
                .with(PK_NAME, index.name.as_str())
        })
        .collect();
    finish(CatalogKind::PrimaryKeys, rows)
}

/// `getIndexInfo`: one row per directed field of each index.
///
/// With `unique_only`, indexes not marked unique are skipped.
pub fn index_info_rows(
    database: &str,
    table: &str,
    indexes: &[IndexInfo],
    unique_only: bool,
) -> Vec<CatalogRow> {
    let mut rows = Vec::new();
    for index in indexes {
        if unique_only && !index.is_unique() {
            continue;
        }
        for (i, (field, direction)) in index.directed_fields().enumerate() {
            rows.push(
                CatalogRow::new()
                    .with(TABLE_CAT, database)
                    .with(TABLE_SCHEM, CatalogValue::Null)
                    .with(TABLE_NAME, table)
                    .with(NON_UNIQUE, !index.is_unique())
                    .with(INDEX_QUALIFIER, CatalogValue::Null)
                    .with(INDEX_NAME, index.name.as_str())
                    .with(TYPE, TABLE_INDEX_OTHER)
                    .with(ORDINAL_POSITION, i + 1)
                    .with(COLUMN_NAME, field)
                    .with(ASC_OR_DESC, direction.code())
                    .with(CARDINALITY, CatalogValue::Null)
                    .with(PAGES, CatalogValue::Null)
                    .with(FILTER_CONDITION, CatalogValue::Null),
            );
        }
    }
    finish(CatalogKind::IndexInfo, rows)
}

/// `getTypeInfo`: one row per type table entry.
pub fn type_info_rows() -> Vec<CatalogRow> {
    let rows = TYPE_TABLE
        .iter()
        .map(|info| {
            let quote = match info.primitive {
                PrimitiveType::Bson(BsonType::String) | PrimitiveType::Bson(BsonType::Date) => {
                    CatalogValue::from("'")
                }
                _ => CatalogValue::Null,
            };
            CatalogRow::new()
                .with(TYPE_NAME, info.primitive.name())
                .with(DATA_TYPE, info.jdbc_type.code())
                .with(PRECISION, info.precision)
                .with(LITERAL_PREFIX, quote.clone())
                .with(LITERAL_SUFFIX, quote)
                .with(CREATE_PARAMS, CatalogValue::Null)
                .with(NULLABLE, Nullability::Nullable.code())
                .with(CASE_SENSITIVE, info.case_sensitive)
                .with(SEARCHABLE, info.searchability.code())
                .with(UNSIGNED_ATTRIBUTE, false)
                .with(FIXED_PREC_SCALE, false)
                .with(AUTO_INCREMENT, false)
                .with(LOCAL_TYPE_NAME, CatalogValue::Null)
                .with(MINIMUM_SCALE, info.min_scale)
                .with(MAXIMUM_SCALE, info.max_scale)
                .with(SQL_DATA_TYPE, 0)
                .with(SQL_DATETIME_SUB, 0)
                .with(NUM_PREC_RADIX, info.num_prec_radix)
        })
        .collect();
    finish(CatalogKind::TypeInfo, rows)
}

fn finish(kind: CatalogKind, mut rows: Vec<CatalogRow>) -> Vec<CatalogRow> {
    sort_rows(&mut rows, kind.sort_spec());
    debug!(?kind, rows = rows.len(), "built catalog rows");
    rows
}

const TABLES_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::required(TABLE_TYPE, BsonType::String),
    ScalarProperty::required(REMARKS, BsonType::String),
    ScalarProperty::optional(TYPE_CAT, BsonType::String),
    ScalarProperty::optional(TYPE_SCHEM, BsonType::String),
    ScalarProperty::optional(TYPE_NAME, BsonType::String),
    ScalarProperty::optional(SELF_REFERENCING_COL_NAME, BsonType::String),
    ScalarProperty::optional(REF_GENERATION, BsonType::String),
];

const PRIVILEGES_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::optional(GRANTOR, BsonType::String),
    ScalarProperty::required(GRANTEE, BsonType::String),
    ScalarProperty::required(PRIVILEGE, BsonType::String),
    ScalarProperty::optional(IS_GRANTABLE, BsonType::String),
];

const COLUMNS_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::required(COLUMN_NAME, BsonType::String),
    ScalarProperty::required(DATA_TYPE, BsonType::Int),
    ScalarProperty::required(TYPE_NAME, BsonType::String),
    ScalarProperty::optional(COLUMN_SIZE, BsonType::Int),
    ScalarProperty::optional(BUFFER_LENGTH, BsonType::Int),
    ScalarProperty::optional(DECIMAL_DIGITS, BsonType::Int),
    ScalarProperty::required(NUM_PREC_RADIX, BsonType::Int),
    ScalarProperty::required(NULLABLE, BsonType::Int),
    ScalarProperty::optional(REMARKS, BsonType::String),
    ScalarProperty::optional(COLUMN_DEF, BsonType::String),
    ScalarProperty::required(SQL_DATA_TYPE, BsonType::Int),
    ScalarProperty::required(SQL_DATETIME_SUB, BsonType::Int),
    ScalarProperty::optional(CHAR_OCTET_LENGTH, BsonType::Int),
    ScalarProperty::required(ORDINAL_POSITION, BsonType::Int),
    ScalarProperty::required(IS_NULLABLE, BsonType::String),
    ScalarProperty::optional(SCOPE_CATALOG, BsonType::String),
    ScalarProperty::optional(SCOPE_SCHEMA, BsonType::String),
    ScalarProperty::optional(SCOPE_TABLE, BsonType::String),
    ScalarProperty::optional(SOURCE_DATA_TYPE, BsonType::Int),
    ScalarProperty::required(IS_AUTOINCREMENT, BsonType::String),
    ScalarProperty::required(IS_GENERATEDCOLUMN, BsonType::String),
];

const COLUMN_PRIVILEGES_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::required(COLUMN_NAME, BsonType::String),
    ScalarProperty::optional(GRANTOR, BsonType::String),
    ScalarProperty::required(GRANTEE, BsonType::String),
    ScalarProperty::required(PRIVILEGE, BsonType::String),
    ScalarProperty::optional(IS_GRANTABLE, BsonType::String),
];

const PRIMARY_KEYS_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::required(COLUMN_NAME, BsonType::String),
    ScalarProperty::required(KEY_SEQ, BsonType::Int),
    ScalarProperty::optional(PK_NAME, BsonType::String),
];

const INDEX_INFO_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::optional(TABLE_CAT, BsonType::String),
    ScalarProperty::optional(TABLE_SCHEM, BsonType::String),
    ScalarProperty::required(TABLE_NAME, BsonType::String),
    ScalarProperty::required(NON_UNIQUE, BsonType::Bool),
    ScalarProperty::optional(INDEX_QUALIFIER, BsonType::String),
    ScalarProperty::optional(INDEX_NAME, BsonType::String),
    ScalarProperty::required(TYPE, BsonType::Int),
    ScalarProperty::required(ORDINAL_POSITION, BsonType::Int),
    ScalarProperty::optional(COLUMN_NAME, BsonType::String),
    ScalarProperty::optional(ASC_OR_DESC, BsonType::String),
    ScalarProperty::required(CARDINALITY, BsonType::Long),
    ScalarProperty::required(PAGES, BsonType::Long),
    ScalarProperty::optional(FILTER_CONDITION, BsonType::String),
];

const TYPE_INFO_COLUMNS: &[ScalarProperty] = &[
    ScalarProperty::required(TYPE_NAME, BsonType::String),
    ScalarProperty::required(DATA_TYPE, BsonType::Int),
    ScalarProperty::required(PRECISION, BsonType::Int),
    ScalarProperty::optional(LITERAL_PREFIX, BsonType::String),
    ScalarProperty::optional(LITERAL_SUFFIX, BsonType::String),
    ScalarProperty::optional(CREATE_PARAMS, BsonType::String),
    ScalarProperty::required(NULLABLE, BsonType::Int),
    ScalarProperty::required(CASE_SENSITIVE, BsonType::Bool),
    ScalarProperty::required(SEARCHABLE, BsonType::Int),
    ScalarProperty::required(UNSIGNED_ATTRIBUTE, BsonType::Bool),
    ScalarProperty::required(FIXED_PREC_SCALE, BsonType::Bool),
    ScalarProperty::required(AUTO_INCREMENT, BsonType::Bool),
    ScalarProperty::optional(LOCAL_TYPE_NAME, BsonType::String),
    ScalarProperty::required(MINIMUM_SCALE, BsonType::Int),
    ScalarProperty::required(MAXIMUM_SCALE, BsonType::Int),
    ScalarProperty::required(SQL_DATA_TYPE, BsonType::Int),
    ScalarProperty::required(SQL_DATETIME_SUB, BsonType::Int),
    ScalarProperty::required(NUM_PREC_RADIX, BsonType::Int),
];

const TABLE_TYPES_COLUMNS: &[ScalarProperty] = &[ScalarProperty::required(TABLE_TYPE, BsonType::String)];

const CATALOGS_COLUMNS: &[ScalarProperty] = &[ScalarProperty::required(TABLE_CAT, BsonType::String)];

/// Datasource name the catalog columns are nested under.
const CATALOG_DATASOURCE: &str = "";

impl CatalogKind {
    /// Result-set columns of this catalog, in result order.
    pub fn result_columns(self) -> &'static [ScalarProperty] {
        match self {
            CatalogKind::Tables => TABLES_COLUMNS,
            CatalogKind::TablePrivileges => PRIVILEGES_COLUMNS,
            CatalogKind::Columns => COLUMNS_COLUMNS,
            CatalogKind::ColumnPrivileges => COLUMN_PRIVILEGES_COLUMNS,
            CatalogKind::PrimaryKeys => PRIMARY_KEYS_COLUMNS,
            CatalogKind::IndexInfo => INDEX_INFO_COLUMNS,
            CatalogKind::TypeInfo => TYPE_INFO_COLUMNS,
            CatalogKind::TableTypes => TABLE_TYPES_COLUMNS,
            CatalogKind::Catalogs => CATALOGS_COLUMNS,
        }
    }

    /// Schema of this catalog's result set.
    pub fn result_schema(self) -> SchemaNode {
        let mut columns = ObjectSchema::new();
        columns.add_scalar_keys(self.result_columns());
        ObjectSchema::new()
            .with_property(CATALOG_DATASOURCE, columns)
            .with_required(CATALOG_DATASOURCE)
            .into()
    }

    /// Metadata of this catalog's result set, columns in result order.
    pub fn result_metadata(self) -> MetadataResult<ResultSetMetadata> {
        ResultSetMetadata::with_field_order(&self.result_schema(), FieldOrder::Declared)
    }
}
