//! Deterministic ordering of catalog rows.
//!
//! Every catalog kind has a fixed list of typed sort keys. Rows compare key
//! by key: strings by codepoint, integers numerically, booleans with `false`
//! first. A missing or null key, or one holding a value of another kind,
//! sorts before every present value. Sorting is stable, so rows equal on
//! every key keep their input order.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::fields::*;

/// A cell of a catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogValue {
    Null,
    Str(String),
    Int(i64),
    Bool(bool),
}

impl CatalogValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CatalogValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CatalogValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CatalogValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn key(&self, kind: ValueKind) -> Option<KeyValue<'_>> {
        match kind {
            ValueKind::String => self.as_str().map(KeyValue::Str),
            ValueKind::Int => self.as_int().map(KeyValue::Int),
            ValueKind::Bool => self.as_bool().map(KeyValue::Bool),
        }
    }
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Null => f.write_str("NULL"),
            CatalogValue::Str(s) => f.write_str(s),
            CatalogValue::Int(i) => write!(f, "{i}"),
            CatalogValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CatalogValue {
    fn from(s: &str) -> Self {
        CatalogValue::Str(s.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(s: String) -> Self {
        CatalogValue::Str(s)
    }
}

impl From<i64> for CatalogValue {
    fn from(i: i64) -> Self {
        CatalogValue::Int(i)
    }
}

impl From<i32> for CatalogValue {
    fn from(i: i32) -> Self {
        CatalogValue::Int(i64::from(i))
    }
}

impl From<u32> for CatalogValue {
    fn from(i: u32) -> Self {
        CatalogValue::Int(i64::from(i))
    }
}

impl From<usize> for CatalogValue {
    fn from(i: usize) -> Self {
        CatalogValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<bool> for CatalogValue {
    fn from(b: bool) -> Self {
        CatalogValue::Bool(b)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CatalogValue::Null, Into::into)
    }
}

/// One row of a synthetic catalog, fields in result-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    fields: Vec<(&'static str, CatalogValue)>,
}

impl CatalogRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn with(mut self, field: &'static str, value: impl Into<CatalogValue>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    pub fn get(&self, field: &str) -> Option<&CatalogValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| v)
    }

    /// The string in `field`, if it holds one.
    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(CatalogValue::as_str)
    }

    /// The integer in `field`, if it holds one.
    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(CatalogValue::as_int)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &CatalogValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for CatalogRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The kind of value a sort key compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Bool,
}

/// One typed sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub kind: ValueKind,
}

impl SortKey {
    pub const fn string(field: &'static str) -> Self {
        Self {
            field,
            kind: ValueKind::String,
        }
    }

    pub const fn int(field: &'static str) -> Self {
        Self {
            field,
            kind: ValueKind::Int,
        }
    }

    pub const fn bool(field: &'static str) -> Self {
        Self {
            field,
            kind: ValueKind::Bool,
        }
    }
}

// Variants of one key always share a kind, so the derived order never
// compares across variants.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum KeyValue<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
}

/// The synthetic catalogs this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Tables,
    TablePrivileges,
    Columns,
    ColumnPrivileges,
    PrimaryKeys,
    IndexInfo,
    TypeInfo,
    TableTypes,
    Catalogs,
}

const TABLES_SORT: &[SortKey] = &[
    SortKey::string(TABLE_TYPE),
    SortKey::string(TABLE_CAT),
    SortKey::string(TABLE_NAME),
];
const TABLE_PRIVILEGES_SORT: &[SortKey] =
    &[SortKey::string(TABLE_CAT), SortKey::string(TABLE_NAME)];
const COLUMNS_SORT: &[SortKey] = &[
    SortKey::string(TABLE_CAT),
    SortKey::string(TABLE_NAME),
    SortKey::int(ORDINAL_POSITION),
];
const COLUMN_PRIVILEGES_SORT: &[SortKey] = &[SortKey::string(COLUMN_NAME)];
const PRIMARY_KEYS_SORT: &[SortKey] = &[SortKey::string(COLUMN_NAME)];
const INDEX_INFO_SORT: &[SortKey] = &[
    SortKey::bool(NON_UNIQUE),
    SortKey::string(INDEX_NAME),
    SortKey::int(ORDINAL_POSITION),
];
const TYPE_INFO_SORT: &[SortKey] = &[SortKey::int(DATA_TYPE), SortKey::string(TYPE_NAME)];
const TABLE_TYPES_SORT: &[SortKey] = &[SortKey::string(TABLE_TYPE)];
const CATALOGS_SORT: &[SortKey] = &[SortKey::string(TABLE_CAT)];

impl CatalogKind {
    /// The fixed sort keys of this catalog.
    pub fn sort_spec(self) -> &'static [SortKey] {
        match self {
            CatalogKind::Tables => TABLES_SORT,
            CatalogKind::TablePrivileges => TABLE_PRIVILEGES_SORT,
            CatalogKind::Columns => COLUMNS_SORT,
            CatalogKind::ColumnPrivileges => COLUMN_PRIVILEGES_SORT,
            CatalogKind::PrimaryKeys => PRIMARY_KEYS_SORT,
            CatalogKind::IndexInfo => INDEX_INFO_SORT,
            CatalogKind::TypeInfo => TYPE_INFO_SORT,
            CatalogKind::TableTypes => TABLE_TYPES_SORT,
            CatalogKind::Catalogs => CATALOGS_SORT,
        }
    }
}

/// Compare two rows key by key.
pub fn compare_rows(a: &CatalogRow, b: &CatalogRow, spec: &[SortKey]) -> Ordering {
    for key in spec {
        let left = a.get(key.field).and_then(|v| v.key(key.kind));
        let right = b.get(key.field).and_then(|v| v.key(key.kind));
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Stable sort of `rows` by `spec`.
pub fn sort_rows(rows: &mut [CatalogRow], spec: &[SortKey]) {
    rows.sort_by(|a, b| compare_rows(a, b, spec));
}
