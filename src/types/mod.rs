//! Primitive document types and their relational mapping.
//!
//! The document store describes every value with a BSON type name
//! (`"int"`, `"string"`, `"objectId"`, ...). A relational client only
//! understands type codes, precision, scale and friends. This module owns
//! both sides of that mapping:
//!
//! - [`BsonType`]: the closed set of primitive types a schema can name.
//! - [`PrimitiveType`]: a resolved column type, which is either one concrete
//!   [`BsonType`] or the catch-all generic type used for polymorphic columns.
//! - [`JdbcType`]: the relational type codes exposed to clients.
//! - [`TypeTable`]: the static table from primitive type to [`TypeInfo`].
//!
//! # Example
//!
//! ```
//! use bsonrel::types::{BsonType, JdbcType, PrimitiveType, TYPE_TABLE};
//!
//! let info = TYPE_TABLE.get(PrimitiveType::Bson(BsonType::Long));
//! assert_eq!(info.jdbc_type, JdbcType::BigInt);
//! assert_eq!(info.precision, Some(19));
//! ```

mod table;

pub use table::{TypeInfo, TypeTable, TYPE_TABLE};

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Name reported for the generic type of polymorphic and `Any` columns.
pub const GENERIC_TYPE_NAME: &str = "bson";

/// A primitive BSON type as named by a schema's `bsonType` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BsonType {
    Double,
    String,
    Object,
    Array,
    BinData,
    Undefined,
    ObjectId,
    Bool,
    Date,
    Null,
    Regex,
    DbPointer,
    Javascript,
    Symbol,
    JavascriptWithScope,
    Int,
    Timestamp,
    Long,
    Decimal,
    MinKey,
    MaxKey,
}

impl BsonType {
    /// Every primitive type, in the order of the type table.
    pub const ALL: [BsonType; 21] = [
        BsonType::Double,
        BsonType::String,
        BsonType::Object,
        BsonType::Array,
        BsonType::BinData,
        BsonType::Undefined,
        BsonType::ObjectId,
        BsonType::Bool,
        BsonType::Date,
        BsonType::Null,
        BsonType::Regex,
        BsonType::DbPointer,
        BsonType::Javascript,
        BsonType::Symbol,
        BsonType::JavascriptWithScope,
        BsonType::Int,
        BsonType::Timestamp,
        BsonType::Long,
        BsonType::Decimal,
        BsonType::MinKey,
        BsonType::MaxKey,
    ];

    /// The schema name of this type (the `bsonType` keyword value).
    pub fn name(self) -> &'static str {
        match self {
            BsonType::Double => "double",
            BsonType::String => "string",
            BsonType::Object => "object",
            BsonType::Array => "array",
            BsonType::BinData => "binData",
            BsonType::Undefined => "undefined",
            BsonType::ObjectId => "objectId",
            BsonType::Bool => "bool",
            BsonType::Date => "date",
            BsonType::Null => "null",
            BsonType::Regex => "regex",
            BsonType::DbPointer => "dbPointer",
            BsonType::Javascript => "javascript",
            BsonType::Symbol => "symbol",
            BsonType::JavascriptWithScope => "javascriptWithScope",
            BsonType::Int => "int",
            BsonType::Timestamp => "timestamp",
            BsonType::Long => "long",
            BsonType::Decimal => "decimal",
            BsonType::MinKey => "minKey",
            BsonType::MaxKey => "maxKey",
        }
    }

    /// Look up a type by its exact schema name.
    ///
    /// Names are case-sensitive, matching the store's `$type` output.
    pub fn from_name(name: &str) -> Option<Self> {
        BsonType::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Position of this type in [`BsonType::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BsonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BsonType::from_name(s).ok_or_else(|| s.to_string())
    }
}

/// The type of a resolved column.
///
/// `Generic` is the dynamic type used for `Any` schemas and for unions that
/// admit more than one non-null type. It has no BSON type of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bson(BsonType),
    Generic,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bson(t) => t.name(),
            PrimitiveType::Generic => GENERIC_TYPE_NAME,
        }
    }

    /// The concrete BSON type, or `None` for the generic type.
    pub fn bson_type(self) -> Option<BsonType> {
        match self {
            PrimitiveType::Bson(t) => Some(t),
            PrimitiveType::Generic => None,
        }
    }

    pub fn is_generic(self) -> bool {
        matches!(self, PrimitiveType::Generic)
    }
}

impl From<BsonType> for PrimitiveType {
    fn from(t: BsonType) -> Self {
        PrimitiveType::Bson(t)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PrimitiveType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Relational type codes (the `java.sql.Types` numbering used by
/// relational client APIs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JdbcType {
    Bit,
    Integer,
    BigInt,
    Double,
    Decimal,
    Boolean,
    LongVarchar,
    Binary,
    Timestamp,
    Null,
    Other,
}

impl JdbcType {
    /// Numeric code reported in `DATA_TYPE` columns.
    pub fn code(self) -> i32 {
        match self {
            JdbcType::Bit => -7,
            JdbcType::Integer => 4,
            JdbcType::BigInt => -5,
            JdbcType::Double => 8,
            JdbcType::Decimal => 3,
            JdbcType::Boolean => 16,
            JdbcType::LongVarchar => -1,
            JdbcType::Binary => -2,
            JdbcType::Timestamp => 93,
            JdbcType::Null => 0,
            JdbcType::Other => 1111,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JdbcType::Bit => "BIT",
            JdbcType::Integer => "INTEGER",
            JdbcType::BigInt => "BIGINT",
            JdbcType::Double => "DOUBLE",
            JdbcType::Decimal => "DECIMAL",
            JdbcType::Boolean => "BOOLEAN",
            JdbcType::LongVarchar => "LONGVARCHAR",
            JdbcType::Binary => "BINARY",
            JdbcType::Timestamp => "TIMESTAMP",
            JdbcType::Null => "NULL",
            JdbcType::Other => "OTHER",
        }
    }

    /// Whether values of this type carry a sign.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            JdbcType::Integer | JdbcType::BigInt | JdbcType::Double | JdbcType::Decimal
        )
    }
}

impl fmt::Display for JdbcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for JdbcType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Nullability classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nullability {
    NoNulls,
    Nullable,
    Unknown,
}

impl Nullability {
    /// Numeric code reported in `NULLABLE` columns.
    pub fn code(self) -> i32 {
        match self {
            Nullability::NoNulls => 0,
            Nullability::Nullable => 1,
            Nullability::Unknown => 2,
        }
    }

    /// Text reported in `IS_NULLABLE` columns.
    pub fn is_nullable_text(self) -> &'static str {
        match self {
            Nullability::NoNulls => "NO",
            Nullability::Nullable => "YES",
            Nullability::Unknown => "",
        }
    }
}

/// Which predicates a column type supports in `WHERE` clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Searchability {
    /// No predicate can be pushed down.
    None,
    /// Comparison predicates only; `LIKE` is not supported.
    Restricted,
    /// Every predicate, including `LIKE`.
    Full,
}

impl Searchability {
    /// Numeric code reported in `SEARCHABLE` columns.
    pub fn code(self) -> i32 {
        match self {
            Searchability::None => 0,
            Searchability::Restricted => 2,
            Searchability::Full => 3,
        }
    }

    pub fn is_searchable(self) -> bool {
        !matches!(self, Searchability::None)
    }
}
