//! The primitive-to-relational type table.
//!
//! [`TYPE_TABLE`] is a plain `static`: every entry is a constant expression,
//! so the table exists before any code runs and is never written to.

use serde::Serialize;

use super::{BsonType, JdbcType, PrimitiveType, Searchability};

/// Relational attributes of one primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub primitive: PrimitiveType,
    pub jdbc_type: JdbcType,
    /// Column size: maximum precision for numerics, display length for
    /// dates and fixed-length identifiers. `None` when unbounded or unknown.
    pub precision: Option<u32>,
    pub min_scale: u32,
    pub max_scale: u32,
    /// Fractional digits for numeric and date types.
    pub decimal_digits: Option<u32>,
    /// 10 for decimal types, 2 for binary numeric types, 0 otherwise.
    pub num_prec_radix: u32,
    pub case_sensitive: bool,
    pub searchability: Searchability,
    /// Length in bytes for fixed-length types.
    pub fixed_bytes_length: Option<u32>,
}

impl TypeInfo {
    /// Maximum length in bytes of character and binary types.
    pub fn char_octet_length(&self) -> Option<u32> {
        match self.primitive {
            PrimitiveType::Bson(BsonType::String) | PrimitiveType::Bson(BsonType::BinData) => {
                self.precision
            }
            _ => None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.jdbc_type.is_signed()
    }

    /// Display width in characters, 0 when unknown.
    pub fn display_size(&self) -> u32 {
        self.precision.unwrap_or(0)
    }

    /// Opaque types are exposed with the generic code and cannot be
    /// converted to any other relational type.
    pub fn is_opaque(&self) -> bool {
        self.jdbc_type == JdbcType::Other
    }
}

/// Immutable lookup table from primitive type to [`TypeInfo`].
#[derive(Debug)]
pub struct TypeTable {
    entries: &'static [TypeInfo],
}

impl TypeTable {
    /// Entry for a primitive type.
    pub fn get(&self, ty: PrimitiveType) -> &TypeInfo {
        match ty {
            PrimitiveType::Bson(t) => &self.entries[t.index()],
            PrimitiveType::Generic => &self.entries[BsonType::ALL.len()],
        }
    }

    /// Entry for a type name, including the generic `"bson"` name.
    pub fn get_by_name(&self, name: &str) -> Option<&TypeInfo> {
        self.entries.iter().find(|e| e.primitive.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn opaque(t: BsonType, case_sensitive: bool) -> TypeInfo {
    TypeInfo {
        primitive: PrimitiveType::Bson(t),
        jdbc_type: JdbcType::Other,
        precision: None,
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive,
        searchability: Searchability::Restricted,
        fixed_bytes_length: None,
    }
}

// Entries are laid out in `BsonType::ALL` order, followed by the generic type.
static ENTRIES: [TypeInfo; 22] = [
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Double),
        jdbc_type: JdbcType::Double,
        precision: Some(15),
        min_scale: 15,
        max_scale: 15,
        decimal_digits: Some(15),
        num_prec_radix: 2,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(8),
    },
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::String),
        jdbc_type: JdbcType::LongVarchar,
        precision: None,
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: true,
        searchability: Searchability::Full,
        fixed_bytes_length: None,
    },
    opaque(BsonType::Object, false),
    opaque(BsonType::Array, false),
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::BinData),
        jdbc_type: JdbcType::Binary,
        precision: None,
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: false,
        searchability: Searchability::None,
        fixed_bytes_length: None,
    },
    opaque(BsonType::Undefined, false),
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::ObjectId),
        jdbc_type: JdbcType::LongVarchar,
        precision: Some(24),
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: true,
        searchability: Searchability::Full,
        fixed_bytes_length: None,
    },
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Bool),
        jdbc_type: JdbcType::Boolean,
        precision: Some(1),
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(1),
    },
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Date),
        jdbc_type: JdbcType::Timestamp,
        precision: Some(24),
        min_scale: 0,
        max_scale: 3,
        decimal_digits: Some(3),
        num_prec_radix: 0,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(8),
    },
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Null),
        jdbc_type: JdbcType::Null,
        precision: None,
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: None,
    },
    opaque(BsonType::Regex, true),
    opaque(BsonType::DbPointer, false),
    opaque(BsonType::Javascript, true),
    opaque(BsonType::Symbol, true),
    opaque(BsonType::JavascriptWithScope, true),
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Int),
        jdbc_type: JdbcType::Integer,
        precision: Some(10),
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 2,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(4),
    },
    opaque(BsonType::Timestamp, false),
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Long),
        jdbc_type: JdbcType::BigInt,
        precision: Some(19),
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 2,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(8),
    },
    TypeInfo {
        primitive: PrimitiveType::Bson(BsonType::Decimal),
        jdbc_type: JdbcType::Decimal,
        precision: Some(34),
        min_scale: 34,
        max_scale: 34,
        decimal_digits: Some(34),
        num_prec_radix: 10,
        case_sensitive: false,
        searchability: Searchability::Full,
        fixed_bytes_length: Some(16),
    },
    opaque(BsonType::MinKey, false),
    opaque(BsonType::MaxKey, false),
    TypeInfo {
        primitive: PrimitiveType::Generic,
        jdbc_type: JdbcType::Other,
        precision: None,
        min_scale: 0,
        max_scale: 0,
        decimal_digits: None,
        num_prec_radix: 0,
        case_sensitive: false,
        searchability: Searchability::Restricted,
        fixed_bytes_length: None,
    },
];

/// The process-wide type table.
pub static TYPE_TABLE: TypeTable = TypeTable { entries: &ENTRIES };
