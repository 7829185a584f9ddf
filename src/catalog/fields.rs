//! Column names of the synthetic catalog result sets.

pub const TABLE_CAT: &str = "TABLE_CAT";
pub const TABLE_SCHEM: &str = "TABLE_SCHEM";
pub const TABLE_NAME: &str = "TABLE_NAME";
pub const TABLE_TYPE: &str = "TABLE_TYPE";
pub const REMARKS: &str = "REMARKS";
pub const TYPE_CAT: &str = "TYPE_CAT";
pub const TYPE_SCHEM: &str = "TYPE_SCHEM";
pub const TYPE_NAME: &str = "TYPE_NAME";
pub const SELF_REFERENCING_COL_NAME: &str = "SELF_REFERENCING_COL_NAME";
pub const REF_GENERATION: &str = "REF_GENERATION";

pub const GRANTOR: &str = "GRANTOR";
pub const GRANTEE: &str = "GRANTEE";
pub const PRIVILEGE: &str = "PRIVILEGE";
pub const IS_GRANTABLE: &str = "IS_GRANTABLE";

pub const COLUMN_NAME: &str = "COLUMN_NAME";
pub const DATA_TYPE: &str = "DATA_TYPE";
pub const COLUMN_SIZE: &str = "COLUMN_SIZE";
pub const BUFFER_LENGTH: &str = "BUFFER_LENGTH";
pub const DECIMAL_DIGITS: &str = "DECIMAL_DIGITS";
pub const NUM_PREC_RADIX: &str = "NUM_PREC_RADIX";
pub const NULLABLE: &str = "NULLABLE";
pub const COLUMN_DEF: &str = "COLUMN_DEF";
pub const SQL_DATA_TYPE: &str = "SQL_DATA_TYPE";
pub const SQL_DATETIME_SUB: &str = "SQL_DATETIME_SUB";
pub const CHAR_OCTET_LENGTH: &str = "CHAR_OCTET_LENGTH";
pub const ORDINAL_POSITION: &str = "ORDINAL_POSITION";
pub const IS_NULLABLE: &str = "IS_NULLABLE";
pub const SCOPE_CATALOG: &str = "SCOPE_CATALOG";
pub const SCOPE_SCHEMA: &str = "SCOPE_SCHEMA";
pub const SCOPE_TABLE: &str = "SCOPE_TABLE";
pub const SOURCE_DATA_TYPE: &str = "SOURCE_DATA_TYPE";
pub const IS_AUTOINCREMENT: &str = "IS_AUTOINCREMENT";
pub const IS_GENERATEDCOLUMN: &str = "IS_GENERATEDCOLUMN";

pub const KEY_SEQ: &str = "KEY_SEQ";
pub const PK_NAME: &str = "PK_NAME";

pub const NON_UNIQUE: &str = "NON_UNIQUE";
pub const INDEX_QUALIFIER: &str = "INDEX_QUALIFIER";
pub const INDEX_NAME: &str = "INDEX_NAME";
pub const TYPE: &str = "TYPE";
pub const ASC_OR_DESC: &str = "ASC_OR_DESC";
pub const CARDINALITY: &str = "CARDINALITY";
pub const PAGES: &str = "PAGES";
pub const FILTER_CONDITION: &str = "FILTER_CONDITION";

pub const PRECISION: &str = "PRECISION";
pub const LITERAL_PREFIX: &str = "LITERAL_PREFIX";
pub const LITERAL_SUFFIX: &str = "LITERAL_SUFFIX";
pub const CREATE_PARAMS: &str = "CREATE_PARAMS";
pub const CASE_SENSITIVE: &str = "CASE_SENSITIVE";
pub const SEARCHABLE: &str = "SEARCHABLE";
pub const UNSIGNED_ATTRIBUTE: &str = "UNSIGNED_ATTRIBUTE";
pub const FIXED_PREC_SCALE: &str = "FIXED_PREC_SCALE";
pub const AUTO_INCREMENT: &str = "AUTO_INCREMENT";
pub const LOCAL_TYPE_NAME: &str = "LOCAL_TYPE_NAME";
pub const MINIMUM_SCALE: &str = "MINIMUM_SCALE";
pub const MAXIMUM_SCALE: &str = "MAXIMUM_SCALE";
