//! Synthetic relational catalogs.
//!
//! The document store has databases and collections; a relational client
//! expects `getTables`, `getColumns`, `getIndexInfo` and friends. This module
//! builds those result sets from raw listings:
//!
//! ```text
//! DatabaseListing ──► catalog_rows / table_rows / table_privilege_rows
//! TableSchema     ──► column_rows / column_privilege_rows   (via ResultSetMetadata)
//! IndexInfo       ──► primary_key_rows / index_info_rows
//! TYPE_TABLE      ──► type_info_rows
//!                            │
//!                            ▼
//!                  sort_rows(kind.sort_spec())  ──► ordered Vec<CatalogRow>
//! ```
//!
//! Every builder returns its rows already ordered by the catalog's fixed
//! sort keys.

mod error;
pub mod fields;
mod listing;
mod pattern;
mod rows;
mod sort;

pub use error::{CatalogError, CatalogResult};
pub use listing::{CollectionInfo, DatabaseListing, IndexInfo, KeyDirection, TableSchema};
pub use pattern::{
    like_to_regex, Exclusions, NamePattern, DEFAULT_EXCLUDED_COLLECTIONS,
    DEFAULT_EXCLUDED_DATABASES,
};
pub use rows::{
    catalog_rows, column_privilege_rows, column_rows, index_info_rows, primary_key_rows, table_privilege_rows,
    table_rows, table_type_rows, type_info_rows, ListingFilter,
};
pub use sort::{compare_rows, sort_rows, CatalogKind, CatalogRow, CatalogValue, SortKey, ValueKind};
