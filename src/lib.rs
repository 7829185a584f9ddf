//! # bsonrel
//!
//! Relational metadata for document-store schemas.
//!
//! A document store describes each collection with a JSON schema whose
//! fields can be scalars, "any", or unions of types. A relational client
//! needs flat, typed, deterministically ordered columns. This crate is the
//! pure, synchronous transform between the two.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          JSON schema (from the store's introspection)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema::parse]
//! ┌─────────────────────────────────────────────────────────┐
//! │     SchemaNode: Any | Scalar | Union | Object            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema::resolve + types::TYPE_TABLE]
//! ┌─────────────────────────────────────────────────────────┐
//! │     (PrimitiveType, polymorphic) + Nullability           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ResultSetMetadata: ordered ColumnDescriptors +       │
//! │     label index                                          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [catalog]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Sorted catalog rows (tables, columns, indexes, ...)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here talks to a store: listings and schemas are inputs.

pub mod catalog;
pub mod config;
pub mod metadata;
pub mod render;
pub mod schema;
pub mod types;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{CatalogKind, CatalogRow, CatalogValue, ListingFilter};
    pub use crate::metadata::{ColumnDescriptor, FieldOrder, ResultSetMetadata, SelectItem};
    pub use crate::schema::{parse_schema, parse_schema_str, ObjectSchema, SchemaNode};
    pub use crate::types::{BsonType, JdbcType, Nullability, PrimitiveType, TYPE_TABLE};
}
