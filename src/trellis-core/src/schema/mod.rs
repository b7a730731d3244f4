//! Table metadata consumed by the rewrite passes.
//!
//! This module provides:
//! - `TableSchema` / `FieldSpec` describing column cardinality
//! - `TableMetadata`, the per-table snapshot handed to the rewrite pipeline

mod field;
mod metadata;
mod table_schema;

pub use field::{Cardinality, FieldKind, FieldSpec};
pub use metadata::TableMetadata;
pub use table_schema::TableSchema;
