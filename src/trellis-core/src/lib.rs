//! Core data model for Trellis.
//!
//! This crate provides the types shared by every layer of the rewrite stage:
//! - `Value` and `DataType` for literals and schema fields
//! - `TableSchema`, `FieldSpec` and `Cardinality` for column metadata
//! - `TableMetadata`, the per-table snapshot consumed by the rewrite passes

pub mod schema;
pub mod types;

#[cfg(test)]
mod proptest_utils;

// Re-export commonly used types
pub use schema::{Cardinality, FieldKind, FieldSpec, TableMetadata, TableSchema};
pub use types::{DataType, Value};
