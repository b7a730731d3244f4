//! Per-table metadata snapshot.

use std::collections::HashSet;

use super::TableSchema;

/// Read-only metadata for the table a query targets.
///
/// Supplied by the catalog for the duration of one rewrite; the rewrite
/// passes never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMetadata {
    /// Table name.
    pub table_name: String,
    /// Columns the table's segments are partitioned by.
    pub partition_columns: HashSet<String>,
    /// Table schema, if known.
    pub schema: Option<TableSchema>,
}

impl TableMetadata {
    /// Create metadata with no partition columns and no schema.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_columns: HashSet::new(),
            schema: None,
        }
    }

    /// Set the partition columns.
    #[must_use]
    pub fn with_partition_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Check whether a column is a partition column.
    pub fn is_partition_column(&self, column: &str) -> bool {
        self.partition_columns.contains(column)
    }

    /// Check whether a column is declared multi-valued.
    pub fn is_multi_valued(&self, column: &str) -> bool {
        self.schema
            .as_ref()
            .is_some_and(|schema| schema.is_multi_valued(column))
    }
}
