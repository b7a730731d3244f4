//! Multi-valued distinct-count rule.

use common_error::TrellisResult;
use trellis_core::TableSchema;
use trellis_logical::QueryEnvelope;

use super::distinct_count::rewrite_select_distinct_counts;
use super::rule::{RewriteRule, Transformed};
use crate::registry::names;

/// Rewrite `distinctcount(col)` in the select list to `distinctcountmv(col)`
/// when the schema declares `col` multi-valued. Columns absent from the schema
/// are single-valued. Returns whether anything changed.
pub fn override_distinct_multi_valued(query: &mut QueryEnvelope, schema: &TableSchema) -> bool {
    rewrite_select_distinct_counts(query, |column| {
        schema
            .is_multi_valued(column)
            .then_some(names::DISTINCT_COUNT_MV)
    })
}

/// Multi-valued distinct-count rule.
#[derive(Debug, Clone)]
pub struct MultiValueDistinctCount {
    schema: TableSchema,
}

impl MultiValueDistinctCount {
    /// Create the rule for a table schema.
    pub fn new(schema: TableSchema) -> Self {
        Self { schema }
    }
}

impl RewriteRule for MultiValueDistinctCount {
    fn name(&self) -> &'static str {
        "MultiValueDistinctCount"
    }

    fn description(&self) -> &'static str {
        "Use the multi-valued distinct count for multi-valued columns"
    }

    fn apply(&self, mut query: QueryEnvelope) -> TrellisResult<Transformed> {
        let changed = override_distinct_multi_valued(&mut query, &self.schema);
        Ok(Transformed::new(query, changed))
    }
}
