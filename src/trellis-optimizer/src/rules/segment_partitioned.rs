//! Segment-partitioned distinct-count rule.
//!
//! When the distinct-count column is one the table's segments are
//! partitioned by, every segment holds a disjoint set of its values, so
//! per-segment counts can be summed without a global merge.

use std::collections::HashSet;

use common_error::TrellisResult;
use trellis_logical::QueryEnvelope;

use super::distinct_count::rewrite_select_distinct_counts;
use super::rule::{RewriteRule, Transformed};
use crate::registry::names;

/// Rewrite `distinctcount(col)` in the select list to
/// `segmentpartitioneddistinctcount(col)` when `col` is a partition column.
/// Returns whether anything changed.
pub fn override_segment_partitioned_distinct_count(
    query: &mut QueryEnvelope,
    partition_columns: &HashSet<String>,
) -> bool {
    rewrite_select_distinct_counts(query, |column| {
        partition_columns
            .contains(column)
            .then_some(names::SEGMENT_PARTITIONED_DISTINCT_COUNT)
    })
}

/// Segment-partitioned distinct-count rule.
///
/// # Legal When
///
/// - The call is exactly `distinctcount` with one bare identifier operand
/// - The identifier is a partition column of the target table
#[derive(Debug, Clone, Default)]
pub struct SegmentPartitionedDistinctCount {
    partition_columns: HashSet<String>,
}

impl SegmentPartitionedDistinctCount {
    /// Create the rule for a table's partition columns.
    pub fn new<I, S>(partition_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            partition_columns: partition_columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl RewriteRule for SegmentPartitionedDistinctCount {
    fn name(&self) -> &'static str {
        "SegmentPartitionedDistinctCount"
    }

    fn description(&self) -> &'static str {
        "Count distinct values per segment when the column is a partition column"
    }

    fn apply(&self, mut query: QueryEnvelope) -> TrellisResult<Transformed> {
        let changed =
            override_segment_partitioned_distinct_count(&mut query, &self.partition_columns);
        Ok(Transformed::new(query, changed))
    }
}
