//! Combined distinct-count strategy rule.
//!
//! The segment-partitioned and multi-valued rewrites trigger on the same
//! `distinctcount(col)` shape, and whichever runs first hides the node from
//! the other. This rule evaluates both conditions per node and picks one
//! winner by an explicit precedence instead.

use std::sync::Arc;

use common_config::{DistinctCountPrecedence, RewriteConfig};
use common_error::TrellisResult;
use trellis_core::TableMetadata;
use trellis_logical::QueryEnvelope;

use super::distinct_count::rewrite_select_distinct_counts;
use super::rule::{RewriteRule, Transformed};
use crate::registry::names;

/// Combined distinct-count strategy rule.
#[derive(Debug, Clone)]
pub struct DistinctCountStrategy {
    metadata: Arc<TableMetadata>,
    segment_partitioned: bool,
    multi_valued: bool,
    precedence: DistinctCountPrecedence,
}

impl DistinctCountStrategy {
    /// Create the rule with both rewrites enabled and the default precedence.
    pub fn new(metadata: Arc<TableMetadata>) -> Self {
        Self {
            metadata,
            segment_partitioned: true,
            multi_valued: true,
            precedence: DistinctCountPrecedence::default(),
        }
    }

    /// Create the rule from the broker's rewrite configuration.
    pub fn from_config(config: &RewriteConfig, metadata: Arc<TableMetadata>) -> Self {
        Self {
            metadata,
            segment_partitioned: config.segment_partitioned_distinct_count,
            multi_valued: config.distinct_multi_valued,
            precedence: config.distinct_count_precedence,
        }
    }

    /// Set the precedence.
    #[must_use]
    pub const fn with_precedence(mut self, precedence: DistinctCountPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// The operator a `distinctcount` on `column` should become, if any.
    pub fn choose(&self, column: &str) -> Option<&'static str> {
        let partitioned = self.segment_partitioned && self.metadata.is_partition_column(column);
        let multi_valued = self.multi_valued && self.metadata.is_multi_valued(column);

        match (partitioned, multi_valued) {
            (true, true) => Some(match self.precedence {
                DistinctCountPrecedence::MultiValue => names::DISTINCT_COUNT_MV,
                DistinctCountPrecedence::SegmentPartitioned => {
                    names::SEGMENT_PARTITIONED_DISTINCT_COUNT
                }
            }),
            (true, false) => Some(names::SEGMENT_PARTITIONED_DISTINCT_COUNT),
            (false, true) => Some(names::DISTINCT_COUNT_MV),
            (false, false) => None,
        }
    }
}

impl RewriteRule for DistinctCountStrategy {
    fn name(&self) -> &'static str {
        "DistinctCountStrategy"
    }

    fn description(&self) -> &'static str {
        "Pick the segment-partitioned or multi-valued distinct count from table metadata"
    }

    fn apply(&self, mut query: QueryEnvelope) -> TrellisResult<Transformed> {
        let changed = rewrite_select_distinct_counts(&mut query, |column| self.choose(column));
        Ok(Transformed::new(query, changed))
    }
}
