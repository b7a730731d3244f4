//! Configuration management for Trellis.
//!
//! Provides the broker-level policy the rewrite pipeline runs under. Values
//! are supplied by the surrounding broker; nothing here reads files or the
//! environment.

use common_error::{TrellisError, TrellisResult};
use serde::{Deserialize, Serialize};

/// Limit applied to queries that do not specify one.
pub const DEFAULT_QUERY_LIMIT: u64 = 10;

/// Default ceiling for an explicit query limit.
pub const DEFAULT_QUERY_LIMIT_CEILING: u64 = 1_000_000;

/// Global Trellis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrellisConfig {
    /// Query rewrite configuration.
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl TrellisConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> TrellisResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.rewrite.validate()?;
        Ok(config)
    }
}

/// Which rewrite wins when a `distinctcount` column is both a partition
/// column and multi-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistinctCountPrecedence {
    /// Prefer `distinctcountmv`; a multi-valued column needs it for correctness.
    #[default]
    MultiValue,
    /// Prefer `segmentpartitioneddistinctcount`.
    SegmentPartitioned,
}

/// Query rewrite configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Upper bound for any query limit.
    pub query_limit_ceiling: u64,
    /// Limit used when the query does not specify one.
    pub default_limit: u64,
    /// Substitute approximate aggregation functions for exact ones.
    pub use_approximate_function: bool,
    /// Rewrite `distinctcount` on partition columns to the per-segment form.
    pub segment_partitioned_distinct_count: bool,
    /// Rewrite `distinctcount` on multi-valued columns to `distinctcountmv`.
    pub distinct_multi_valued: bool,
    /// Tie-break when both distinct-count rewrites apply to one node.
    pub distinct_count_precedence: DistinctCountPrecedence,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            query_limit_ceiling: DEFAULT_QUERY_LIMIT_CEILING,
            default_limit: DEFAULT_QUERY_LIMIT,
            use_approximate_function: false,
            segment_partitioned_distinct_count: true,
            distinct_multi_valued: true,
            distinct_count_precedence: DistinctCountPrecedence::default(),
        }
    }
}

impl RewriteConfig {
    /// Set the limit ceiling.
    #[must_use]
    pub const fn with_query_limit_ceiling(mut self, ceiling: u64) -> Self {
        self.query_limit_ceiling = ceiling;
        self
    }

    /// Set the default limit.
    #[must_use]
    pub const fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Enable or disable approximate function substitution.
    #[must_use]
    pub const fn with_approximate_function(mut self, enable: bool) -> Self {
        self.use_approximate_function = enable;
        self
    }

    /// Enable or disable the segment-partitioned distinct-count rewrite.
    #[must_use]
    pub const fn with_segment_partitioned_distinct_count(mut self, enable: bool) -> Self {
        self.segment_partitioned_distinct_count = enable;
        self
    }

    /// Enable or disable the multi-valued distinct-count rewrite.
    #[must_use]
    pub const fn with_distinct_multi_valued(mut self, enable: bool) -> Self {
        self.distinct_multi_valued = enable;
        self
    }

    /// Set the distinct-count precedence.
    #[must_use]
    pub const fn with_distinct_count_precedence(
        mut self,
        precedence: DistinctCountPrecedence,
    ) -> Self {
        self.distinct_count_precedence = precedence;
        self
    }

    /// The limit a query without an explicit limit ends up with.
    pub fn effective_default_limit(&self) -> u64 {
        self.default_limit.min(self.query_limit_ceiling)
    }

    /// Check the configuration for contradictions.
    pub fn validate(&self) -> TrellisResult<()> {
        if self.default_limit == 0 {
            return Err(TrellisError::config("default_limit must be positive"));
        }
        Ok(())
    }
}
