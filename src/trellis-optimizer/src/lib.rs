//! Query rewrite stage for Trellis.
//!
//! Rewrites a parsed query against the metadata of the table it targets
//! before the query is scattered to servers: clamps the limit, picks the
//! distinct-count implementation the table layout allows, and optionally
//! trades exact aggregations for approximate ones.

pub mod registry;
mod rules;

pub use registry::{ApproximateRewrite, FunctionRegistry, NameMatcher, parse_percentile_suffix};
pub use rules::{
    ApproximateFunctions, DistinctCountStrategy, LimitClamp, MultiValueDistinctCount,
    OptimizedQuery, Optimizer, OptimizerConfig, RewriteRule, RuleTrace,
    SegmentPartitionedDistinctCount, Transformed, clamp_limit, override_approximate_functions,
    override_distinct_multi_valued, override_query_limit,
    override_segment_partitioned_distinct_count,
};

use common_config::RewriteConfig;
use common_error::TrellisResult;
use trellis_core::TableMetadata;
use trellis_logical::QueryEnvelope;

/// Rewrite a query using the default pipeline for its table.
pub fn rewrite(
    query: QueryEnvelope,
    config: &RewriteConfig,
    metadata: &TableMetadata,
) -> TrellisResult<QueryEnvelope> {
    let optimizer = Optimizer::for_table(config, metadata);
    Ok(optimizer.optimize(query)?.query)
}
