//! Rewrite rules for Trellis query envelopes.
//!
//! Each rule is a total, idempotent transformation: shapes it does not
//! recognize pass through unchanged.
//!
//! # Rules
//!
//! - **Limit Clamp**: give every query a limit no larger than the ceiling
//! - **Segment-Partitioned Distinct Count**: sum per-segment counts for
//!   partition columns
//! - **Multi-Valued Distinct Count**: use the multi-valued aggregation for
//!   multi-valued columns
//! - **Distinct-Count Strategy**: the previous two evaluated together with an
//!   explicit precedence
//! - **Approximate Functions**: substitute approximate aggregations anywhere
//!   in the query
//!
//! Every rule also exposes an in-place `override_*` helper for callers that
//! hold a `&mut QueryEnvelope` and do not need the pipeline.

mod approximate;
mod distinct_count;
mod distinct_count_strategy;
mod limit_clamp;
mod multi_value;
mod optimizer;
mod rule;
mod segment_partitioned;

pub use approximate::{ApproximateFunctions, override_approximate_functions};
pub use distinct_count_strategy::DistinctCountStrategy;
pub use limit_clamp::{LimitClamp, clamp_limit, override_query_limit};
pub use multi_value::{MultiValueDistinctCount, override_distinct_multi_valued};
pub use optimizer::{Optimizer, OptimizerConfig};
pub use rule::{OptimizedQuery, RewriteRule, RuleTrace, Transformed};
pub use segment_partitioned::{
    SegmentPartitionedDistinctCount, override_segment_partitioned_distinct_count,
};
