//! Limit clamp rule.
//!
//! Give every query a definite limit no larger than the configured ceiling.

use common_config::DEFAULT_QUERY_LIMIT;
use common_error::TrellisResult;
use log::debug;
use trellis_logical::QueryEnvelope;

use super::rule::{RewriteRule, Transformed};

/// Compute the limit a query ends up with.
///
/// - no limit: `default_limit`, capped at `ceiling`
/// - limit above `ceiling`: `ceiling`
/// - otherwise: the limit unchanged
pub fn clamp_limit(limit: Option<u64>, ceiling: u64, default_limit: u64) -> u64 {
    limit.unwrap_or(default_limit).min(ceiling)
}

/// Clamp the query's limit in place using [`DEFAULT_QUERY_LIMIT`] for queries
/// without one. Returns whether the limit changed.
pub fn override_query_limit(query: &mut QueryEnvelope, ceiling: u64) -> bool {
    clamp_query_limit(query, ceiling, DEFAULT_QUERY_LIMIT)
}

fn clamp_query_limit(query: &mut QueryEnvelope, ceiling: u64, default_limit: u64) -> bool {
    let clamped = clamp_limit(query.limit, ceiling, default_limit);
    if query.limit == Some(clamped) {
        return false;
    }

    debug!("Clamping limit {:?} to {} (ceiling {})", query.limit, clamped, ceiling);
    query.limit = Some(clamped);
    true
}

/// Limit clamp rule.
///
/// Only the `limit` field is touched. An explicit limit is never raised.
#[derive(Debug, Clone, Copy)]
pub struct LimitClamp {
    ceiling: u64,
    default_limit: u64,
}

impl LimitClamp {
    /// Create a rule clamping to `ceiling`.
    pub const fn new(ceiling: u64) -> Self {
        Self {
            ceiling,
            default_limit: DEFAULT_QUERY_LIMIT,
        }
    }

    /// Set the limit given to queries without one.
    #[must_use]
    pub const fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }
}

impl RewriteRule for LimitClamp {
    fn name(&self) -> &'static str {
        "LimitClamp"
    }

    fn description(&self) -> &'static str {
        "Clamp the query limit to the broker ceiling"
    }

    fn apply(&self, mut query: QueryEnvelope) -> TrellisResult<Transformed> {
        let changed = clamp_query_limit(&mut query, self.ceiling, self.default_limit);
        Ok(Transformed::new(query, changed))
    }
}
