//! The pipeline driver that applies rewrite rules to a query.
//!
//! Rules run in order. The driver repeats the sequence until no rule reports
//! a change or a maximum number of iterations is reached.

use std::sync::Arc;

use common_config::RewriteConfig;
use common_error::TrellisResult;
use log::debug;
use trellis_core::TableMetadata;
use trellis_logical::QueryEnvelope;

use super::rule::{OptimizedQuery, RewriteRule, RuleTrace};
use super::{ApproximateFunctions, DistinctCountStrategy, LimitClamp};

/// Configuration for the optimizer.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Maximum number of iterations before stopping.
    pub max_iterations: usize,
    /// Whether to enable detailed tracing.
    pub enable_trace: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 16,
            enable_trace: false,
        }
    }
}

impl OptimizerConfig {
    /// Create a new config with the given max iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Enable or disable tracing.
    #[must_use]
    pub fn with_trace(mut self, enable: bool) -> Self {
        self.enable_trace = enable;
        self
    }
}

/// Ordered pipeline of rewrite rules.
///
/// # Ordering
///
/// The default pipeline built by [`Optimizer::for_table`] is:
///
/// 1. Limit clamp
/// 2. Distinct-count strategy (segment-partitioned or multi-valued)
/// 3. Approximate functions, when enabled
///
/// The approximate pass must come last: it consumes `distinctcount` and
/// `distinctcountmv`, so running it first would hide those calls from the
/// distinct-count strategy.
pub struct Optimizer {
    /// The rules to apply (in order).
    rules: Vec<Box<dyn RewriteRule>>,
    /// Configuration.
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create a new optimizer with the given rules.
    pub fn new(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self {
            rules,
            config: OptimizerConfig::default(),
        }
    }

    /// Create a new optimizer with custom config.
    pub fn with_config(rules: Vec<Box<dyn RewriteRule>>, config: OptimizerConfig) -> Self {
        Self { rules, config }
    }

    /// Build the default pipeline for one table.
    pub fn for_table(config: &RewriteConfig, metadata: &TableMetadata) -> Self {
        let mut optimizer = Self::new(vec![Box::new(
            LimitClamp::new(config.query_limit_ceiling)
                .with_default_limit(config.effective_default_limit()),
        )]);

        if config.segment_partitioned_distinct_count || config.distinct_multi_valued {
            optimizer.add_rule(DistinctCountStrategy::from_config(
                config,
                Arc::new(metadata.clone()),
            ));
        }
        if config.use_approximate_function {
            optimizer.add_rule(ApproximateFunctions::default());
        }
        optimizer
    }

    /// Add a rule to the optimizer.
    pub fn add_rule<R: RewriteRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Names of the rules in pipeline order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Rewrite a query.
    ///
    /// Applies rules in fixed-point iteration until no changes occur.
    pub fn optimize(&self, query: QueryEnvelope) -> TrellisResult<OptimizedQuery> {
        query.validate()?;

        let mut current = query;
        let mut iterations = 0;
        let mut total_rules_applied = 0;
        let mut trace = Vec::new();

        loop {
            if iterations >= self.config.max_iterations {
                debug!(
                    "Optimizer reached max iterations ({}), stopping",
                    self.config.max_iterations
                );
                break;
            }

            iterations += 1;
            let mut changed_this_iteration = false;

            for rule in &self.rules {
                let (next, changed) = self.apply_rule(rule.as_ref(), current, &mut trace)?;
                current = next;

                if changed {
                    changed_this_iteration = true;
                    total_rules_applied += 1;
                    debug!("Rule '{}' applied in iteration {}", rule.name(), iterations);
                }
            }

            if !changed_this_iteration {
                debug!("No changes in iteration {}, reached fixpoint", iterations);
                break;
            }
        }

        Ok(OptimizedQuery {
            query: current,
            iterations,
            rules_applied: total_rules_applied,
            trace,
        })
    }

    /// Rewrite with a single pass (no fixpoint iteration).
    pub fn optimize_once(&self, query: QueryEnvelope) -> TrellisResult<OptimizedQuery> {
        query.validate()?;

        let mut current = query;
        let mut rules_applied = 0;
        let mut trace = Vec::new();

        for rule in &self.rules {
            let (next, changed) = self.apply_rule(rule.as_ref(), current, &mut trace)?;
            current = next;
            if changed {
                rules_applied += 1;
            }
        }

        Ok(OptimizedQuery {
            query: current,
            iterations: 1,
            rules_applied,
            trace,
        })
    }

    fn apply_rule(
        &self,
        rule: &dyn RewriteRule,
        query: QueryEnvelope,
        trace: &mut Vec<RuleTrace>,
    ) -> TrellisResult<(QueryEnvelope, bool)> {
        let before = self.config.enable_trace.then(|| query.explain());

        let result = rule.apply(query)?;

        if let (true, Some(before)) = (result.changed, before) {
            trace.push(RuleTrace::new(
                rule.name(),
                before,
                result.query.explain(),
                true,
            ));
        }

        Ok((result.query, result.changed))
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::for_table(&RewriteConfig::default(), &TableMetadata::default())
    }
}
