//! Approximate-function substitution rule.
//!
//! Renames exact aggregations to their approximate counterparts anywhere in
//! the query: select list, HAVING and ORDER BY, at any nesting depth.
//! Operands are rewritten before the call that encloses them.

use common_error::TrellisResult;
use log::{debug, trace};
use trellis_logical::{Expression, QueryEnvelope};

use super::rule::{RewriteRule, Transformed};
use crate::registry::FunctionRegistry;

/// Rewrite every function call the approximate registry matches, in place.
/// Returns whether anything changed.
pub fn override_approximate_functions(query: &mut QueryEnvelope) -> bool {
    rewrite_with_registry(query, &FunctionRegistry::approximate())
}

fn rewrite_with_registry(query: &mut QueryEnvelope, registry: &FunctionRegistry) -> bool {
    let mut changed = false;
    for expr in query.expressions_mut() {
        changed |= rewrite_expression(expr, registry);
    }
    changed
}

/// Post-order rewrite of a single expression tree.
fn rewrite_expression(expr: &mut Expression, registry: &FunctionRegistry) -> bool {
    let Some(call) = expr.as_function_mut() else {
        return false;
    };

    let mut changed = false;
    for operand in &mut call.operands {
        changed |= rewrite_expression(operand, registry);
    }

    let Some(rewrite) = registry.lookup(&call.operator) else {
        return changed;
    };

    if call.operator != rewrite.target {
        debug!("Rewriting {} to {}", call.operator, rewrite.target);
        call.set_operator(rewrite.target);
        changed = true;
    }
    if let Some(value) = rewrite.appended_literal {
        trace!("Appending literal {} to {}", value, rewrite.target);
        call.operands.push(Expression::literal(value));
        changed = true;
    }
    changed
}

/// Approximate-function substitution rule.
#[derive(Debug, Clone)]
pub struct ApproximateFunctions {
    registry: FunctionRegistry,
}

impl ApproximateFunctions {
    /// Create the rule with a custom registry.
    pub fn new(registry: FunctionRegistry) -> Self {
        Self { registry }
    }
}

impl Default for ApproximateFunctions {
    fn default() -> Self {
        Self::new(FunctionRegistry::approximate())
    }
}

impl RewriteRule for ApproximateFunctions {
    fn name(&self) -> &'static str {
        "ApproximateFunctions"
    }

    fn description(&self) -> &'static str {
        "Substitute approximate implementations for exact aggregations"
    }

    fn apply(&self, mut query: QueryEnvelope) -> TrellisResult<Transformed> {
        let changed = rewrite_with_registry(&mut query, &self.registry);
        Ok(Transformed::new(query, changed))
    }
}
