//! Rewrite rule trait and framework.
//!
//! This module defines the core abstraction for rewrite rules and the
//! bookkeeping types the optimizer reports back.

use common_error::TrellisResult;
use trellis_logical::QueryEnvelope;

/// A single rewrite pass over a query envelope.
///
/// A rule must be total: any shape it does not recognize is left untouched.
/// Applying a rule to its own output must be a no-op.
pub trait RewriteRule: Send + Sync {
    /// Get the name of this rule.
    fn name(&self) -> &'static str;

    /// Get a description of what this rule does.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Apply this rule to the query, returning a potentially transformed query.
    ///
    /// Returns `Ok(query)` where `query` may be unchanged if the rule doesn't apply.
    fn apply(&self, query: QueryEnvelope) -> TrellisResult<Transformed>;
}

/// The result of applying a rewrite rule.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// The (potentially transformed) query.
    pub query: QueryEnvelope,
    /// Whether the query was actually changed.
    pub changed: bool,
}

impl Transformed {
    /// Create a new transformed result indicating the query was changed.
    pub fn yes(query: QueryEnvelope) -> Self {
        Self {
            query,
            changed: true,
        }
    }

    /// Create a new transformed result indicating the query was unchanged.
    pub fn no(query: QueryEnvelope) -> Self {
        Self {
            query,
            changed: false,
        }
    }

    /// Create a result from a query and a change flag.
    pub fn new(query: QueryEnvelope, changed: bool) -> Self {
        Self { query, changed }
    }
}

impl From<QueryEnvelope> for Transformed {
    fn from(query: QueryEnvelope) -> Self {
        Self::no(query)
    }
}

/// A trace entry for a single rule application.
#[derive(Debug, Clone)]
pub struct RuleTrace {
    /// The name of the rule that was applied.
    pub rule_name: String,
    /// The query before the rule was applied (as explain string).
    pub before: String,
    /// The query after the rule was applied (as explain string).
    pub after: String,
    /// Whether the rule actually changed the query.
    pub changed: bool,
}

impl RuleTrace {
    /// Create a new trace entry.
    pub fn new(
        rule_name: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
        changed: bool,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            before: before.into(),
            after: after.into(),
            changed,
        }
    }
}

/// The result of optimization with optional trace information.
#[derive(Debug, Clone)]
pub struct OptimizedQuery {
    /// The final rewritten query.
    pub query: QueryEnvelope,
    /// Number of optimization iterations performed.
    pub iterations: usize,
    /// Number of rules that were applied (changed the query).
    pub rules_applied: usize,
    /// Detailed trace of rule applications (if tracing was enabled).
    pub trace: Vec<RuleTrace>,
}

impl OptimizedQuery {
    /// Create a new optimized query result.
    pub fn new(query: QueryEnvelope) -> Self {
        Self {
            query,
            iterations: 0,
            rules_applied: 0,
            trace: Vec::new(),
        }
    }

    /// Format the trace as a human-readable string.
    pub fn format_trace(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Rewrite completed in {} iterations, {} rules applied\n",
            self.iterations, self.rules_applied
        ));

        if self.trace.is_empty() {
            output.push_str("  (no trace available)\n");
        } else {
            for (i, entry) in self.trace.iter().filter(|t| t.changed).enumerate() {
                output.push_str(&format!(
                    "\n--- Rule {} applied: {} ---\n",
                    i + 1,
                    entry.rule_name
                ));
                output.push_str("Before:\n");
                output.push_str(&entry.before);
                output.push_str("\nAfter:\n");
                output.push_str(&entry.after);
            }
        }

        output
    }
}
