//! Function-call expressions.

use serde::{Deserialize, Serialize};

use super::Expression;

/// Canonical form of a function name: lower-cased with underscores removed.
///
/// `DISTINCT_COUNT`, `distinctCount` and `distinct_count` all canonicalize to
/// `distinctcount`.
pub fn canonical_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Function call with an operator name and ordered operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Operator name as stored. Rewrites always store the canonical form.
    pub operator: String,
    /// Operands in call order.
    pub operands: Vec<Expression>,
}

impl FunctionCall {
    /// Create a new function call. The name is stored as given.
    pub fn new(operator: impl Into<String>, operands: Vec<Expression>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Canonical form of the operator name.
    pub fn canonical_operator(&self) -> String {
        canonical_name(&self.operator)
    }

    /// Check whether the canonical operator equals `name` exactly.
    pub fn is(&self, name: &str) -> bool {
        self.canonical_operator() == name
    }

    /// The column name when the call has exactly one operand and it is an
    /// identifier.
    pub fn sole_identifier(&self) -> Option<&str> {
        match self.operands.as_slice() {
            [Expression::Identifier(name)] => Some(name),
            _ => None,
        }
    }

    /// Replace the operator name.
    pub fn set_operator(&mut self, operator: impl Into<String>) {
        self.operator = operator.into();
    }
}

impl std::fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.operator)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

/// Operator names used for comparison and boolean nodes.
pub mod builtin {
    /// `=`
    pub const EQUALS: &str = "equals";
    /// `<>`
    pub const NOT_EQUALS: &str = "not_equals";
    /// `>`
    pub const GREATER_THAN: &str = "greater_than";
    /// `>=`
    pub const GREATER_THAN_OR_EQUAL: &str = "greater_than_or_equal";
    /// `<`
    pub const LESS_THAN: &str = "less_than";
    /// `<=`
    pub const LESS_THAN_OR_EQUAL: &str = "less_than_or_equal";
    /// Logical AND.
    pub const AND: &str = "and";
    /// Logical OR.
    pub const OR: &str = "or";
    /// Logical NOT.
    pub const NOT: &str = "not";
}
