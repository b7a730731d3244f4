//! Expression tree.

use common_display::TreeNode;
use serde::{Deserialize, Serialize};
use trellis_core::Value;

use super::{FunctionCall, builtin};

/// Expression in a parsed query.
///
/// Children are owned, so a tree is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal scalar.
    Literal(Value),
    /// Column reference, case preserved as written.
    Identifier(String),
    /// Function call.
    Function(FunctionCall),
}

impl Expression {
    /// Create a column reference expression.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a function call expression.
    pub fn function(operator: impl Into<String>, operands: Vec<Expression>) -> Self {
        Self::Function(FunctionCall::new(operator, operands))
    }

    /// Get the function call, if this is one.
    pub fn as_function(&self) -> Option<&FunctionCall> {
        match self {
            Self::Function(call) => Some(call),
            _ => None,
        }
    }

    /// Get the function call mutably, if this is one.
    pub fn as_function_mut(&mut self) -> Option<&mut FunctionCall> {
        match self {
            Self::Function(call) => Some(call),
            _ => None,
        }
    }

    /// Get the column name, if this is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Get the literal value, if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Direct children of this node.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Function(call) => call.operands.iter().collect(),
            Self::Literal(_) | Self::Identifier(_) => Vec::new(),
        }
    }

    /// Visit every node in pre-order.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Expression),
    {
        visit(self);
        if let Self::Function(call) = self {
            for operand in &call.operands {
                operand.walk(visit);
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expression::depth)
            .max()
            .unwrap_or(0)
    }

    /// Check whether any function call in the tree has the given canonical name.
    pub fn contains_function(&self, canonical: &str) -> bool {
        let mut found = false;
        self.walk(&mut |expr| {
            if let Self::Function(call) = expr {
                found = found || call.is(canonical);
            }
        });
        found
    }

    // Comparison builders

    /// Equality comparison.
    pub fn eq(self, other: Expression) -> Self {
        Self::function(builtin::EQUALS, vec![self, other])
    }

    /// Inequality comparison.
    pub fn neq(self, other: Expression) -> Self {
        Self::function(builtin::NOT_EQUALS, vec![self, other])
    }

    /// Greater than comparison.
    pub fn gt(self, other: Expression) -> Self {
        Self::function(builtin::GREATER_THAN, vec![self, other])
    }

    /// Greater than or equal comparison.
    pub fn gte(self, other: Expression) -> Self {
        Self::function(builtin::GREATER_THAN_OR_EQUAL, vec![self, other])
    }

    /// Less than comparison.
    pub fn lt(self, other: Expression) -> Self {
        Self::function(builtin::LESS_THAN, vec![self, other])
    }

    /// Less than or equal comparison.
    pub fn lte(self, other: Expression) -> Self {
        Self::function(builtin::LESS_THAN_OR_EQUAL, vec![self, other])
    }

    // Logical operators

    /// Logical AND.
    pub fn and(self, other: Expression) -> Self {
        Self::function(builtin::AND, vec![self, other])
    }

    /// Logical OR.
    pub fn or(self, other: Expression) -> Self {
        Self::function(builtin::OR, vec![self, other])
    }

    /// Logical NOT.
    pub fn not(self) -> Self {
        Self::function(builtin::NOT, vec![self])
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Function(call) => write!(f, "{call}"),
        }
    }
}

impl TreeNode for Expression {
    fn label(&self) -> String {
        match self {
            Self::Literal(value) => format!("Literal({value})"),
            Self::Identifier(name) => format!("Identifier({name})"),
            Self::Function(call) => format!("Function({})", call.operator),
        }
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        Expression::children(self)
            .into_iter()
            .map(|child| child as &dyn TreeNode)
            .collect()
    }
}

/// Create a column reference.
pub fn col(name: impl Into<String>) -> Expression {
    Expression::identifier(name)
}

/// Create a literal.
pub fn lit(value: impl Into<Value>) -> Expression {
    Expression::literal(value)
}

/// Create a function call.
pub fn func(operator: impl Into<String>, operands: Vec<Expression>) -> Expression {
    Expression::function(operator, operands)
}
