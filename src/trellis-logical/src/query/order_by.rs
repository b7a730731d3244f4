//! ORDER BY items.

use serde::{Deserialize, Serialize};

use crate::expr::Expression;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "ASC"),
            Self::Descending => write!(f, "DESC"),
        }
    }
}

/// One ORDER BY item. Rewrites may replace `expr` but never `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    /// Expression to sort by.
    pub expr: Expression,
    /// Sort direction.
    pub direction: SortDirection,
}

impl OrderByItem {
    /// Create an ascending item.
    pub const fn asc(expr: Expression) -> Self {
        Self {
            expr,
            direction: SortDirection::Ascending,
        }
    }

    /// Create a descending item.
    pub const fn desc(expr: Expression) -> Self {
        Self {
            expr,
            direction: SortDirection::Descending,
        }
    }
}

impl std::fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.expr, self.direction)
    }
}
