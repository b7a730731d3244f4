//! Query envelope: the clauses rewrite passes operate on.

use common_display::{DisplayTree, indent};
use common_error::{TrellisResult, ensure};
use serde::{Deserialize, Serialize};

use super::OrderByItem;
use crate::expr::Expression;

/// Top-level clauses of a parsed query.
///
/// The envelope owns its expressions exclusively; rewrite passes replace
/// nodes structurally and never alias them across envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    /// Select list, never empty.
    pub select_list: Vec<Expression>,
    /// HAVING expression.
    pub having: Option<Expression>,
    /// ORDER BY items in precedence order.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT, if the query specified one (or a pass set it).
    pub limit: Option<u64>,
}

impl QueryEnvelope {
    /// Create an envelope from a select list.
    ///
    /// Returns `InvalidQuery` if the select list is empty.
    pub fn new(select_list: Vec<Expression>) -> TrellisResult<Self> {
        let query = Self {
            select_list,
            having: None,
            order_by: Vec::new(),
            limit: None,
        };
        query.validate()?;
        Ok(query)
    }

    /// Set the HAVING expression.
    #[must_use]
    pub fn with_having(mut self, having: Expression) -> Self {
        self.having = Some(having);
        self
    }

    /// Append an ORDER BY item.
    #[must_use]
    pub fn with_order_by(mut self, item: OrderByItem) -> Self {
        self.order_by.push(item);
        self
    }

    /// Set the LIMIT.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the structural contract the rewrite passes rely on.
    pub fn validate(&self) -> TrellisResult<()> {
        ensure!(
            !self.select_list.is_empty(),
            "query envelope has an empty select list"
        );
        Ok(())
    }

    /// Every root expression: select list, then HAVING, then ORDER BY.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.select_list
            .iter()
            .chain(self.having.iter())
            .chain(self.order_by.iter().map(|item| &item.expr))
    }

    /// Every root expression, mutably, in the same order as [`Self::expressions`].
    pub fn expressions_mut(&mut self) -> impl Iterator<Item = &mut Expression> {
        self.select_list
            .iter_mut()
            .chain(self.having.iter_mut())
            .chain(self.order_by.iter_mut().map(|item| &mut item.expr))
    }

    /// Render the envelope as an indented tree.
    pub fn explain(&self) -> String {
        let mut output = String::new();

        output.push_str("Select\n");
        for expr in &self.select_list {
            output.push_str(&indent(&DisplayTree::new(expr).to_string(), "  "));
            output.push('\n');
        }

        if let Some(having) = &self.having {
            output.push_str("Having\n");
            output.push_str(&indent(&DisplayTree::new(having).to_string(), "  "));
            output.push('\n');
        }

        if !self.order_by.is_empty() {
            output.push_str("OrderBy\n");
            for item in &self.order_by {
                output.push_str(&format!("  {}\n", item.direction));
                output.push_str(&indent(&DisplayTree::new(&item.expr).to_string(), "    "));
                output.push('\n');
            }
        }

        match self.limit {
            Some(limit) => output.push_str(&format!("Limit {limit}\n")),
            None => output.push_str("Limit (unset)\n"),
        }

        output
    }
}

impl std::fmt::Display for QueryEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SELECT ")?;
        for (i, expr) in self.select_list.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{expr}")?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY ")?;
            for (i, item) in self.order_by.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}
