//! Query representation for the Trellis rewrite stage.
//!
//! `trellis-logical` holds the data the rewrite passes transform: the
//! expression tree a parsed SQL statement compiles to, and the query envelope
//! that anchors the select list, HAVING, ORDER BY and LIMIT clauses.
//!
//! # Overview
//!
//! - **Expression tree**: literals, identifiers and function calls whose
//!   operands are themselves expressions
//! - **Query envelope**: the top-level clauses rewrite passes start from
//! - **Canonical names**: function names compare lower-cased with underscores
//!   removed, so `DISTINCT_COUNT` and `distinctcount` name the same function
//!
//! # Example
//!
//! ```rust
//! use trellis_logical::{OrderByItem, QueryEnvelope};
//! use trellis_logical::expr::{col, func, lit};
//!
//! // SELECT DISTINCT_COUNT(col1) FROM t HAVING DISTINCT_COUNT(col1) > 10
//! // ORDER BY DISTINCT_COUNT(col1) DESC LIMIT 100
//! let query = QueryEnvelope::new(vec![func("DISTINCT_COUNT", vec![col("col1")])])
//!     .unwrap()
//!     .with_having(func("DISTINCT_COUNT", vec![col("col1")]).gt(lit(10i64)))
//!     .with_order_by(OrderByItem::desc(func("DISTINCT_COUNT", vec![col("col1")])))
//!     .with_limit(100);
//!
//! println!("{}", query.explain());
//! ```

pub mod expr;
pub mod query;

// Re-export commonly used types
pub use expr::{Expression, FunctionCall, canonical_name, col, func, lit};
pub use query::{OrderByItem, QueryEnvelope, SortDirection};
