//! Error types and result aliases for Trellis.
//!
//! Rewrite passes themselves are total; these errors only surface at the
//! boundaries where a query envelope, table schema, or configuration is
//! constructed from outside input.

mod error;

pub use error::{TrellisError, TrellisResult};
