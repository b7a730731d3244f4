//! Trellis - broker-side query rewrite stage for an OLAP store
//!
//! Trellis rewrites a parsed query against the metadata of its target table
//! before the query is scattered to servers.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export core crates
pub use common_config as config;
pub use common_display as display;
pub use common_error as error;
pub use trellis_core as core;
pub use trellis_logical as logical;
pub use trellis_optimizer as optimizer;

pub use trellis_optimizer::rewrite;

/// Trellis version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
