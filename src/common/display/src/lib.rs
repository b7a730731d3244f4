//! Display and visualization utilities for Trellis.
//!
//! Provides tree formatting for expressions and query envelopes.

mod tree;

pub use tree::{DisplayTree, TreeNode};

/// Indent a multi-line string.
pub fn indent(s: &str, prefix: &str) -> String {
    s.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
