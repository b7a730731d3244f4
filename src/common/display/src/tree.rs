//! Tree display utilities for expression trees.

use std::fmt;

/// A node in a display tree.
pub trait TreeNode {
    /// Get the display label of this node.
    fn label(&self) -> String;

    /// Get child nodes.
    fn children(&self) -> Vec<&dyn TreeNode>;
}

/// Helper for displaying tree structures.
pub struct DisplayTree<'a> {
    root: &'a dyn TreeNode,
}

impl<'a> DisplayTree<'a> {
    /// Create a new display tree.
    pub fn new(root: &'a dyn TreeNode) -> Self {
        Self { root }
    }

    fn fmt_node(
        f: &mut fmt::Formatter<'_>,
        node: &dyn TreeNode,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let connector = if is_last { "└─ " } else { "├─ " };

        writeln!(f, "{prefix}{connector}{}", node.label())?;

        let children = node.children();
        let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });

        for (i, child) in children.iter().enumerate() {
            let is_last_child = i == children.len() - 1;
            Self::fmt_node(f, *child, &child_prefix, is_last_child)?;
        }

        Ok(())
    }
}

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root.label())?;

        let children = self.root.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            Self::fmt_node(f, *child, "", is_last)?;
        }

        Ok(())
    }
}
