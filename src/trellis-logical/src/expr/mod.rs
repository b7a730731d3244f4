//! Expression trees for parsed queries.

mod expr;
mod func;

pub use expr::{Expression, col, func, lit};
pub use func::{FunctionCall, builtin, canonical_name};
