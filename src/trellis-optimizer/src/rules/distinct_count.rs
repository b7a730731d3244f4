//! Shared matching for the distinct-count rewrites.

use log::debug;
use trellis_logical::{FunctionCall, QueryEnvelope};

use crate::registry::names;

/// The target column of an exact single-column `distinctcount` call.
///
/// `None` for any other operator, for multiple operands, and for an operand
/// that is not a bare identifier.
pub(super) fn distinct_count_column(call: &FunctionCall) -> Option<&str> {
    if call.is(names::DISTINCT_COUNT) {
        call.sole_identifier()
    } else {
        None
    }
}

/// Rename top-level `distinctcount(column)` calls in the select list to the
/// operator `choose` returns for the column. Returns whether anything changed.
pub(super) fn rewrite_select_distinct_counts<F>(query: &mut QueryEnvelope, choose: F) -> bool
where
    F: Fn(&str) -> Option<&'static str>,
{
    let mut changed = false;
    for expr in &mut query.select_list {
        let Some(call) = expr.as_function_mut() else {
            continue;
        };
        let Some(target) = distinct_count_column(call).and_then(&choose) else {
            continue;
        };

        debug!("Rewriting {} to {}", call, target);
        call.set_operator(target);
        changed = true;
    }
    changed
}
