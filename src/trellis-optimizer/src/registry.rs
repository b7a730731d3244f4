//! Function name registry.
//!
//! Maps canonical function names to the approximate rewrite they receive.
//! Lookup runs an ordered list of matchers: exact-name tables first, then
//! structured-suffix matchers such as `percentile<N>[mv]`.

use log::trace;
use trellis_logical::canonical_name;

/// Canonical names of the functions the rewrite passes read or write.
pub mod names {
    /// Exact distinct count.
    pub const DISTINCT_COUNT: &str = "distinctcount";
    /// Exact distinct count over a multi-valued column.
    pub const DISTINCT_COUNT_MV: &str = "distinctcountmv";
    /// Per-segment distinct count summed across segments.
    pub const SEGMENT_PARTITIONED_DISTINCT_COUNT: &str = "segmentpartitioneddistinctcount";
    /// Smart HyperLogLog distinct count.
    pub const DISTINCT_COUNT_SMART_HLL: &str = "distinctcountsmarthll";
    /// HyperLogLog distinct count.
    pub const DISTINCT_COUNT_HLL: &str = "distinctcounthll";
    /// Bitmap distinct count.
    pub const DISTINCT_COUNT_BITMAP: &str = "distinctcountbitmap";
    /// SELECT DISTINCT.
    pub const DISTINCT: &str = "distinct";
    /// Exact percentile with the percentile as an operand.
    pub const PERCENTILE: &str = "percentile";
    /// Exact percentile over a multi-valued column.
    pub const PERCENTILE_MV: &str = "percentilemv";
    /// Smart T-Digest percentile.
    pub const PERCENTILE_SMART_TDIGEST: &str = "percentilesmarttdigest";
    /// T-Digest percentile.
    pub const PERCENTILE_TDIGEST: &str = "percentiletdigest";
    /// Quantile-digest percentile estimate.
    pub const PERCENTILE_EST: &str = "percentileest";
}

/// Suffix marking the multi-valued variant of a function.
const MV_SUFFIX: &str = "mv";

/// Exact-name table for the approximate pass: `(matched, result)`.
const APPROXIMATE_EXACT: &[(&str, &str)] = &[
    (names::DISTINCT_COUNT, names::DISTINCT_COUNT_SMART_HLL),
    (names::DISTINCT_COUNT_MV, names::DISTINCT_COUNT_SMART_HLL),
    (names::DISTINCT, names::DISTINCT),
    (names::DISTINCT_COUNT_HLL, names::DISTINCT_COUNT_HLL),
    (names::DISTINCT_COUNT_BITMAP, names::DISTINCT_COUNT_BITMAP),
    (names::PERCENTILE, names::PERCENTILE_SMART_TDIGEST),
    (names::PERCENTILE_MV, names::PERCENTILE_SMART_TDIGEST),
    (names::PERCENTILE_TDIGEST, names::PERCENTILE_TDIGEST),
    (names::PERCENTILE_EST, names::PERCENTILE_EST),
];

/// The rewrite a matched function receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximateRewrite {
    /// Canonical name the call is renamed to.
    pub target: &'static str,
    /// Integer literal appended as a new trailing operand, if any.
    pub appended_literal: Option<i64>,
}

impl ApproximateRewrite {
    /// Rename only.
    pub const fn rename(target: &'static str) -> Self {
        Self {
            target,
            appended_literal: None,
        }
    }

    /// Rename and append a literal operand.
    pub const fn rename_with_literal(target: &'static str, literal: i64) -> Self {
        Self {
            target,
            appended_literal: Some(literal),
        }
    }
}

/// One entry in the registry's ordered matcher list.
#[derive(Debug, Clone, Copy)]
pub enum NameMatcher {
    /// Exact lookup in a `(matched, result)` table.
    Exact(&'static [(&'static str, &'static str)]),
    /// `<prefix><digits>[mv]`, rewritten to `target` with the digits appended
    /// as a literal operand.
    NumericSuffix {
        prefix: &'static str,
        target: &'static str,
    },
}

impl NameMatcher {
    /// Try to match a canonical name.
    pub fn matches(&self, canonical: &str) -> Option<ApproximateRewrite> {
        match *self {
            Self::Exact(table) => table
                .iter()
                .find(|(matched, _)| *matched == canonical)
                .map(|&(_, target)| ApproximateRewrite::rename(target)),
            Self::NumericSuffix { prefix, target } => parse_numeric_suffix(canonical, prefix)
                .map(|value| ApproximateRewrite::rename_with_literal(target, value)),
        }
    }
}

/// Ordered set of name matchers.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    matchers: Vec<NameMatcher>,
}

impl FunctionRegistry {
    /// Create a registry from matchers, consulted in order.
    pub fn new(matchers: Vec<NameMatcher>) -> Self {
        Self { matchers }
    }

    /// The registry used by the approximate-function pass.
    pub fn approximate() -> Self {
        Self::new(vec![
            NameMatcher::Exact(APPROXIMATE_EXACT),
            NameMatcher::NumericSuffix {
                prefix: names::PERCENTILE,
                target: names::PERCENTILE_SMART_TDIGEST,
            },
        ])
    }

    /// Append a matcher; it is consulted after the existing ones.
    #[must_use]
    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Look up a function name (any case, with or without underscores).
    pub fn lookup(&self, name: &str) -> Option<ApproximateRewrite> {
        let canonical = canonical_name(name);
        let found = self
            .matchers
            .iter()
            .find_map(|matcher| matcher.matches(&canonical));
        trace!("Registry lookup '{}' -> {:?}", name, found);
        found
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::approximate()
    }
}

/// Parse the numeric suffix of a `percentile<N>[mv]` name.
///
/// Returns `None` unless the name, minus one optional trailing `mv`, is
/// `percentile` followed by at least one ASCII digit and nothing else.
pub fn parse_percentile_suffix(name: &str) -> Option<i64> {
    parse_numeric_suffix(&canonical_name(name), names::PERCENTILE)
}

fn parse_numeric_suffix(canonical: &str, prefix: &str) -> Option<i64> {
    let base = canonical.strip_suffix(MV_SUFFIX).unwrap_or(canonical);
    let digits = base.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Values that overflow are treated as unrecognized names.
    digits.parse().ok()
}
