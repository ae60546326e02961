//! crates/planner/src/plan.rs
//!
//! The planner's output: ranges to fetch plus truncation bookkeeping.

use ranges::ByteRange;

/// The byte ranges a caller must fetch, in ascending, disjoint,
/// non-adjacent form, plus what the planner observed while producing them.
///
/// An empty range list means the local copy is considered up to date — but
/// only if [`is_truncated`](Self::is_truncated) is also false. A content scan
/// against a stream that ended before its announced size produces ranges for
/// the observed bytes only; the shortfall is a transfer fault the caller must
/// not treat as success.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchPlan {
    ranges: Vec<ByteRange>,
    expected: u64,
    observed: Option<u64>,
}

impl FetchPlan {
    /// Plan produced without consuming the remote stream.
    pub(crate) const fn unscanned(ranges: Vec<ByteRange>, expected: u64) -> Self {
        Self {
            ranges,
            expected,
            observed: None,
        }
    }

    /// Plan produced by a content scan that observed `observed` stream bytes.
    pub(crate) const fn scanned(ranges: Vec<ByteRange>, expected: u64, observed: u64) -> Self {
        Self {
            ranges,
            expected,
            observed: Some(observed),
        }
    }

    /// Ranges to fetch, ascending and disjoint.
    #[inline]
    #[must_use]
    pub fn ranges(&self) -> &[ByteRange] {
        &self.ranges
    }

    /// Consumes the plan, returning the ranges.
    #[must_use]
    pub fn into_ranges(self) -> Vec<ByteRange> {
        self.ranges
    }

    /// Reports whether there is nothing to fetch.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of bytes the ranges cover.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        self.ranges.iter().map(ByteRange::len).sum()
    }

    /// The remote size the plan was computed against.
    #[inline]
    #[must_use]
    pub const fn expected_bytes(&self) -> u64 {
        self.expected
    }

    /// Stream bytes actually observed during planning.
    ///
    /// `None` when the chosen policy never consumed the stream (size
    /// heuristic, short-circuits, full-fetch decisions) — in that case the
    /// stream's health is simply unknown to the planner.
    #[inline]
    #[must_use]
    pub const fn observed_bytes(&self) -> Option<u64> {
        self.observed
    }

    /// Reports whether a content scan saw the stream end before the
    /// announced size.
    #[inline]
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.observed.is_some_and(|observed| observed < self.expected)
    }

    /// Number of announced bytes the stream failed to deliver, if any.
    #[must_use]
    pub fn shortfall(&self) -> Option<u64> {
        self.observed
            .map(|observed| self.expected - observed)
            .filter(|missing| *missing > 0)
    }
}
