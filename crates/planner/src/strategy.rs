//! crates/planner/src/strategy.rs
//!
//! Caller-selectable differencing policies.

/// How the planner decides which bytes differ.
///
/// The two policies trade certainty against cost, and the caller picks per
/// operation. Neither is a byte-exact correctness proof: `SizeHeuristic` is
/// blind to content changes at equal size, and `ContentDiff` inherits the
/// chunk index's membership semantics (see [`chunks::ChunkIndex`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiffStrategy {
    /// Compare sizes only: O(1), no stream consumption, no buffering.
    ///
    /// Equal sizes are assumed unchanged; a local file shorter than the
    /// remote resumes from the known-good prefix; anything else falls back
    /// to a full fetch.
    SizeHeuristic,

    /// Rehash the remote content window by window against the local chunk
    /// index. Exact inequality detection, at the cost of consuming — and
    /// buffering — the entire remote stream once.
    ContentDiff {
        /// Whether an equal-size remote is still content-scanned.
        ///
        /// With `false`, equal sizes short-circuit to "unchanged" and the
        /// stream is never touched — the cheap behavior. With `true`, equal
        /// sizes are rescanned anyway, catching same-size content changes at
        /// full buffering cost.
        rescan_unchanged_size: bool,
    },
}

impl Default for DiffStrategy {
    /// The cheapest policy; opt into content scanning explicitly.
    fn default() -> Self {
        Self::SizeHeuristic
    }
}
