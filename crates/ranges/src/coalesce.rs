//! crates/ranges/src/coalesce.rs
//!
//! Canonicalization of byte range lists.

use crate::range::ByteRange;

/// Merges a list of byte ranges into a sorted, minimal set of disjoint,
/// non-adjacent spans covering exactly the union of the input's positions.
///
/// Input ranges may arrive in any order and may overlap or touch. The output
/// is ascending by start, no two output ranges share or neighbor a byte
/// position, and the operation is idempotent: coalescing an already coalesced
/// list returns it unchanged.
///
/// An empty input yields an empty output.
#[must_use]
pub fn coalesce(ranges: impl IntoIterator<Item = ByteRange>) -> Vec<ByteRange> {
    let mut sorted: Vec<ByteRange> = ranges.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<ByteRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(current) if current.touches(&range) => {
                if range.end() > current.end() {
                    current.grow_to(range.end());
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}
