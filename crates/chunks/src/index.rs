//! crates/chunks/src/index.rs
//!
//! Digest-to-range mapping built from one linear scan of a file.

use std::num::NonZeroUsize;

use rustc_hash::FxHashMap;

use ranges::ByteRange;

use crate::digest::ChunkDigest;

/// Mapping from chunk content digest to the byte range that content occupied
/// at scan time.
///
/// Built once per differencing operation from the on-disk state of the local
/// file; immutable afterward. Ranges are contiguous and non-overlapping by
/// construction — consecutive windows of [`chunk_size`](Self::chunk_size)
/// bytes, the last possibly shorter.
///
/// # Membership, not position
///
/// When two windows anywhere in the file digest identically, the last one
/// scanned wins and the earlier range is forgotten. The index therefore
/// answers "does a chunk with this content exist somewhere locally", not "is
/// the content at this exact offset unchanged". That is what lets a planner
/// recognize locally-present content even after it moved within the file; the
/// price is positional precision whenever duplicate chunk content exists.
/// This is a documented property of the design, not a defect.
#[derive(Clone, Debug)]
pub struct ChunkIndex {
    chunk_size: NonZeroUsize,
    total_bytes: u64,
    entries: FxHashMap<ChunkDigest, ByteRange>,
}

impl ChunkIndex {
    pub(crate) fn empty(chunk_size: NonZeroUsize) -> Self {
        Self {
            chunk_size,
            total_bytes: 0,
            entries: FxHashMap::default(),
        }
    }

    /// Records `range` as the location of the chunk content `digest`.
    /// Last write wins on digest collision.
    pub(crate) fn insert(&mut self, digest: ChunkDigest, range: ByteRange) {
        self.entries.insert(digest, range);
    }

    pub(crate) fn set_total_bytes(&mut self, total_bytes: u64) {
        self.total_bytes = total_bytes;
    }

    /// Reports whether chunk content with this digest exists somewhere in the
    /// indexed file.
    #[inline]
    #[must_use]
    pub fn contains(&self, digest: &ChunkDigest) -> bool {
        self.entries.contains_key(digest)
    }

    /// Returns the range last recorded for `digest`, if any.
    #[inline]
    #[must_use]
    pub fn range_of(&self, digest: &ChunkDigest) -> Option<ByteRange> {
        self.entries.get(digest).copied()
    }

    /// Number of distinct chunk digests in the index.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the index holds no chunks at all.
    ///
    /// True for a missing or zero-length file.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Window size the index was built with.
    ///
    /// A content scan against this index must use the same window size, or
    /// no digest will ever match.
    #[inline]
    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Total number of bytes scanned while building the index.
    #[inline]
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Iterates over `(digest, range)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkDigest, &ByteRange)> {
        self.entries.iter()
    }
}
