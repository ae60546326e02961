//! crates/ranges/src/range.rs
//!
//! Inclusive byte range value type.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed interval of byte positions, zero-based and inclusive on both ends.
///
/// Ranges are never empty: `start <= end` holds for every constructed value,
/// so the smallest representable range covers exactly one byte. A range of
/// bytes 4 through 9 displays as `4-9`, matching the payload of an HTTP
/// `bytes=4-9` request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "(u64, u64)", try_from = "(u64, u64)")
)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`. Use [`ByteRange::try_new`] when the bounds
    /// come from untrusted input.
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        assert!(
            start <= end,
            "byte range start {start} exceeds end {end}"
        );
        Self { start, end }
    }

    /// Creates a range covering `start..=end`, rejecting inverted bounds.
    pub const fn try_new(start: u64, end: u64) -> Result<Self, InvalidRange> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(InvalidRange { start, end })
        }
    }

    /// Creates a range of `len` bytes beginning at `start`.
    ///
    /// Returns `None` when `len` is zero (ranges are never empty) or when the
    /// end position would overflow.
    #[must_use]
    pub const fn from_len(start: u64, len: u64) -> Option<Self> {
        if len == 0 {
            return None;
        }
        match start.checked_add(len - 1) {
            Some(end) => Some(Self { start, end }),
            None => None,
        }
    }

    /// Returns the first byte position covered by the range.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the last byte position covered by the range.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Returns the number of bytes the range covers.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Reports whether `position` falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, position: u64) -> bool {
        self.start <= position && position <= self.end
    }

    /// Reports whether the two ranges share at least one byte position.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Reports whether the two ranges overlap or sit directly next to each
    /// other, with no gap in between.
    ///
    /// Touching ranges describe one contiguous span of bytes and collapse
    /// into a single range under [`crate::coalesce`].
    #[inline]
    #[must_use]
    pub const fn touches(&self, other: &Self) -> bool {
        self.start <= other.end.saturating_add(1) && other.start <= self.end.saturating_add(1)
    }

    /// Extends the range forward so that it ends at `end`.
    ///
    /// Caller must guarantee `end >= self.end`.
    pub(crate) fn grow_to(&mut self, end: u64) {
        debug_assert!(end >= self.end);
        self.end = end;
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<ByteRange> for (u64, u64) {
    fn from(range: ByteRange) -> Self {
        (range.start, range.end)
    }
}

impl TryFrom<(u64, u64)> for ByteRange {
    type Error = InvalidRange;

    fn try_from((start, end): (u64, u64)) -> Result<Self, Self::Error> {
        Self::try_new(start, end)
    }
}

/// Error returned when constructing a range whose start exceeds its end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidRange {
    start: u64,
    end: u64,
}

impl InvalidRange {
    /// Start bound the caller supplied when the error was raised.
    #[must_use]
    pub const fn start(self) -> u64 {
        self.start
    }

    /// End bound the caller supplied when the error was raised.
    #[must_use]
    pub const fn end(self) -> u64 {
        self.end
    }
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte range start {} exceeds end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvalidRange {}
