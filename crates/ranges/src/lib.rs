#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Inclusive byte ranges for differential download planning.
//!
//! This crate provides the two leaf pieces the rest of the workspace builds
//! on: [`ByteRange`], a closed `[start, end]` interval of byte positions, and
//! [`coalesce`], which canonicalizes an arbitrary list of ranges into a
//! sorted, minimal set of disjoint, non-adjacent spans.
//!
//! Ranges are inclusive on both ends so that they map directly onto HTTP
//! range requests: `ByteRange::new(4, 9)` renders as `4-9`, the exact payload
//! of a `bytes=4-9` request header.
//!
//! With the `serde` feature enabled, [`ByteRange`] serializes as a
//! `(start, end)` pair and validates the `start <= end` invariant on
//! deserialization.

mod coalesce;
mod range;

pub use coalesce::coalesce;
pub use range::{ByteRange, InvalidRange};
