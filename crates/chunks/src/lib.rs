#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Content-addressed chunk indexing for local files.
//!
//! A [`ChunkIndexer`] splits a file into consecutive fixed-size windows (the
//! final window may be shorter), digests each window with MD5, and records
//! the digest together with the window's byte range in a [`ChunkIndex`]. The
//! index answers one question for the differencing planner: *does a chunk
//! with this content exist somewhere in the local file?*
//!
//! That is deliberately a membership check, not a positional one. When two
//! windows anywhere in the file digest identically, the index keeps only the
//! last range recorded — see [`ChunkIndex`] for what that trades away.

mod digest;
mod index;
mod indexer;

pub use digest::ChunkDigest;
pub use index::ChunkIndex;
pub use indexer::{ChunkIndexer, DEFAULT_CHUNK_SIZE, IndexError};
