//! crates/chunks/src/indexer.rs
//!
//! Windowed scan building a chunk index from a file or reader.

use std::fs::File;
use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::Path;

use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::instrument;

use ranges::ByteRange;

use crate::digest::ChunkDigest;
use crate::index::ChunkIndex;

/// Default window size for chunk indexing: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;

/// Errors raised while building a chunk index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The file exists but could not be opened or read.
    ///
    /// Never raised for a missing file — a missing file yields an empty
    /// index, while a present-but-unreadable one must not be mistaken for
    /// "no local data".
    #[error("failed to read local file while building chunk index: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
}

/// Configuration for splitting files into fixed-size chunks.
///
/// Every window except possibly the last spans exactly
/// [`chunk_size`](Self::chunk_size) bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkIndexer {
    chunk_size: NonZeroUsize,
}

impl ChunkIndexer {
    /// Creates an indexer with the default 1 MiB window.
    #[must_use]
    pub fn new() -> Self {
        let chunk_size =
            NonZeroUsize::new(DEFAULT_CHUNK_SIZE).expect("default chunk size is non-zero");
        Self { chunk_size }
    }

    /// Creates an indexer with an explicit window size.
    #[must_use]
    pub const fn with_chunk_size(chunk_size: NonZeroUsize) -> Self {
        Self { chunk_size }
    }

    /// Returns the configured window size.
    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Scans the file at `path` and returns its chunk index.
    ///
    /// A missing file yields an empty index rather than an error; the caller
    /// treats "nothing local" and "empty local file" identically. Any other
    /// open or read failure is surfaced as [`IndexError::Io`]. The scan holds
    /// one window in memory at a time and does not modify the file.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(self), fields(chunk_size = self.chunk_size.get()))
    )]
    pub fn index_file(&self, path: &Path) -> Result<ChunkIndex, IndexError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(ChunkIndex::empty(self.chunk_size));
            }
            Err(error) => return Err(IndexError::Io(error)),
        };
        self.index_reader(file)
    }

    /// Scans `reader` to exhaustion in fixed-size windows.
    ///
    /// For each window the digest and the window's byte range are recorded in
    /// the returned index; on equal digests the last window wins.
    pub fn index_reader<R: Read>(&self, mut reader: R) -> Result<ChunkIndex, IndexError> {
        let chunk_size = self.chunk_size.get();
        let mut index = ChunkIndex::empty(self.chunk_size);
        let mut window = vec![0u8; chunk_size];
        let mut position: u64 = 0;

        loop {
            let filled = fill_window(&mut reader, &mut window)?;
            if filled == 0 {
                break;
            }

            let chunk = &window[..filled];
            let range = ByteRange::new(position, position + filled as u64 - 1);
            index.insert(ChunkDigest::of(chunk), range);
            position += filled as u64;

            if filled < chunk_size {
                break;
            }
        }

        index.set_total_bytes(position);
        Ok(index)
    }
}

impl Default for ChunkIndexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads until `window` is full or the reader ends; returns the filled length.
fn fill_window<R: Read>(reader: &mut R, window: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < window.len() {
        match reader.read(&mut window[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}
