//! crates/stream/src/source.rs
//!
//! Pull-only byte block producers.

use std::io::{self, Read};
use std::num::NonZeroUsize;

/// Number of bytes [`ReadSource`] requests from its reader per block.
///
/// 64 KiB matches the block granularity HTTP client libraries commonly hand
/// out when iterating a response body.
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// A one-shot producer of byte blocks.
///
/// Implementations yield the payload strictly in arrival order: every call to
/// [`pull`](Self::pull) either returns the next block, reports the permanent
/// end of the stream with `Ok(None)`, or surfaces a transport fault. There is
/// no way to rewind or to request an offset; anything already pulled is gone
/// unless the caller retained it (see [`crate::BufferedStream`]).
pub trait ByteSource {
    /// Pulls the next block from the stream.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. After that, every
    /// subsequent call must keep returning `Ok(None)`. Blocks may be of any
    /// non-uniform size, including empty.
    fn pull(&mut self) -> io::Result<Option<Vec<u8>>>;
}

/// Adapts an iterator of byte blocks into a [`ByteSource`].
///
/// This is the natural fit for HTTP client APIs that expose a response body
/// as an iterator of chunks.
#[derive(Debug)]
pub struct IterSource<I> {
    blocks: I,
    finished: bool,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    /// Wraps `blocks` as a forward-only byte source.
    pub const fn new(blocks: I) -> Self {
        Self {
            blocks,
            finished: false,
        }
    }
}

impl<I> ByteSource for IterSource<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    fn pull(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.finished {
            return Ok(None);
        }
        match self.blocks.next() {
            Some(Ok(block)) => Ok(Some(block)),
            Some(Err(error)) => Err(error),
            None => {
                self.finished = true;
                Ok(None)
            }
        }
    }
}

/// Adapts any [`Read`] implementor into a [`ByteSource`] yielding fixed-size
/// blocks (the final block may be shorter).
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    block_size: NonZeroUsize,
    finished: bool,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `reader`, producing blocks of [`DEFAULT_BLOCK_SIZE`] bytes.
    pub fn new(reader: R) -> Self {
        let block_size =
            NonZeroUsize::new(DEFAULT_BLOCK_SIZE).expect("default block size is non-zero");
        Self::with_block_size(reader, block_size)
    }

    /// Wraps `reader`, producing blocks of `block_size` bytes.
    pub const fn with_block_size(reader: R, block_size: NonZeroUsize) -> Self {
        Self {
            reader,
            block_size,
            finished: false,
        }
    }

    /// Returns the configured block size.
    #[must_use]
    pub const fn block_size(&self) -> NonZeroUsize {
        self.block_size
    }

    /// Consumes the source, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn pull(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.finished {
            return Ok(None);
        }

        let mut block = vec![0u8; self.block_size.get()];
        let mut filled = 0;
        while filled < block.len() {
            match self.reader.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }

        if filled == 0 {
            self.finished = true;
            return Ok(None);
        }
        block.truncate(filled);
        Ok(Some(block))
    }
}
