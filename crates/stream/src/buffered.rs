//! crates/stream/src/buffered.rs
//!
//! Growable buffer faking random access over a forward-only source.

use std::io;

use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::source::ByteSource;

/// Errors raised while reading through a [`BufferedStream`].
#[derive(Debug, Error)]
pub enum StreamError {
    /// Transport failure surfaced by the underlying source.
    #[error("failed to pull from byte source: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// A seek target lies beyond what the source was able to supply.
    ///
    /// Distinct from a short [`BufferedStream::read`]: a short read is the
    /// normal shape of end-of-stream, while a seek past the end has no
    /// position to land on.
    #[error("seek to byte {requested} is past the end of the source ({buffered} bytes buffered)")]
    PastEnd {
        /// Position the caller asked to seek to.
        requested: u64,
        /// Number of bytes the source supplied before ending.
        buffered: u64,
    },
}

/// Buffered adapter exposing `read`/`seek`/`tell` over a [`ByteSource`].
///
/// The underlying source can only move forward, so the adapter appends every
/// block it pulls to an internal buffer and serves reads and backward seeks
/// from there. The buffer never shrinks: the source cannot be re-read, and
/// dropping bytes would forfeit the only copy. Walking a stream to its end
/// therefore buffers the entire payload — see the crate-level documentation
/// before pointing this at large files.
///
/// The adapter holds mutable cursor state and is not reentrant; it belongs to
/// exactly one differencing operation at a time.
#[derive(Debug)]
pub struct BufferedStream<S> {
    source: S,
    buffer: Vec<u8>,
    /// Logical cursor. Invariant: `position <= buffer.len()`.
    position: u64,
    exhausted: bool,
}

impl<S: ByteSource> BufferedStream<S> {
    /// Wraps `source` with an empty buffer and the cursor at position zero.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            position: 0,
            exhausted: false,
        }
    }

    /// Returns the current logical position.
    #[inline]
    #[must_use]
    pub const fn tell(&self) -> u64 {
        self.position
    }

    /// Returns the number of bytes buffered so far (the high-water mark).
    #[inline]
    #[must_use]
    pub const fn buffered_len(&self) -> u64 {
        self.buffer.len() as u64
    }

    /// Reports whether the source has ended.
    ///
    /// Once true, [`buffered_len`](Self::buffered_len) is the total size of
    /// the stream.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns every byte pulled from the source so far, from stream start.
    ///
    /// A caller that paid the buffering cost of a full scan can reuse the
    /// bytes from here instead of fetching them again.
    #[inline]
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the adapter, returning the underlying source.
    ///
    /// Buffered bytes are discarded; anything already pulled from the source
    /// cannot be recovered from the source itself.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads up to `len` bytes starting at the current logical position.
    ///
    /// Pulls and buffers additional blocks from the source as needed, then
    /// advances the position by the number of bytes returned. The returned
    /// slice is shorter than `len` only when the source ended first; at the
    /// very end of the stream it is empty.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(position = self.position)))]
    pub fn read(&mut self, len: usize) -> Result<&[u8], StreamError> {
        let target = self.position.saturating_add(len as u64);
        self.fill_to(target)?;

        let start = self.position as usize;
        let take = (len as u64).min(self.buffered_len() - self.position) as usize;
        self.position += take as u64;
        Ok(&self.buffer[start..start + take])
    }

    /// Moves the logical position to `position`.
    ///
    /// Positions at or before the high-water mark are repositioned without
    /// touching the source. A position beyond it forces the adapter to pull
    /// and buffer forward — the only way to skip ahead on a stream that
    /// cannot be queried at an offset.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(from = self.position)))]
    pub fn seek(&mut self, position: u64) -> Result<(), StreamError> {
        self.fill_to(position)?;
        if position > self.buffered_len() {
            return Err(StreamError::PastEnd {
                requested: position,
                buffered: self.buffered_len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Pulls from the source until `target` bytes are buffered or the source
    /// ends, whichever comes first.
    fn fill_to(&mut self, target: u64) -> Result<(), StreamError> {
        while self.buffered_len() < target && !self.exhausted {
            match self.source.pull()? {
                Some(block) => self.buffer.extend_from_slice(&block),
                None => self.exhausted = true,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;
    use std::io;

    fn stream_of(blocks: &[&[u8]]) -> BufferedStream<impl ByteSource> {
        let blocks: Vec<io::Result<Vec<u8>>> =
            blocks.iter().map(|block| Ok(block.to_vec())).collect();
        BufferedStream::new(IterSource::new(blocks.into_iter()))
    }

    #[test]
    fn read_spans_block_boundaries() {
        let mut stream = stream_of(&[b"ab", b"cd", b"ef"]);
        assert_eq!(stream.read(3).unwrap(), b"abc");
        assert_eq!(stream.tell(), 3);
        assert_eq!(stream.read(3).unwrap(), b"def");
        assert_eq!(stream.tell(), 6);
    }

    #[test]
    fn short_read_at_end_of_stream() {
        let mut stream = stream_of(&[b"abc"]);
        assert_eq!(stream.read(10).unwrap(), b"abc");
        assert!(stream.is_exhausted());
        assert_eq!(stream.read(10).unwrap(), b"");
    }

    #[test]
    fn read_of_zero_bytes_is_empty_and_stationary() {
        let mut stream = stream_of(&[b"abc"]);
        assert_eq!(stream.read(0).unwrap(), b"");
        assert_eq!(stream.tell(), 0);
    }

    #[test]
    fn backward_seek_rereads_buffered_bytes() {
        let mut stream = stream_of(&[b"abcdef"]);
        assert_eq!(stream.read(4).unwrap(), b"abcd");
        stream.seek(1).unwrap();
        assert_eq!(stream.tell(), 1);
        assert_eq!(stream.read(3).unwrap(), b"bcd");
    }

    #[test]
    fn forward_seek_buffers_skipped_bytes() {
        let mut stream = stream_of(&[b"ab", b"cd", b"ef"]);
        stream.seek(4).unwrap();
        assert_eq!(stream.tell(), 4);
        assert_eq!(stream.buffered_len(), 4);
        assert_eq!(stream.read(2).unwrap(), b"ef");
        // The skipped prefix is still there.
        assert_eq!(&stream.buffered()[..4], b"abcd");
    }

    #[test]
    fn seek_to_exact_end_is_allowed() {
        let mut stream = stream_of(&[b"abc"]);
        stream.seek(3).unwrap();
        assert_eq!(stream.read(1).unwrap(), b"");
    }

    #[test]
    fn seek_past_end_is_an_error() {
        let mut stream = stream_of(&[b"abc"]);
        let error = stream.seek(7).unwrap_err();
        match error {
            StreamError::PastEnd { requested, buffered } => {
                assert_eq!(requested, 7);
                assert_eq!(buffered, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Failed seek leaves the cursor where it was.
        assert_eq!(stream.tell(), 0);
    }

    #[test]
    fn buffer_only_grows() {
        let mut stream = stream_of(&[b"ab", b"cd"]);
        stream.read(4).unwrap();
        stream.seek(0).unwrap();
        stream.read(2).unwrap();
        assert_eq!(stream.buffered_len(), 4);
    }

    #[test]
    fn transport_error_propagates() {
        let blocks: Vec<io::Result<Vec<u8>>> = vec![
            Ok(b"ab".to_vec()),
            Err(io::Error::new(io::ErrorKind::TimedOut, "stalled")),
        ];
        let mut stream = BufferedStream::new(IterSource::new(blocks.into_iter()));
        let error = stream.read(4).unwrap_err();
        assert!(matches!(error, StreamError::Io(_)));
    }

    #[test]
    fn empty_blocks_are_tolerated() {
        let mut stream = stream_of(&[b"ab", b"", b"cd"]);
        assert_eq!(stream.read(4).unwrap(), b"abcd");
    }

    #[test]
    fn into_source_returns_transport() {
        let stream = stream_of(&[b"ab"]);
        let mut source = stream.into_source();
        assert_eq!(source.pull().unwrap(), Some(b"ab".to_vec()));
    }
}
