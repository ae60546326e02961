//! crates/planner/src/remote.rs
//!
//! Descriptor pairing a remote file's announced size with its byte stream.

use stream::{BufferedStream, ByteSource};

/// A remote file as the transport presents it: an authoritative byte size
/// (typically a content-length header) and a one-shot sequential byte source.
///
/// The size is authoritative for planning; the stream may still yield fewer
/// bytes than announced, which a content scan reports as truncation rather
/// than silently accepting (see [`crate::FetchPlan::is_truncated`]).
#[derive(Debug)]
pub struct RemoteFile<S> {
    size: u64,
    stream: BufferedStream<S>,
}

impl<S: ByteSource> RemoteFile<S> {
    /// Wraps a fresh source, buffering from stream position zero.
    pub const fn new(size: u64, source: S) -> Self {
        Self {
            size,
            stream: BufferedStream::new(source),
        }
    }

    /// Wraps an adapter another consumer has already been reading through.
    ///
    /// Planning leaves the adapter's logical position where it found it, so
    /// the prior consumer can carry on afterwards.
    pub const fn from_stream(size: u64, stream: BufferedStream<S>) -> Self {
        Self { size, stream }
    }

    /// The announced total size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Shared view of the buffering adapter.
    #[inline]
    #[must_use]
    pub const fn stream(&self) -> &BufferedStream<S> {
        &self.stream
    }

    /// Mutable access to the buffering adapter.
    #[inline]
    pub const fn stream_mut(&mut self) -> &mut BufferedStream<S> {
        &mut self.stream
    }

    /// Consumes the descriptor, returning the adapter and every byte it
    /// buffered — after a content scan, that is the whole remote payload.
    pub fn into_stream(self) -> BufferedStream<S> {
        self.stream
    }
}
