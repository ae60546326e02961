#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Forward-only byte sources and buffered pseudo-random access over them.
//!
//! # Overview
//!
//! A remote file fetched over HTTP arrives as a one-shot sequence of byte
//! blocks: the transport yields them in order, cannot be rewound, and cannot
//! be queried at an offset. Content differencing, however, wants to walk the
//! payload window by window as if it had a file handle. This crate bridges
//! the two worlds:
//!
//! - [`ByteSource`] abstracts the pull-only transport — one block per call,
//!   `None` once the stream is drained for good.
//! - [`BufferedStream`] wraps a source in a growable buffer and exposes
//!   `read`/`seek`/`tell`, faking random access by remembering every byte it
//!   has ever pulled.
//!
//! # Buffering cost
//!
//! The internal buffer only grows. Bytes received from the source are never
//! discarded, because the source itself cannot be re-read — that is the whole
//! trade: memory in exchange for seekability. A forward scan to the end of a
//! large stream therefore holds the entire payload in memory. Callers that
//! only need sequential access should consume the source directly instead.

mod buffered;
mod source;

pub use buffered::{BufferedStream, StreamError};
pub use source::{ByteSource, DEFAULT_BLOCK_SIZE, IterSource, ReadSource};
