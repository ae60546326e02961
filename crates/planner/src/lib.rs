#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Range planning for differential downloads.
//!
//! # Overview
//!
//! Given a local (possibly partial or stale) copy of a file and a remote copy
//! reachable only through a forward-only byte stream, the planner computes the
//! minimal set of byte ranges that must be fetched to bring the local copy up
//! to date — without ever reading the remote stream twice.
//!
//! The caller supplies three inputs:
//!
//! - a [`RemoteFile`]: the transport-announced total size plus the one-shot
//!   byte source, wrapped in a [`stream::BufferedStream`];
//! - a [`LocalFileState`]: existence and size probed from the filesystem;
//! - optionally, a [`chunks::ChunkIndex`] over the local file's content.
//!
//! and picks one of two explicit strategies ([`DiffStrategy`]):
//!
//! - **`SizeHeuristic`** — O(1), consumes nothing from the stream. Detects
//!   size changes only: an equal-size remote is assumed unchanged, a longer
//!   remote yields a single resume range covering the unfetched suffix, and
//!   anything else falls back to a full fetch.
//! - **`ContentDiff`** — exact, but consumes (and therefore buffers) the
//!   entire remote stream once. Each window of the stream is digested and
//!   checked for membership in the chunk index; windows whose content exists
//!   nowhere locally become fetch ranges.
//!
//! The output is a [`FetchPlan`]: coalesced, disjoint, ascending byte ranges
//! ready to be turned into range requests, plus enough bookkeeping to detect
//! a remote stream that ended before its announced size
//! ([`FetchPlan::is_truncated`]).
//!
//! # What this crate does not do
//!
//! It never writes the local file, never issues network requests, and never
//! retries — it is a pure computation over data the caller already has. The
//! actual fetch, and any parallel splitting of the returned ranges, belong to
//! the caller.

mod local;
mod plan;
mod planner;
mod remote;
mod strategy;

pub use local::LocalFileState;
pub use plan::FetchPlan;
pub use planner::{DiffPlanner, PlanError};
pub use remote::RemoteFile;
pub use strategy::DiffStrategy;
