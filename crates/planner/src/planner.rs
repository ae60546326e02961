//! crates/planner/src/planner.rs
//!
//! Policy evaluation and the content scan.

use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::instrument;

use chunks::{ChunkDigest, ChunkIndex};
use ranges::{ByteRange, coalesce};
use stream::{BufferedStream, ByteSource, StreamError};

use crate::local::LocalFileState;
use crate::plan::FetchPlan;
use crate::remote::RemoteFile;
use crate::strategy::DiffStrategy;

/// Errors raised while computing a fetch plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Transport failure surfaced while scanning the remote content.
    #[error("content scan failed: {0}")]
    Stream(
        #[from]
        #[source]
        StreamError,
    ),
}

/// Decides which byte ranges of a remote file need fetching.
///
/// Construction fixes the [`DiffStrategy`]; each [`plan`](Self::plan) call is
/// then a pure computation over the supplied descriptors (plus, for a content
/// scan, one forward pass over the remote stream).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DiffPlanner {
    strategy: DiffStrategy,
}

impl DiffPlanner {
    /// Creates a planner with the given strategy.
    #[must_use]
    pub const fn new(strategy: DiffStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> DiffStrategy {
        self.strategy
    }

    /// Computes the ranges that must be fetched to bring the local copy up
    /// to date with the remote.
    ///
    /// Decision policy, in order:
    ///
    /// 1. A zero remote size (including a missing content-length parsed as
    ///    zero) means nothing to fetch — an empty plan, not an error.
    /// 2. A missing local file, or a provided-but-empty chunk index, means
    ///    nothing usable is on disk: one range covering the whole remote.
    /// 3. Otherwise the strategy decides — see [`DiffStrategy`].
    ///
    /// A `ContentDiff` plan restores the stream's logical position to
    /// whatever the caller held before the call, so a consumer sharing the
    /// adapter is unaffected. `ContentDiff` without an index degenerates to a
    /// full fetch without touching the stream: with nothing to match against,
    /// every window would come back changed anyway.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            skip(self, remote, local, index),
            fields(remote_size = remote.size(), strategy = ?self.strategy)
        )
    )]
    pub fn plan<S: ByteSource>(
        &self,
        remote: &mut RemoteFile<S>,
        local: &LocalFileState,
        index: Option<&ChunkIndex>,
    ) -> Result<FetchPlan, PlanError> {
        let total = remote.size();
        if total == 0 {
            return Ok(FetchPlan::unscanned(Vec::new(), 0));
        }

        let everything = ByteRange::new(0, total - 1);
        let full_fetch = FetchPlan::unscanned(vec![everything], total);

        if !local.exists() {
            return Ok(full_fetch);
        }
        if index.is_some_and(ChunkIndex::is_empty) {
            return Ok(full_fetch);
        }

        match self.strategy {
            DiffStrategy::SizeHeuristic => Ok(Self::plan_by_size(total, local)),
            DiffStrategy::ContentDiff {
                rescan_unchanged_size,
            } => {
                let Some(index) = index else {
                    return Ok(full_fetch);
                };
                if !rescan_unchanged_size && local.size() == total {
                    return Ok(FetchPlan::unscanned(Vec::new(), total));
                }
                scan_content(remote.stream_mut(), total, index)
            }
        }
    }

    /// The size fast path: cheap, but blind to content changes at equal size.
    fn plan_by_size(total: u64, local: &LocalFileState) -> FetchPlan {
        if local.size() == total {
            FetchPlan::unscanned(Vec::new(), total)
        } else if local.size() < total {
            // The local copy is a presumed-good prefix; fetch the rest.
            FetchPlan::unscanned(vec![ByteRange::new(local.size(), total - 1)], total)
        } else {
            FetchPlan::unscanned(vec![ByteRange::new(0, total - 1)], total)
        }
    }
}

impl Default for DiffPlanner {
    fn default() -> Self {
        Self::new(DiffStrategy::default())
    }
}

/// Walks the remote stream window by window, collecting the ranges whose
/// content exists nowhere in the local chunk index.
///
/// Windows are sized to the index's own chunk size so that digests are
/// comparable. The scan stops at the announced total or at end of stream,
/// whichever comes first; bytes never observed are never planned. The
/// stream's logical position is restored before returning.
fn scan_content<S: ByteSource>(
    stream: &mut BufferedStream<S>,
    total: u64,
    index: &ChunkIndex,
) -> Result<FetchPlan, PlanError> {
    let window = index.chunk_size().get();
    let origin = stream.tell();
    stream.seek(0)?;

    let mut changed = Vec::new();
    let mut position: u64 = 0;
    while position < total {
        let want = (total - position).min(window as u64) as usize;
        let bytes = stream.read(want)?;
        if bytes.is_empty() {
            break;
        }

        let len = bytes.len() as u64;
        if !index.contains(&ChunkDigest::of(bytes)) {
            changed.push(ByteRange::new(position, position + len - 1));
        }
        position += len;

        if (len as usize) < want {
            break;
        }
    }

    stream.seek(origin)?;
    Ok(FetchPlan::scanned(coalesce(changed), total, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunks::ChunkIndexer;
    use std::io::Cursor;
    use std::num::NonZeroUsize;
    use test_support::ScriptedSource;

    fn index_of(local_content: &[u8], chunk_size: usize) -> ChunkIndex {
        ChunkIndexer::with_chunk_size(NonZeroUsize::new(chunk_size).unwrap())
            .index_reader(Cursor::new(local_content.to_vec()))
            .unwrap()
    }

    fn remote_of(size: u64, content: &[u8]) -> RemoteFile<ScriptedSource> {
        RemoteFile::new(size, ScriptedSource::chunked(content, 2))
    }

    #[test]
    fn zero_remote_size_means_nothing_to_fetch() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(0, b"");
        let plan = planner
            .plan(&mut remote, &LocalFileState::missing(), None)
            .unwrap();
        assert!(plan.is_empty());
        assert!(!plan.is_truncated());
    }

    #[test]
    fn missing_local_fetches_everything() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        let plan = planner
            .plan(&mut remote, &LocalFileState::missing(), None)
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(0, 9)]);
    }

    #[test]
    fn empty_index_fetches_everything_even_if_file_exists() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        let empty = index_of(b"", 4);
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 10),
                Some(&empty),
            )
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(0, 9)]);
    }

    #[test]
    fn equal_sizes_assumed_unchanged() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        let plan = planner
            .plan(&mut remote, &LocalFileState::from_parts(true, 10), None)
            .unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.observed_bytes(), None);
    }

    #[test]
    fn shorter_local_resumes_from_prefix() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        let plan = planner
            .plan(&mut remote, &LocalFileState::from_parts(true, 4), None)
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(4, 9)]);
    }

    #[test]
    fn larger_local_falls_back_to_full_fetch() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        let plan = planner
            .plan(&mut remote, &LocalFileState::from_parts(true, 12), None)
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(0, 9)]);
    }

    #[test]
    fn size_heuristic_never_touches_the_stream() {
        let planner = DiffPlanner::new(DiffStrategy::SizeHeuristic);
        let mut remote = remote_of(10, b"0123456789");
        planner
            .plan(&mut remote, &LocalFileState::from_parts(true, 4), None)
            .unwrap();
        assert_eq!(remote.stream().buffered_len(), 0);
    }

    #[test]
    fn content_diff_flags_unknown_windows() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        // Local "aacc" holds windows "aa" and "cc"; remote inserts "bb".
        let index = index_of(b"aacc", 2);
        let mut remote = remote_of(6, b"aabbcc");
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 4),
                Some(&index),
            )
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(2, 3)]);
        assert_eq!(plan.observed_bytes(), Some(6));
        assert!(!plan.is_truncated());
    }

    #[test]
    fn content_diff_without_index_degenerates_to_full_fetch() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let mut remote = remote_of(6, b"aabbcc");
        let plan = planner
            .plan(&mut remote, &LocalFileState::from_parts(true, 6), None)
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(0, 5)]);
        assert_eq!(remote.stream().buffered_len(), 0);
    }

    #[test]
    fn equal_size_short_circuit_skips_the_scan() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: false,
        });
        let index = index_of(b"aabbcc", 2);
        let mut remote = remote_of(6, b"xxyyzz");
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 6),
                Some(&index),
            )
            .unwrap();
        // Sizes match, so the changed content goes undetected by choice.
        assert!(plan.is_empty());
        assert_eq!(remote.stream().buffered_len(), 0);
    }

    #[test]
    fn rescan_catches_equal_size_content_change() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let index = index_of(b"aabbcc", 2);
        let mut remote = remote_of(6, b"aaXXcc");
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 6),
                Some(&index),
            )
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(2, 3)]);
    }

    #[test]
    fn truncated_stream_plans_only_observed_windows() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let index = index_of(b"aa", 2);
        // Announced ten bytes, delivered four.
        let mut remote = RemoteFile::new(10, ScriptedSource::new(&[b"aa", b"bb"]));
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 2),
                Some(&index),
            )
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(2, 3)]);
        assert_eq!(plan.observed_bytes(), Some(4));
        assert!(plan.is_truncated());
        assert_eq!(plan.shortfall(), Some(6));
    }

    #[test]
    fn scan_restores_the_callers_cursor() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let index = index_of(b"aabbcc", 2);
        let mut remote = remote_of(6, b"aabbcc");
        remote.stream_mut().read(3).unwrap();
        assert_eq!(remote.stream().tell(), 3);

        planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 6),
                Some(&index),
            )
            .unwrap();
        assert_eq!(remote.stream().tell(), 3);
    }

    #[test]
    fn adjacent_changed_windows_coalesce() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let index = index_of(b"aa", 2);
        let mut remote = remote_of(8, b"aabbccdd");
        let plan = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 2),
                Some(&index),
            )
            .unwrap();
        assert_eq!(plan.ranges(), &[ByteRange::new(2, 7)]);
    }

    #[test]
    fn transport_fault_during_scan_is_an_error() {
        let planner = DiffPlanner::new(DiffStrategy::ContentDiff {
            rescan_unchanged_size: true,
        });
        let index = index_of(b"aa", 2);
        let source = ScriptedSource::with_fault(
            &[b"aa"],
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "dropped"),
        );
        let mut remote = RemoteFile::new(10, source);
        let error = planner
            .plan(
                &mut remote,
                &LocalFileState::from_parts(true, 2),
                Some(&index),
            )
            .unwrap_err();
        assert!(matches!(error, PlanError::Stream(StreamError::Io(_))));
    }
}
