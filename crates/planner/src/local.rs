//! crates/planner/src/local.rs
//!
//! Snapshot of the local file at planning time.

use std::fs;
use std::io;
use std::path::Path;

/// Existence and size of the local file, captured at the moment of planning.
///
/// A cheap pre-check consulted before any content scan. The snapshot is not
/// kept in sync with the filesystem; probe again for a fresh view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocalFileState {
    exists: bool,
    size: u64,
}

impl LocalFileState {
    /// Probes the filesystem at `path`.
    ///
    /// A missing file yields [`LocalFileState::missing`]; any other metadata
    /// failure (permissions, I/O fault) is surfaced rather than being
    /// mistaken for "no local file".
    pub fn probe(path: &Path) -> io::Result<Self> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(Self {
                exists: true,
                size: metadata.len(),
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::missing()),
            Err(error) => Err(error),
        }
    }

    /// State of a file that does not exist.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            exists: false,
            size: 0,
        }
    }

    /// Builds a state from already-known parts.
    #[must_use]
    pub const fn from_parts(exists: bool, size: u64) -> Self {
        Self { exists, size }
    }

    /// Reports whether the file existed when probed.
    #[inline]
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }

    /// Size in bytes at probe time; zero when the file is missing.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::temp_file_with;

    #[test]
    fn probe_existing_file_reports_size() {
        let (_dir, path) = temp_file_with(b"abcd");
        let state = LocalFileState::probe(&path).unwrap();
        assert!(state.exists());
        assert_eq!(state.size(), 4);
    }

    #[test]
    fn probe_missing_file_is_not_an_error() {
        let (dir, _) = temp_file_with(b"");
        let state = LocalFileState::probe(&dir.path().join("absent")).unwrap();
        assert_eq!(state, LocalFileState::missing());
    }

    #[test]
    fn missing_state_has_zero_size() {
        let state = LocalFileState::missing();
        assert!(!state.exists());
        assert_eq!(state.size(), 0);
    }

    #[test]
    fn from_parts_round_trips() {
        let state = LocalFileState::from_parts(true, 42);
        assert!(state.exists());
        assert_eq!(state.size(), 42);
    }
}
