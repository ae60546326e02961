#![deny(unsafe_code)]

//! Shared test utilities: tempfile fixtures and scripted byte sources.
//!
//! Everything here is test-only plumbing; the crate is never published and
//! panics freely on setup failure.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use stream::ByteSource;

/// Creates a temp directory holding one file with the given contents.
///
/// Returns the directory guard (keep it alive for the duration of the test)
/// together with the file's path.
#[must_use]
pub fn temp_file_with(contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("fixture.bin");
    fs::write(&path, contents).expect("write fixture file");
    (dir, path)
}

/// A [`ByteSource`] double yielding a scripted sequence of blocks.
///
/// Optionally ends with an injected transport fault instead of a clean end of
/// stream, for truncation and error-path tests.
#[derive(Debug)]
pub struct ScriptedSource {
    blocks: VecDeque<Vec<u8>>,
    fault: Option<io::Error>,
}

impl ScriptedSource {
    /// Yields `blocks` in order, then a clean end of stream.
    #[must_use]
    pub fn new(blocks: &[&[u8]]) -> Self {
        Self {
            blocks: blocks.iter().map(|block| block.to_vec()).collect(),
            fault: None,
        }
    }

    /// Splits `data` into `block_size`-byte blocks, then a clean end of stream.
    #[must_use]
    pub fn chunked(data: &[u8], block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be non-zero");
        Self {
            blocks: data.chunks(block_size).map(<[u8]>::to_vec).collect(),
            fault: None,
        }
    }

    /// Yields `blocks` in order, then fails with `fault`.
    #[must_use]
    pub fn with_fault(blocks: &[&[u8]], fault: io::Error) -> Self {
        Self {
            blocks: blocks.iter().map(|block| block.to_vec()).collect(),
            fault: Some(fault),
        }
    }
}

impl ByteSource for ScriptedSource {
    fn pull(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(block) = self.blocks.pop_front() {
            return Ok(Some(block));
        }
        match self.fault.take() {
            Some(fault) => Err(fault),
            None => Ok(None),
        }
    }
}
