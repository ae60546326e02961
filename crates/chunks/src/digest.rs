//! crates/chunks/src/digest.rs
//!
//! Fixed-width content digest over a single chunk.

use core::fmt;

use digest::Digest;
use md5::Md5;

/// MD5 digest over exactly one chunk's bytes.
///
/// Used for equality and membership checks only — chunk digests detect
/// inequality, they do not prove byte-for-byte identity. Two chunks with
/// colliding digests are treated as the same content.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct ChunkDigest([u8; Self::LEN]);

impl ChunkDigest {
    /// Width of the digest in bytes.
    pub const LEN: usize = 16;

    /// Digests `chunk` in one shot.
    #[must_use]
    pub fn of(chunk: &[u8]) -> Self {
        Self(Md5::digest(chunk).into())
    }

    /// Reconstructs a digest from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Display for ChunkDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkDigest({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 1321 test vectors.
    #[test]
    fn known_vectors() {
        assert_eq!(
            ChunkDigest::of(b"").to_string(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ChunkDigest::of(b"abc").to_string(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn equal_content_equal_digest() {
        assert_eq!(ChunkDigest::of(b"chunk"), ChunkDigest::of(b"chunk"));
        assert_ne!(ChunkDigest::of(b"chunk"), ChunkDigest::of(b"chunk!"));
    }

    #[test]
    fn round_trip_through_raw_bytes() {
        let digest = ChunkDigest::of(b"payload");
        let raw = *digest.as_bytes();
        assert_eq!(ChunkDigest::from_bytes(raw), digest);
    }

    #[test]
    fn debug_includes_hex() {
        let debug = format!("{:?}", ChunkDigest::of(b"abc"));
        assert!(debug.contains("900150983cd24fb0d6963f7d28e17f72"));
    }
}
