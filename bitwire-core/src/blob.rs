//! Inline byte buffers encoded with a 16-bit length prefix.

use core::fmt;
use core::hash::{Hash, Hasher};

use snafu::ensure;

use crate::error::{CapacityExceededSnafu, Result};
use crate::reader::BitReader;
use crate::traits::{Decode, Encode, padding_at};
use crate::writer::BitWriter;

/// Up to `N` bytes stored inline.
///
/// On the wire this is the length-prefixed blob of
/// [`BitWriter::write_blob`]: byte-aligned, 16-bit length, then the bytes.
#[derive(Clone, Copy)]
pub struct FixedBlob<const N: usize> {
    len: u16,
    bytes: [u8; N],
}

impl<const N: usize> FixedBlob<N> {
    const CHECK: () = assert!(N <= u16::MAX as usize, "blob capacity must fit a 16-bit length");

    /// An empty blob.
    pub const fn new() -> Self {
        let () = Self::CHECK;
        Self {
            len: 0,
            bytes: [0; N],
        }
    }

    /// Copies `bytes` into a new blob.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut blob = Self::new();
        blob.set(bytes)?;
        Ok(blob)
    }

    /// Replaces the contents with `bytes`; the blob is untouched on failure.
    pub fn set(&mut self, bytes: &[u8]) -> Result<()> {
        ensure!(
            bytes.len() <= N,
            CapacityExceededSnafu {
                needed: bytes.len(),
                capacity: N
            }
        );
        self.bytes[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len() as u16;
        Ok(())
    }

    /// Stored bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of stored bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether no bytes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for FixedBlob<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for FixedBlob<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBlob")
            .field("capacity", &N)
            .field("bytes", &self.as_slice())
            .finish()
    }
}

// Bytes past `len` are stale and take no part in comparisons.
impl<const N: usize> PartialEq for FixedBlob<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for FixedBlob<N> {}

impl<const N: usize> Hash for FixedBlob<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBlob<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<const N: usize> Encode for FixedBlob<N> {
    const MIN_BITS: usize = 16;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.write_blob(self.as_slice())
    }

    fn bit_len_at(&self, start: usize) -> usize {
        padding_at(start) + 16 + self.len() * 8
    }
}

impl<const N: usize> Decode for FixedBlob<N> {
    const MIN_BITS: usize = 16;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut blob = Self::new();
        let len = reader.read_blob(&mut blob.bytes)?;
        blob.len = len as u16;
        Ok(blob)
    }
}
