//! Bit-granular deserialization from a caller-owned buffer.

use snafu::ensure;

use crate::cursor::{Cursor, Unsigned, WINDOW_BYTES, filled_mask, span_bytes, window_shift};
use crate::enums::WireEnum;
use crate::error::{CapacityExceededSnafu, InvalidArgumentSnafu, ReadUnderflowSnafu, Result};
use crate::traits::Decode;
use crate::view::{ByteView, ByteViewConst};

/// A cursor which unpacks values from a fixed byte buffer.
///
/// Mirrors [`BitWriter`](crate::BitWriter): bits are consumed starting at
/// the MSB of each byte, multi-byte values are in network order, and a read
/// that fails leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    view: ByteViewConst<'a>,
    cursor: Cursor,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the start of `view`.
    pub fn new(view: impl Into<ByteViewConst<'a>>) -> Self {
        Self {
            view: view.into(),
            cursor: Cursor::new(),
        }
    }

    /// Current cursor position.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Index of the byte the next bit is taken from.
    #[inline]
    pub fn byte_index(&self) -> usize {
        self.cursor.byte_index()
    }

    /// Offset of the next bit inside the current byte.
    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.cursor.bit_offset()
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.cursor.bit_position()
    }

    /// Number of bytes touched so far, counting a partial byte.
    #[inline]
    pub fn size(&self) -> usize {
        self.cursor.size()
    }

    /// Total number of bits in the buffer.
    #[inline]
    pub fn bit_capacity(&self) -> usize {
        self.view.size() * 8
    }

    /// Number of bits that can still be read.
    #[inline]
    pub fn bits_left(&self) -> usize {
        self.bit_capacity() - self.cursor.bit_position()
    }

    /// Fails unless at least `nbits` more bits are available.
    #[inline]
    pub fn ensure_bits(&self, nbits: usize) -> Result<()> {
        ensure!(
            nbits <= self.bits_left(),
            ReadUnderflowSnafu {
                needed: nbits,
                available: self.bits_left()
            }
        );
        Ok(())
    }

    // Fails unless `prefix` bits and then `len` whole bytes are available
    // once the cursor is aligned. Compares in bytes so huge lengths cannot
    // wrap.
    fn ensure_aligned(&self, prefix: usize, len: usize) -> Result<()> {
        let head = self.cursor.padding() as usize + prefix;
        let left = self.bits_left();
        ensure!(
            head <= left && len <= (left - head) / 8,
            ReadUnderflowSnafu {
                needed: head.saturating_add(len.saturating_mul(8)),
                available: left
            }
        );
        Ok(())
    }

    // Extracts `nbits` bits at the cursor. Callers must have checked
    // availability and `1 <= nbits <= 64`.
    fn take(&mut self, nbits: u32) -> u64 {
        let offset = self.cursor.bit_offset();
        let start = self.cursor.byte_index();
        let span = span_bytes(offset, nbits);

        let mut window = [0u8; WINDOW_BYTES];
        window[..span].copy_from_slice(&self.view.as_slice()[start..start + span]);
        let word = u128::from_be_bytes(window) & filled_mask(offset, nbits);

        self.cursor.advance(nbits as usize);
        (word >> window_shift(offset, nbits)) as u64
    }

    /// Reads `nbits` bits, at most 64, into the low bits of the result.
    pub fn read_bits(&mut self, nbits: u32) -> Result<u64> {
        ensure!(
            nbits <= u64::BITS,
            InvalidArgumentSnafu {
                reason: "at most 64 bits per call"
            }
        );
        self.ensure_bits(nbits as usize)?;
        Ok(if nbits > 0 { self.take(nbits) } else { 0 })
    }

    /// Reads `nbits` bits into an unsigned integer.
    pub fn read_uint<U: Unsigned>(&mut self, nbits: u32) -> Result<U> {
        ensure!(
            nbits <= U::BITS,
            InvalidArgumentSnafu {
                reason: "bit count exceeds the width of the value"
            }
        );
        self.ensure_bits(nbits as usize)?;

        let wide = if nbits > u64::BITS {
            let high = self.take(nbits - u64::BITS) as u128;
            (high << u64::BITS) | self.take(u64::BITS) as u128
        } else if nbits > 0 {
            self.take(nbits) as u128
        } else {
            0
        };
        Ok(U::narrow(wide))
    }

    /// Reads a single bit.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.ensure_bits(1)?;
        Ok(self.take(1) == 1)
    }

    /// Reads an enumerator written with [`BitWriter::write_enum`](crate::BitWriter::write_enum).
    ///
    /// Raw values at or above `E::COUNT` decode to the `E::ERROR` sentinel.
    pub fn read_enum<E: WireEnum>(&mut self) -> Result<E> {
        let raw = self.read_bits(E::BITS)?;
        Ok(E::from_raw(raw.min(E::COUNT)))
    }

    /// Moves the cursor to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        self.cursor.advance(self.cursor.padding() as usize);
    }

    /// Borrows `len` raw bytes starting at the next byte boundary.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        ensure!(
            len > 0,
            InvalidArgumentSnafu {
                reason: "raw copy of zero bytes"
            }
        );
        self.ensure_aligned(0, len)?;
        self.align_to_byte();
        Ok(self.slice_aligned(len))
    }

    fn slice_aligned(&mut self, len: usize) -> &'a [u8] {
        let start = self.cursor.byte_index();
        let bytes = &self.view.as_slice()[start..start + len];
        self.cursor.advance_bytes(len);
        bytes
    }

    /// Fills `dest` with raw bytes starting at the next byte boundary.
    pub fn read_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        let bytes = self.read_slice(dest.len())?;
        dest.copy_from_slice(bytes);
        Ok(())
    }

    /// Borrows a blob written with [`BitWriter::write_blob`](crate::BitWriter::write_blob).
    pub fn read_blob_slice(&mut self) -> Result<&'a [u8]> {
        self.ensure_bits(self.cursor.padding() as usize + 16)?;

        self.transaction(|reader| {
            reader.align_to_byte();
            let len = reader.read_uint::<u16>(u16::BITS)? as usize;
            if len == 0 {
                return Ok(&[][..]);
            }
            reader.ensure_aligned(0, len)?;
            Ok(reader.slice_aligned(len))
        })
    }

    /// Copies a length-prefixed blob into `dest`, returning its length.
    ///
    /// Fails with [`CodecError::CapacityExceeded`](crate::CodecError::CapacityExceeded)
    /// if the declared length does not fit into `dest`.
    pub fn read_blob(&mut self, dest: &mut [u8]) -> Result<usize> {
        self.transaction(|reader| {
            let bytes = reader.read_blob_slice()?;
            ensure!(
                bytes.len() <= dest.len(),
                CapacityExceededSnafu {
                    needed: bytes.len(),
                    capacity: dest.len()
                }
            );
            dest[..bytes.len()].copy_from_slice(bytes);
            Ok(bytes.len())
        })
    }

    /// Copies a length-prefixed blob into `dest` and shrinks it to the blob.
    pub fn read_blob_into(&mut self, dest: &mut ByteView<'_>) -> Result<()> {
        let len = self.read_blob(dest.as_mut_slice())?;
        dest.set_size(len)
    }

    /// Decodes a value without consuming it.
    pub fn peek<T: Decode>(&mut self) -> Result<T> {
        let mark = self.cursor;
        let value = T::decode(self);
        self.cursor = mark;
        value
    }

    /// Runs `f`, restoring the cursor if it fails.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let mark = self.cursor;
        let result = f(self);
        if result.is_err() {
            #[cfg(feature = "log")]
            log::trace!(
                "read rolled back from bit {} to bit {}",
                self.cursor.bit_position(),
                mark.bit_position()
            );
            self.cursor = mark;
        }
        result
    }
}
