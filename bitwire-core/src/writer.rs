//! Bit-granular serialization into a caller-owned buffer.

use snafu::ensure;

use crate::cursor::{Cursor, Unsigned, WINDOW_BYTES, filled_mask, span_bytes, window_shift};
use crate::enums::WireEnum;
use crate::error::{InvalidArgumentSnafu, Result, WriteOverflowSnafu};
use crate::view::ByteView;

/// A cursor which packs values into a fixed byte buffer.
///
/// Bits are written starting at the MSB of each byte, and values spanning
/// several bytes are laid out in network order. Every write either commits
/// all of its bits or fails without moving the cursor.
///
/// # Example
///
/// ```
/// use bitwire_core::BitWriter;
///
/// let mut buf = [0u8; 1];
/// let mut writer = BitWriter::new(&mut buf);
/// writer.write_bool(true).unwrap();
/// writer.write_bits(0b100, 3).unwrap();
/// assert_eq!(writer.written(), &[0b1100_0000]);
/// ```
#[derive(Debug)]
pub struct BitWriter<'a> {
    view: ByteView<'a>,
    cursor: Cursor,
}

impl<'a> BitWriter<'a> {
    /// Creates a writer positioned at the start of `view`.
    pub fn new(view: impl Into<ByteView<'a>>) -> Self {
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

    /// Index of the byte the next bit lands in.
    #[inline]
    pub fn byte_index(&self) -> usize {
        self.cursor.byte_index()
    }

    /// Offset of the next bit inside the current byte.
    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.cursor.bit_offset()
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.cursor.bit_position()
    }

    /// Number of bytes touched so far, counting a partial byte.
    #[inline]
    pub fn size(&self) -> usize {
        self.cursor.size()
    }

    /// Total number of bits the buffer holds.
    #[inline]
    pub fn bit_capacity(&self) -> usize {
        self.view.size() * 8
    }

    /// Number of bits that can still be written.
    #[inline]
    pub fn bits_left(&self) -> usize {
        self.bit_capacity() - self.cursor.bit_position()
    }

    /// Bytes touched so far.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.view.as_slice()[..self.cursor.size()]
    }

    /// Consumes the writer and returns the underlying buffer.
    #[inline]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.view.into_inner()
    }

    /// Fails unless at least `nbits` more bits fit into the buffer.
    #[inline]
    pub fn ensure_bits(&self, nbits: usize) -> Result<()> {
        ensure!(
            nbits <= self.bits_left(),
            WriteOverflowSnafu {
                needed: nbits,
                available: self.bits_left()
            }
        );
        Ok(())
    }

    // Fails unless `prefix` bits and then `len` whole bytes fit once the
    // cursor is aligned. Compares in bytes so huge lengths cannot wrap.
    fn ensure_aligned(&self, prefix: usize, len: usize) -> Result<()> {
        let head = self.cursor.padding() as usize + prefix;
        let left = self.bits_left();
        ensure!(
            head <= left && len <= (left - head) / 8,
            WriteOverflowSnafu {
                needed: head.saturating_add(len.saturating_mul(8)),
                available: left
            }
        );
        Ok(())
    }

    // Merges the low `nbits` bits of `value` at the cursor. Callers must have
    // checked capacity and `1 <= nbits <= 64`.
    fn put(&mut self, value: u64, nbits: u32) {
        let offset = self.cursor.bit_offset();
        let start = self.cursor.byte_index();
        let span = span_bytes(offset, nbits);
        let target = &mut self.view.as_mut_slice()[start..start + span];

        let mut window = [0u8; WINDOW_BYTES];
        window[..span].copy_from_slice(target);
        let word = u128::from_be_bytes(window);

        // Keep neighbouring bits, overwrite the addressed range.
        let mask = filled_mask(offset, nbits);
        let placed = ((value as u128) << window_shift(offset, nbits)) & mask;
        let word = (word & !mask) | placed;

        target.copy_from_slice(&word.to_be_bytes()[..span]);
        self.cursor.advance(nbits as usize);
    }

    /// Writes the low `nbits` bits of `value`, at most 64.
    pub fn write_bits(&mut self, value: u64, nbits: u32) -> Result<()> {
        ensure!(
            nbits <= u64::BITS,
            InvalidArgumentSnafu {
                reason: "at most 64 bits per call"
            }
        );
        self.ensure_bits(nbits as usize)?;
        if nbits > 0 {
            self.put(value, nbits);
        }
        Ok(())
    }

    /// Writes the low `nbits` bits of an unsigned integer.
    pub fn write_uint<U: Unsigned>(&mut self, value: U, nbits: u32) -> Result<()> {
        ensure!(
            nbits <= U::BITS,
            InvalidArgumentSnafu {
                reason: "bit count exceeds the width of the value"
            }
        );
        self.ensure_bits(nbits as usize)?;

        let wide = value.widen();
        if nbits > u64::BITS {
            self.put((wide >> u64::BITS) as u64, nbits - u64::BITS);
            self.put(wide as u64, u64::BITS);
        } else if nbits > 0 {
            self.put(wide as u64, nbits);
        }
        Ok(())
    }

    /// Writes a single bit, 1 for `true`.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.ensure_bits(1)?;
        self.put(value as u64, 1);
        Ok(())
    }

    /// Writes an enumerator using the minimal width of its enum.
    pub fn write_enum<E: WireEnum>(&mut self, value: E) -> Result<()> {
        self.write_bits(value.to_raw(), E::BITS)
    }

    /// Moves the cursor to the next byte boundary, zeroing the skipped bits.
    pub fn align_to_byte(&mut self) {
        let padding = self.cursor.padding();
        if padding > 0 {
            self.put(0, padding);
        }
    }

    /// Copies raw bytes starting at the next byte boundary.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        ensure!(
            !bytes.is_empty(),
            InvalidArgumentSnafu {
                reason: "raw copy of zero bytes"
            }
        );
        self.ensure_aligned(0, bytes.len())?;
        self.align_to_byte();
        self.copy_aligned(bytes);
        Ok(())
    }

    fn copy_aligned(&mut self, bytes: &[u8]) {
        let start = self.cursor.byte_index();
        self.view.as_mut_slice()[start..start + bytes.len()].copy_from_slice(bytes);
        self.cursor.advance_bytes(bytes.len());
    }

    /// Writes a byte-aligned blob prefixed by its 16-bit length.
    ///
    /// Nothing is written unless the prefix and every byte fit.
    pub fn write_blob(&mut self, bytes: &[u8]) -> Result<()> {
        ensure!(
            bytes.len() <= u16::MAX as usize,
            InvalidArgumentSnafu {
                reason: "blob longer than a 16-bit length prefix"
            }
        );
        self.ensure_aligned(16, bytes.len())?;

        self.transaction(|writer| {
            writer.align_to_byte();
            writer.write_uint(bytes.len() as u16, u16::BITS)?;
            if !bytes.is_empty() {
                writer.copy_aligned(bytes);
            }
            Ok(())
        })
    }

    /// Runs `f`, restoring the cursor if it fails.
    ///
    /// Bits written by a failed closure are left in the buffer past the
    /// cursor and are overwritten by subsequent writes.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let mark = self.cursor;
        let result = f(self);
        if result.is_err() {
            #[cfg(feature = "log")]
            log::trace!(
                "write rolled back from bit {} to bit {}",
                self.cursor.bit_position(),
                mark.bit_position()
            );
            self.cursor = mark;
        }
        result
    }
}
