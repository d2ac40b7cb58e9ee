//! Cursor bookkeeping shared by [`BitReader`](crate::BitReader) and
//! [`BitWriter`](crate::BitWriter).

const BITS_IN_BYTE: usize = 8;

// Window size used to address at most 64 bits starting at any bit offset.
// 7 bits of leading offset plus 64 bits of payload touch at most 9 bytes.
pub(crate) const WINDOW_BYTES: usize = 16;

/// Position of a bit cursor inside a byte view.
///
/// `bit` is always in `0..8`; bits are addressed from the most significant
/// bit of each byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    byte: usize,
    bit: u8,
}

impl Cursor {
    /// Cursor at the start of a buffer.
    pub const fn new() -> Self {
        Self { byte: 0, bit: 0 }
    }

    /// Index of the byte the next bit lands in.
    #[inline]
    pub const fn byte_index(&self) -> usize {
        self.byte
    }

    /// Offset of the next bit inside the current byte.
    #[inline]
    pub const fn bit_offset(&self) -> u8 {
        self.bit
    }

    /// Absolute position in bits.
    #[inline]
    pub const fn bit_position(&self) -> usize {
        self.byte * BITS_IN_BYTE + self.bit as usize
    }

    /// Number of bytes touched so far, counting a partial byte.
    #[inline]
    pub const fn size(&self) -> usize {
        self.byte + (self.bit != 0) as usize
    }

    /// Whether the cursor sits on a byte boundary.
    #[inline]
    pub const fn is_aligned(&self) -> bool {
        self.bit == 0
    }

    #[inline]
    pub(crate) fn advance(&mut self, nbits: usize) {
        let total = self.bit as usize + nbits;
        self.byte += total / BITS_IN_BYTE;
        self.bit = (total % BITS_IN_BYTE) as u8;
    }

    #[inline]
    pub(crate) fn advance_bytes(&mut self, nbytes: usize) {
        debug_assert!(self.is_aligned());
        self.byte += nbytes;
    }

    /// Bits needed to reach the next byte boundary.
    #[inline]
    pub(crate) const fn padding(&self) -> u32 {
        ((BITS_IN_BYTE - self.bit as usize) % BITS_IN_BYTE) as u32
    }
}

/// Number of whole bytes needed to hold `nbits` bits.
#[inline]
pub const fn bytes_for_bits(nbits: usize) -> usize {
    nbits.div_ceil(BITS_IN_BYTE)
}

// Mask selecting `nbits` bits that start `offset` bits below the top of a
// big-endian window. Requires `1 <= nbits` and `offset + nbits <= 128`.
#[inline(always)]
pub(crate) const fn filled_mask(offset: u8, nbits: u32) -> u128 {
    let left_aligned = u128::MAX << (u128::BITS - nbits);
    left_aligned >> offset
}

// Number of window bytes spanned by `nbits` bits starting at `offset`.
#[inline(always)]
pub(crate) const fn span_bytes(offset: u8, nbits: u32) -> usize {
    bytes_for_bits(offset as usize + nbits as usize)
}

// Shift that moves a right-aligned value into position under `filled_mask`.
#[inline(always)]
pub(crate) const fn window_shift(offset: u8, nbits: u32) -> u32 {
    u128::BITS - offset as u32 - nbits
}

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width unsigned integers the cursors can move.
pub trait Unsigned: Copy + sealed::Sealed {
    /// Natural width in bits.
    const BITS: u32;

    /// Zero-extends to 128 bits.
    fn widen(self) -> u128;

    /// Truncates a 128-bit value to this width.
    fn narrow(value: u128) -> Self;
}

macro_rules! impl_unsigned {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Unsigned for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline(always)]
                fn widen(self) -> u128 {
                    self as u128
                }

                #[inline(always)]
                fn narrow(value: u128) -> Self {
                    value as $ty
                }
            }
        )+
    };
}

impl_unsigned!(u8, u16, u32, u64, u128);
