//! Type-driven dispatch: every wire type implements [`Encode`] and
//! [`Decode`], and composite types build on the impls of their parts.

use crate::enums::WireEnum;
use crate::error::Result;
use crate::reader::BitReader;
use crate::writer::BitWriter;

/// A value that can be packed by a [`BitWriter`].
pub trait Encode {
    /// Lower bound on the encoded size in bits.
    ///
    /// Exact for fixed-width types. Types with variable-length parts count
    /// only their fixed prefix.
    const MIN_BITS: usize;

    /// Writes `self` at the writer's cursor.
    ///
    /// On failure the cursor is left where it was. Bits past the cursor may
    /// have been overwritten.
    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()>;

    /// Bits this particular value occupies when written with the cursor at
    /// absolute bit `start`, counting any alignment padding it inserts.
    ///
    /// Only `start % 8` matters. Types that never align ignore `start`.
    #[inline]
    fn bit_len_at(&self, start: usize) -> usize {
        let _ = start;
        Self::MIN_BITS
    }

    /// Bits this particular value occupies when written from a byte
    /// boundary.
    #[inline]
    fn bit_len(&self) -> usize {
        self.bit_len_at(0)
    }
}

/// Bits of zero padding a write at absolute bit `pos` inserts before it
/// reaches the next byte boundary.
#[inline]
pub const fn padding_at(pos: usize) -> usize {
    (8 - pos % 8) % 8
}

/// A value that can be unpacked by a [`BitReader`].
pub trait Decode: Sized {
    /// Lower bound on the encoded size in bits.
    const MIN_BITS: usize;

    /// Reads a value at the reader's cursor.
    ///
    /// On failure the cursor is left where it was.
    fn decode(reader: &mut BitReader<'_>) -> Result<Self>;
}

/// An aggregate whose encoding starts with a fixed discriminant.
///
/// [`Decode::decode`] reads and checks the discriminant.
/// [`Tagged::decode_body`] reads only the fields, for dispatchers that
/// already consumed the discriminant to pick the type:
///
/// ```ignore
/// match reader.read_enum::<Kind>()? {
///     Kind::Ping => handle(Ping::decode_body(&mut reader)?),
///     Kind::Pong => handle(Pong::decode_body(&mut reader)?),
///     _ => return Err(..),
/// }
/// ```
pub trait Tagged: Decode {
    /// Discriminant enumeration shared by the family of aggregates.
    type Kind: WireEnum;

    /// Discriminant of this aggregate.
    const KIND: Self::Kind;

    /// Reads the fields that follow the discriminant.
    fn decode_body(reader: &mut BitReader<'_>) -> Result<Self>;
}
