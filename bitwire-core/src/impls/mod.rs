mod macros;

use crate::{BitReader, BitWriter, CodecError, Decode, Encode, Result};

impl Encode for bool {
    const MIN_BITS: usize = 1;

    #[inline]
    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.write_bool(*self)
    }
}

impl Decode for bool {
    const MIN_BITS: usize = 1;

    #[inline]
    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.read_bool()
    }
}

// usize/isize - serialize as u64/i64 for portability
impl Encode for usize {
    const MIN_BITS: usize = 64;

    #[inline]
    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        (*self as u64).encode(writer)
    }
}

impl Decode for usize {
    const MIN_BITS: usize = 64;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| {
            usize::try_from(u64::decode(reader)?).map_err(|_| CodecError::OutOfRange {
                reason: "value does not fit usize on this target",
            })
        })
    }
}

impl Encode for isize {
    const MIN_BITS: usize = 64;

    #[inline]
    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        (*self as i64).encode(writer)
    }
}

impl Decode for isize {
    const MIN_BITS: usize = 64;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| {
            isize::try_from(i64::decode(reader)?).map_err(|_| CodecError::OutOfRange {
                reason: "value does not fit isize on this target",
            })
        })
    }
}

impl Encode for () {
    const MIN_BITS: usize = 0;

    #[inline]
    fn encode(&self, _writer: &mut BitWriter<'_>) -> Result<()> {
        Ok(())
    }
}

impl Decode for () {
    const MIN_BITS: usize = 0;

    #[inline]
    fn decode(_reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    const MIN_BITS: usize = T::MIN_BITS;

    #[inline]
    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        (**self).encode(writer)
    }

    #[inline]
    fn bit_len_at(&self, start: usize) -> usize {
        (**self).bit_len_at(start)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    const MIN_BITS: usize = T::MIN_BITS * N;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.transaction(|writer| {
            for item in self {
                item.encode(writer)?;
            }
            Ok(())
        })
    }

    fn bit_len_at(&self, start: usize) -> usize {
        self.iter().fold(start, |pos, item| pos + item.bit_len_at(pos)) - start
    }
}

// Elements are decoded in place over a default-filled array.
impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    const MIN_BITS: usize = T::MIN_BITS * N;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| {
            let mut items: [T; N] = core::array::from_fn(|_| T::default());
            for slot in items.iter_mut() {
                *slot = T::decode(reader)?;
            }
            Ok(items)
        })
    }
}
