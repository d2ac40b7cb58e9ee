use crate::{BitReader, BitWriter, Decode, Encode, Result};

// Unsigned integers travel at their natural width.
macro_rules! impl_codec_for_uint {
    ($($ty:ty),+) => {
        $(
            impl Encode for $ty {
                const MIN_BITS: usize = <$ty>::BITS as usize;

                #[inline]
                fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
                    writer.write_uint(*self, <$ty>::BITS)
                }
            }

            impl Decode for $ty {
                const MIN_BITS: usize = <$ty>::BITS as usize;

                #[inline]
                fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
                    reader.read_uint(<$ty>::BITS)
                }
            }
        )+
    };
}

// Signed integers reuse the bit pattern of the unsigned type of equal width.
macro_rules! impl_codec_for_int {
    ($($ty:ty => $unsigned:ty),+) => {
        $(
            impl Encode for $ty {
                const MIN_BITS: usize = <$ty>::BITS as usize;

                #[inline]
                fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
                    writer.write_uint(*self as $unsigned, <$ty>::BITS)
                }
            }

            impl Decode for $ty {
                const MIN_BITS: usize = <$ty>::BITS as usize;

                #[inline]
                fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
                    let raw: $unsigned = reader.read_uint(<$ty>::BITS)?;
                    Ok(raw as $ty)
                }
            }
        )+
    };
}

// Floats travel as their IEEE 754 bit pattern.
macro_rules! impl_codec_for_float {
    ($($ty:ty => $unsigned:ty),+) => {
        $(
            impl Encode for $ty {
                const MIN_BITS: usize = <$unsigned>::BITS as usize;

                #[inline]
                fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
                    writer.write_uint(self.to_bits(), <$unsigned>::BITS)
                }
            }

            impl Decode for $ty {
                const MIN_BITS: usize = <$unsigned>::BITS as usize;

                #[inline]
                fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
                    let raw: $unsigned = reader.read_uint(<$unsigned>::BITS)?;
                    Ok(<$ty>::from_bits(raw))
                }
            }
        )+
    };
}

// Tuples are encoded element by element and roll back as a whole.
macro_rules! impl_codec_for_tuple {
    ($(($($name:ident),+)),+) => {
        $(
            impl<$($name: Encode),+> Encode for ($($name,)+) {
                const MIN_BITS: usize = 0 $(+ $name::MIN_BITS)+;

                #[allow(non_snake_case)]
                fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
                    let ($($name,)+) = self;
                    writer.transaction(|writer| {
                        $($name.encode(writer)?;)+
                        Ok(())
                    })
                }

                #[allow(non_snake_case)]
                fn bit_len_at(&self, start: usize) -> usize {
                    let ($($name,)+) = self;
                    let mut pos = start;
                    $(pos += $name.bit_len_at(pos);)+
                    pos - start
                }
            }

            impl<$($name: Decode),+> Decode for ($($name,)+) {
                const MIN_BITS: usize = 0 $(+ $name::MIN_BITS)+;

                fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
                    reader.transaction(|reader| Ok(($($name::decode(reader)?,)+)))
                }
            }
        )+
    };
}

impl_codec_for_uint!(u8, u16, u32, u64, u128);
impl_codec_for_int!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128);
impl_codec_for_float!(f32 => u32, f64 => u64);
impl_codec_for_tuple!((A), (A, B), (A, B, C), (A, B, C, D), (A, B, C, D, E), (A, B, C, D, E, F));
