//! Entry points over the [`Encode`]/[`Decode`] dispatch.

use crate::error::Result;
use crate::reader::BitReader;
use crate::traits::{Decode, Encode};
use crate::writer::BitWriter;

/// Writes `value` at the writer's cursor.
#[inline]
pub fn serialize<T: Encode + ?Sized>(writer: &mut BitWriter<'_>, value: &T) -> Result<()> {
    value.encode(writer)
}

/// Reads into `value` at the reader's cursor.
///
/// `value` is only assigned when decoding succeeds.
#[inline]
pub fn deserialize<T: Decode>(reader: &mut BitReader<'_>, value: &mut T) -> Result<()> {
    *value = T::decode(reader)?;
    Ok(())
}

/// Encodes `value` at the start of `buf`, returning the number of bytes
/// touched.
pub fn to_bytes<T: Encode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let mut writer = BitWriter::new(buf);
    value.encode(&mut writer)?;
    Ok(writer.size())
}

/// Decodes a `T` from the start of `buf`.
pub fn from_bytes<T: Decode>(buf: &[u8]) -> Result<T> {
    T::decode(&mut BitReader::new(buf))
}
