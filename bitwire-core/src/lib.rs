//! Core implementation for bitwire.
//!
//! Values are packed at bit granularity, most significant bit first, into a
//! fixed buffer owned by the caller. Nothing in this crate allocates.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod address;
mod blob;
mod bounded;
mod codec;
mod cursor;
pub mod endian;
mod enums;
mod error;
mod impls;
mod reader;
pub mod time;
mod traits;
mod view;
mod writer;

#[cfg(test)]
mod tests;

pub use address::Address;
pub use blob::FixedBlob;
pub use bounded::{Bounded, BoundedRepr, Location};
pub use codec::{deserialize, from_bytes, serialize, to_bytes};
pub use cursor::{Cursor, Unsigned, bytes_for_bits};
pub use endian::{Endian, NetworkOrder, host_endian};
pub use enums::{WireEnum, bits_count};
pub use error::{CodecError, Result};
pub use reader::BitReader;
pub use time::{FracTicks, Ticks, TimeUnit};
pub use traits::{Decode, Encode, Tagged, padding_at};
pub use view::{ByteView, ByteViewConst};
pub use writer::BitWriter;
