//! A `no_std` bit-packed binary codec for fixed-size network packets.
//!
//! Values are written into a caller-owned buffer at bit granularity, most
//! significant bit first, with multi-byte values in network order. Each
//! field takes exactly the bits its type needs: one for a `bool`, the
//! minimal width for an enum or a bounded integer, the natural width for
//! everything else.
//!
//! # Packets
//!
//! ```
//! use bitwire::{Bounded, Decode, Encode, WireEnum, from_bytes, to_bytes};
//!
//! #[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
//! enum Kind {
//!     Ping,
//!     Pong,
//!     Error,
//! }
//!
//! #[derive(Encode, Decode, Debug, PartialEq)]
//! #[wire(tag = Kind::Ping)]
//! struct Ping {
//!     id: u16,
//!     hops: Bounded<u8, 0, 15>,
//! }
//!
//! let ping = Ping { id: 7, hops: Bounded::new(3).unwrap() };
//! assert_eq!(<Ping as Encode>::MIN_BITS, 2 + 16 + 4);
//!
//! let mut buf = [0u8; 3];
//! assert_eq!(to_bytes(&ping, &mut buf).unwrap(), 3);
//! assert_eq!(from_bytes::<Ping>(&buf).unwrap(), ping);
//! ```
//!
//! # Bit cursors
//!
//! ```
//! use bitwire::{BitReader, BitWriter};
//!
//! let mut buf = [0u8; 1];
//! let mut writer = BitWriter::new(&mut buf);
//! writer.write_bool(true).unwrap();
//! writer.write_bits(0b100, 3).unwrap();
//! assert_eq!(buf, [0b1100_0000]);
//!
//! let mut reader = BitReader::new(&buf);
//! assert!(reader.read_bool().unwrap());
//! assert_eq!(reader.read_bits(3).unwrap(), 4);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

// Lets the derives' `bitwire::` paths resolve inside this crate too.
extern crate self as bitwire;

pub use bitwire_core::*;

#[cfg(feature = "derive")]
pub use bitwire_macros::{Decode, Encode, WireEnum};
