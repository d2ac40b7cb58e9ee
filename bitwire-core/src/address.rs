//! Socket address encoding.
//!
//! Wire layout: a 1-bit IPv4 flag, the 16-bit port, then the raw address
//! octets (4 or 16) starting at the next byte boundary. IPv6 flow info and
//! scope id are not carried.

use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::error::{CodecError, OutOfRangeSnafu, Result};
use crate::reader::BitReader;
use crate::traits::{Decode, Encode, padding_at};
use crate::writer::BitWriter;

const HEADER_BITS: usize = 1 + 16;
const V4_BITS: usize = HEADER_BITS + 4 * 8;
const V6_BITS: usize = HEADER_BITS + 16 * 8;

/// An endpoint address that may not have been filled in yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Address {
    /// No address family; cannot be encoded.
    #[default]
    Unspecified,
    /// IPv4 endpoint.
    V4(SocketAddrV4),
    /// IPv6 endpoint.
    V6(SocketAddrV6),
}

impl Address {
    /// Whether no family has been set.
    #[inline]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Address::Unspecified)
    }

    /// Port number, 0 when unspecified.
    pub fn port(&self) -> u16 {
        match self {
            Address::Unspecified => 0,
            Address::V4(addr) => addr.port(),
            Address::V6(addr) => addr.port(),
        }
    }

    /// IP address, if a family is set.
    pub fn ip(&self) -> Option<IpAddr> {
        self.socket_addr().map(|addr| addr.ip())
    }

    /// Standard socket address, if a family is set.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match *self {
            Address::Unspecified => None,
            Address::V4(addr) => Some(SocketAddr::V4(addr)),
            Address::V6(addr) => Some(SocketAddr::V6(addr)),
        }
    }
}

impl From<SocketAddr> for Address {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(addr) => Address::V4(addr),
            SocketAddr::V6(addr) => Address::V6(addr),
        }
    }
}

impl From<SocketAddrV4> for Address {
    fn from(addr: SocketAddrV4) -> Self {
        Address::V4(addr)
    }
}

impl From<SocketAddrV6> for Address {
    fn from(addr: SocketAddrV6) -> Self {
        Address::V6(addr)
    }
}

impl TryFrom<Address> for SocketAddr {
    type Error = CodecError;

    fn try_from(addr: Address) -> Result<Self> {
        addr.socket_addr().ok_or(CodecError::OutOfRange {
            reason: "unspecified address family",
        })
    }
}

fn write_endpoint(writer: &mut BitWriter<'_>, is_v4: bool, port: u16, octets: &[u8]) -> Result<()> {
    writer.transaction(|writer| {
        writer.write_bool(is_v4)?;
        writer.write_uint(port, u16::BITS)?;
        writer.write_bytes(octets)
    })
}

impl Encode for Address {
    const MIN_BITS: usize = V4_BITS;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        match self {
            Address::Unspecified => OutOfRangeSnafu {
                reason: "unspecified address family",
            }
            .fail(),
            Address::V4(addr) => write_endpoint(writer, true, addr.port(), &addr.ip().octets()),
            Address::V6(addr) => write_endpoint(writer, false, addr.port(), &addr.ip().octets()),
        }
    }

    fn bit_len_at(&self, start: usize) -> usize {
        let octets = match self {
            Address::V6(_) => 16,
            _ => 4,
        };
        HEADER_BITS + padding_at(start + HEADER_BITS) + octets * 8
    }
}

impl Decode for Address {
    const MIN_BITS: usize = V4_BITS;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| {
            let is_v4 = reader.read_bool()?;
            let port: u16 = reader.read_uint(u16::BITS)?;
            if is_v4 {
                let mut octets = [0u8; 4];
                reader.read_bytes(&mut octets)?;
                Ok(Address::V4(SocketAddrV4::new(Ipv4Addr::from(octets), port)))
            } else {
                let mut octets = [0u8; 16];
                reader.read_bytes(&mut octets)?;
                Ok(Address::V6(SocketAddrV6::new(
                    Ipv6Addr::from(octets),
                    port,
                    0,
                    0,
                )))
            }
        })
    }
}

impl Encode for SocketAddr {
    const MIN_BITS: usize = V4_BITS;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        Address::from(*self).encode(writer)
    }

    fn bit_len_at(&self, start: usize) -> usize {
        Address::from(*self).bit_len_at(start)
    }
}

impl Decode for SocketAddr {
    const MIN_BITS: usize = V4_BITS;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| SocketAddr::try_from(Address::decode(reader)?))
    }
}

impl Encode for SocketAddrV4 {
    const MIN_BITS: usize = V4_BITS;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        write_endpoint(writer, true, self.port(), &self.ip().octets())
    }

    fn bit_len_at(&self, start: usize) -> usize {
        Address::V4(*self).bit_len_at(start)
    }
}

impl Decode for SocketAddrV4 {
    const MIN_BITS: usize = V4_BITS;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| match Address::decode(reader)? {
            Address::V4(addr) => Ok(addr),
            _ => OutOfRangeSnafu {
                reason: "expected an IPv4 address",
            }
            .fail(),
        })
    }
}

impl Encode for SocketAddrV6 {
    const MIN_BITS: usize = V6_BITS;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        write_endpoint(writer, false, self.port(), &self.ip().octets())
    }

    fn bit_len_at(&self, start: usize) -> usize {
        Address::V6(*self).bit_len_at(start)
    }
}

impl Decode for SocketAddrV6 {
    const MIN_BITS: usize = V6_BITS;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| match Address::decode(reader)? {
            Address::V6(addr) => Ok(addr),
            _ => OutOfRangeSnafu {
                reason: "expected an IPv6 address",
            }
            .fail(),
        })
    }
}
