//! Host byte order detection and network order conversion.
//!
//! Wire order is always big-endian. On a little-endian host the conversions
//! reverse the bytes of the value, on a big-endian host they are the identity.

/// Byte order of a machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first (network order).
    Big,
    /// Neither of the two common orders, e.g. PDP-endian.
    Mixed,
}

impl Endian {
    /// Human readable name of the byte order.
    pub const fn name(self) -> &'static str {
        match self {
            Endian::Little => "little",
            Endian::Big => "big",
            Endian::Mixed => "mixed",
        }
    }
}

/// Detects the host byte order by looking at the in-memory layout of a known
/// 4-byte pattern.
pub const fn host_endian() -> Endian {
    match u32::from_ne_bytes([1, 2, 3, 4]) {
        0x0102_0304 => Endian::Big,
        0x0403_0201 => Endian::Little,
        _ => Endian::Mixed,
    }
}

/// Byte order of the machine this crate was compiled for.
pub const HOST_ENDIAN: Endian = host_endian();

/// Conversion between host and network byte order.
pub trait NetworkOrder: Copy {
    /// Reverses the bytes of the value unconditionally.
    fn swap_bytes(self) -> Self;

    /// Converts a host order value to network order.
    fn to_network(self) -> Self;

    /// Converts a network order value to host order.
    fn to_host(self) -> Self;
}

macro_rules! impl_network_order {
    ($($ty:ty),+) => {
        $(
            impl NetworkOrder for $ty {
                #[inline(always)]
                fn swap_bytes(self) -> Self {
                    <$ty>::swap_bytes(self)
                }

                #[inline(always)]
                fn to_network(self) -> Self {
                    <$ty>::to_be(self)
                }

                #[inline(always)]
                fn to_host(self) -> Self {
                    <$ty>::from_be(self)
                }
            }
        )+
    };
}

impl_network_order!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Converts a host order value to network order.
#[inline(always)]
pub fn to_network<T: NetworkOrder>(value: T) -> T {
    value.to_network()
}

/// Converts a network order value to host order.
#[inline(always)]
pub fn to_host<T: NetworkOrder>(value: T) -> T {
    value.to_host()
}
