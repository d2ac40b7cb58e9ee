//! Minimal-width enumeration codec.

/// Number of bits needed to represent `value`, i.e. the index of its highest
/// set bit plus one. `bits_count(0) == 0`.
#[inline]
pub const fn bits_count(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// A fieldless enumeration with an `Error` sentinel that can travel on the
/// wire in `BITS` bits.
///
/// `COUNT` is the number of real enumerators, which are numbered
/// `0..COUNT`. The sentinel takes the raw value `COUNT`, and any raw value at
/// or above `COUNT` decodes to it, so a malformed stream yields a recognizable
/// tag rather than an invalid enumerator.
///
/// Usually implemented with `#[derive(WireEnum)]`.
pub trait WireEnum: Copy + Sized {
    /// Number of real enumerators.
    const COUNT: u64;

    /// The sentinel for unrecognized values.
    const ERROR: Self;

    /// Wire width: enough bits for `0..=COUNT`.
    const BITS: u32 = bits_count(Self::COUNT);

    /// Raw wire value of the enumerator.
    fn to_raw(self) -> u64;

    /// Enumerator for a raw value, `ERROR` for anything `>= COUNT`.
    fn from_raw(raw: u64) -> Self;

    /// Whether this is the sentinel.
    #[inline]
    fn is_error(self) -> bool {
        self.to_raw() >= Self::COUNT
    }
}
