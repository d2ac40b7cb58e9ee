//! Integers constrained to a closed interval known at compile time.

use core::fmt;

use snafu::ensure;

use crate::error::{CodecError, OutOfRangeSnafu, Result};
use crate::reader::BitReader;
use crate::traits::{Decode, Encode};
use crate::writer::BitWriter;

mod sealed {
    pub trait Sealed {}
}

/// Integer types that can back a [`Bounded`] value.
pub trait BoundedRepr:
    Copy + Ord + Default + fmt::Debug + fmt::Display + sealed::Sealed
{
    /// Smallest value of the type.
    const REPR_MIN: i128;
    /// Largest value of the type.
    const REPR_MAX: i128;

    /// Lossless widening.
    fn to_wide(self) -> i128;

    /// Narrowing; `wide` must lie in `REPR_MIN..=REPR_MAX`.
    fn from_wide(wide: i128) -> Self;
}

macro_rules! impl_bounded_repr {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl BoundedRepr for $ty {
                const REPR_MIN: i128 = <$ty>::MIN as i128;
                const REPR_MAX: i128 = <$ty>::MAX as i128;

                #[inline(always)]
                fn to_wide(self) -> i128 {
                    self as i128
                }

                #[inline(always)]
                fn from_wide(wide: i128) -> Self {
                    wide as $ty
                }
            }

            // Per concrete type: a blanket `TryFrom<T>` would overlap core's
            // `TryFrom<U> for T where U: Into<T>`.
            impl<const MIN: i128, const MAX: i128> TryFrom<$ty> for Bounded<$ty, MIN, MAX> {
                type Error = CodecError;

                fn try_from(value: $ty) -> Result<Self> {
                    Self::new(value).ok_or(CodecError::OutOfRange {
                        reason: "value outside its bounds",
                    })
                }
            }
        )+
    };
}

impl_bounded_repr!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Where a value lies relative to an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Within the bounds, inclusive.
    Inside,
    /// Greater than the upper bound.
    Above,
    /// Less than the lower bound.
    Below,
}

/// A `T` guaranteed to lie in `MIN..=MAX`.
///
/// Encoded as `value - MIN` in [`Self::BITS`] bits, the fewest that can
/// represent every value of the interval. Bounds that are out of order or do
/// not fit `T` are rejected at compile time.
///
/// ```
/// use bitwire_core::Bounded;
///
/// let mut level = Bounded::<i32, -1100, -1000>::default();
/// assert_eq!(level.get(), -1100);
/// assert!(!level.set(-999));
/// assert!(level.set(-1050));
/// assert_eq!(Bounded::<i32, -1100, -1000>::BITS, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bounded<T: BoundedRepr, const MIN: i128, const MAX: i128> {
    value: T,
}

impl<T: BoundedRepr, const MIN: i128, const MAX: i128> Bounded<T, MIN, MAX> {
    const CHECK: () = assert!(
        MIN <= MAX && MIN >= T::REPR_MIN && MAX <= T::REPR_MAX,
        "bounds must be ordered and representable by the value type"
    );

    /// Wire width in bits; zero when the interval holds a single value.
    pub const BITS: u32 = u128::BITS - ((MAX - MIN) as u128).leading_zeros();

    /// Wraps `value` if it lies in the interval.
    #[inline]
    pub fn new(value: T) -> Option<Self> {
        let () = Self::CHECK;
        Self::contains(value).then_some(Self { value })
    }

    /// Lower bound.
    #[inline]
    pub fn lower() -> T {
        T::from_wide(MIN)
    }

    /// Upper bound.
    #[inline]
    pub fn upper() -> T {
        T::from_wide(MAX)
    }

    /// Stored value.
    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    /// Replaces the stored value if `value` lies in the interval; otherwise
    /// leaves it untouched and returns `false`.
    #[inline]
    pub fn set(&mut self, value: T) -> bool {
        let inside = Self::contains(value);
        if inside {
            self.value = value;
        }
        inside
    }

    /// Classifies `value` against the interval.
    pub fn location(value: T) -> Location {
        let wide = value.to_wide();
        if wide < MIN {
            Location::Below
        } else if wide > MAX {
            Location::Above
        } else {
            Location::Inside
        }
    }

    /// Whether `value` lies in the interval.
    #[inline]
    pub fn contains(value: T) -> bool {
        Self::location(value) == Location::Inside
    }
}

impl<T: BoundedRepr, const MIN: i128, const MAX: i128> Default for Bounded<T, MIN, MAX> {
    fn default() -> Self {
        let () = Self::CHECK;
        Self {
            value: T::from_wide(MIN),
        }
    }
}

impl<T: BoundedRepr, const MIN: i128, const MAX: i128> fmt::Display for Bounded<T, MIN, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: BoundedRepr, const MIN: i128, const MAX: i128> Encode for Bounded<T, MIN, MAX> {
    const MIN_BITS: usize = Self::BITS as usize;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        let offset = (self.value.to_wide() - MIN) as u64;
        writer.write_bits(offset, Self::BITS)
    }
}

impl<T: BoundedRepr, const MIN: i128, const MAX: i128> Decode for Bounded<T, MIN, MAX> {
    const MIN_BITS: usize = Self::BITS as usize;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let () = Self::CHECK;
        reader.transaction(|reader| {
            let wide = MIN + reader.read_bits(Self::BITS)? as i128;
            ensure!(
                wide <= MAX,
                OutOfRangeSnafu {
                    reason: "decoded value above its upper bound"
                }
            );
            Ok(Self {
                value: T::from_wide(wide),
            })
        })
    }
}
