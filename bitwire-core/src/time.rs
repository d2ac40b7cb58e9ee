//! Durations as tick counts of a unit fixed by the field's type.
//!
//! Only the count travels on the wire. Both ends must agree on the unit,
//! which is why it lives in the type rather than in the encoding.

use core::fmt;
use core::marker::PhantomData;
use core::time::Duration;

use snafu::ensure;

use crate::error::{CodecError, OutOfRangeSnafu, Result};
use crate::reader::BitReader;
use crate::traits::{Decode, Encode};
use crate::writer::BitWriter;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Length of one tick.
pub trait TimeUnit {
    /// Nanoseconds in one tick.
    const NANOS_PER_TICK: u64;

    /// Unit suffix used by `Display`.
    const SUFFIX: &'static str;
}

macro_rules! time_units {
    ($($(#[$doc:meta])* $name:ident = $nanos:expr, $suffix:literal;)+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub enum $name {}

            impl TimeUnit for $name {
                const NANOS_PER_TICK: u64 = $nanos;
                const SUFFIX: &'static str = $suffix;
            }
        )+
    };
}

time_units! {
    /// Nanosecond ticks.
    Nanos = 1, "ns";
    /// Microsecond ticks.
    Micros = 1_000, "us";
    /// Millisecond ticks.
    Millis = 1_000_000, "ms";
    /// Second ticks.
    Seconds = 1_000_000_000, "s";
}

/// A signed whole number of `U` ticks, encoded as 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks<U: TimeUnit> {
    count: i64,
    unit: PhantomData<U>,
}

impl<U: TimeUnit> Ticks<U> {
    /// `count` ticks.
    #[inline]
    pub const fn new(count: i64) -> Self {
        Self {
            count,
            unit: PhantomData,
        }
    }

    /// Number of ticks.
    #[inline]
    pub const fn count(&self) -> i64 {
        self.count
    }

    /// Converts a duration, truncating toward zero.
    pub fn from_duration(duration: Duration) -> Result<Self> {
        let ticks = duration.as_nanos() / U::NANOS_PER_TICK as u128;
        let count = i64::try_from(ticks).map_err(|_| CodecError::OutOfRange {
            reason: "duration overflows a 64-bit tick count",
        })?;
        Ok(Self::new(count))
    }

    /// Converts to a duration. Negative counts have none.
    pub fn to_duration(&self) -> Result<Duration> {
        ensure!(
            self.count >= 0,
            OutOfRangeSnafu {
                reason: "negative tick count"
            }
        );
        let nanos = self.count as u128 * U::NANOS_PER_TICK as u128;
        Ok(Duration::new(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u32,
        ))
    }
}

impl<U: TimeUnit> Default for Ticks<U> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<U: TimeUnit> fmt::Display for Ticks<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, U::SUFFIX)
    }
}

impl<U: TimeUnit> Encode for Ticks<U> {
    const MIN_BITS: usize = 64;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.write_uint(self.count as u64, u64::BITS)
    }
}

impl<U: TimeUnit> Decode for Ticks<U> {
    const MIN_BITS: usize = 64;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let raw: u64 = reader.read_uint(u64::BITS)?;
        Ok(Self::new(raw as i64))
    }
}

/// A fractional number of `U` ticks, encoded as the 64-bit IEEE pattern.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FracTicks<U: TimeUnit> {
    count: f64,
    unit: PhantomData<U>,
}

impl<U: TimeUnit> FracTicks<U> {
    /// `count` ticks.
    #[inline]
    pub const fn new(count: f64) -> Self {
        Self {
            count,
            unit: PhantomData,
        }
    }

    /// Number of ticks.
    #[inline]
    pub const fn count(&self) -> f64 {
        self.count
    }

    /// Converts a duration.
    pub fn from_duration(duration: Duration) -> Self {
        Self::new(duration.as_nanos() as f64 / U::NANOS_PER_TICK as f64)
    }

    /// Converts to a duration. Negative, infinite and NaN counts have none.
    pub fn to_duration(&self) -> Result<Duration> {
        let secs = self.count * U::NANOS_PER_TICK as f64 / NANOS_PER_SEC as f64;
        Duration::try_from_secs_f64(secs).map_err(|_| CodecError::OutOfRange {
            reason: "tick count is not a representable duration",
        })
    }
}

impl<U: TimeUnit> Default for FracTicks<U> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<U: TimeUnit> fmt::Display for FracTicks<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, U::SUFFIX)
    }
}

impl<U: TimeUnit> Encode for FracTicks<U> {
    const MIN_BITS: usize = 64;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.write_uint(self.count.to_bits(), u64::BITS)
    }
}

impl<U: TimeUnit> Decode for FracTicks<U> {
    const MIN_BITS: usize = 64;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        let raw: u64 = reader.read_uint(u64::BITS)?;
        Ok(Self::new(f64::from_bits(raw)))
    }
}

// `Duration` travels as whole nanoseconds.
impl Encode for Duration {
    const MIN_BITS: usize = 64;

    fn encode(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        Ticks::<Nanos>::from_duration(*self)?.encode(writer)
    }
}

impl Decode for Duration {
    const MIN_BITS: usize = 64;

    fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.transaction(|reader| Ticks::<Nanos>::decode(reader)?.to_duration())
    }
}
