//! Error types for bit-level encoding and decoding.

use snafu::Snafu;

/// Error during encoding or decoding.
///
/// Bit counts are reported for cursor operations, byte counts for view
/// copies and blob capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodecError {
    /// Not enough room left in the output buffer.
    #[snafu(display("write overflow: needed {needed} bits, only {available} left"))]
    WriteOverflow {
        /// Bits needed.
        needed: usize,
        /// Bits left.
        available: usize,
    },

    /// Not enough data left in the input buffer.
    #[snafu(display("read underflow: needed {needed} bits, only {available} left"))]
    ReadUnderflow {
        /// Bits needed.
        needed: usize,
        /// Bits left.
        available: usize,
    },

    /// A value fell outside its declared domain.
    #[snafu(display("value out of range: {reason}"))]
    OutOfRange {
        /// What was out of range.
        reason: &'static str,
    },

    /// The operation was called with arguments it cannot honor.
    #[snafu(display("invalid argument: {reason}"))]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// A destination is too small for the data copied into it.
    #[snafu(display("capacity exceeded: needed {needed} bytes, only {capacity} available"))]
    CapacityExceeded {
        /// Bytes needed.
        needed: usize,
        /// Bytes the destination holds.
        capacity: usize,
    },

    /// A tagged aggregate was decoded from a stream carrying another tag.
    #[snafu(display("unexpected discriminant: expected {expected}, found {found}"))]
    UnexpectedKind {
        /// Raw discriminant of the type being decoded.
        expected: u64,
        /// Raw discriminant found on the wire.
        found: u64,
    },
}

/// Result type for codec operations.
pub type Result<T, E = CodecError> = core::result::Result<T, E>;
