//! Non-owning views over caller-supplied byte regions.
//!
//! The cursors never own memory: they operate through these views only. A
//! view's length is fixed at construction and can only shrink afterwards.

use snafu::ensure;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::CodecError;
use crate::error::{CapacityExceededSnafu, InvalidArgumentSnafu, Result};

/// Mutable view over a byte region.
#[derive(Debug)]
pub struct ByteView<'a> {
    bytes: &'a mut [u8],
}

impl<'a> ByteView<'a> {
    /// Creates a view spanning the whole slice.
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the view.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view spans zero bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Shrinks the view to `size` bytes.
    ///
    /// Growing is rejected with [`CodecError::InvalidArgument`](crate::CodecError::InvalidArgument).
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        ensure!(
            size <= self.bytes.len(),
            InvalidArgumentSnafu {
                reason: "a view can only shrink"
            }
        );
        let bytes = core::mem::take(&mut self.bytes);
        self.bytes = &mut bytes[..size];
        Ok(())
    }

    /// Bytes covered by the view.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &*self.bytes
    }

    /// Mutable bytes covered by the view.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }

    /// Consumes the view and returns the underlying slice.
    #[inline]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.bytes
    }

    /// Reborrows the view as read-only.
    #[inline]
    pub fn as_const(&self) -> ByteViewConst<'_> {
        ByteViewConst::new(&*self.bytes)
    }

    /// Copies all of `other` to the front of this view and shrinks this view
    /// to the copied length.
    ///
    /// Nothing is copied if `other` is larger than this view.
    pub fn copy_from(&mut self, other: ByteViewConst<'_>) -> Result<()> {
        let needed = other.size();
        ensure!(
            needed <= self.size(),
            CapacityExceededSnafu {
                needed,
                capacity: self.size()
            }
        );
        self.bytes[..needed].copy_from_slice(other.as_slice());
        self.set_size(needed)
    }

    /// Interprets the front of the view as a `T`.
    pub fn cast<T>(&self) -> Result<&T>
    where
        T: FromBytes + KnownLayout + Immutable,
    {
        T::ref_from_prefix(&*self.bytes)
            .map(|(value, _)| value)
            .map_err(|_| CodecError::InvalidArgument {
                reason: "view too small or misaligned for type",
            })
    }

    /// Interprets the front of the view as a mutable `T`.
    pub fn cast_mut<T>(&mut self) -> Result<&mut T>
    where
        T: FromBytes + IntoBytes + KnownLayout,
    {
        T::mut_from_prefix(&mut *self.bytes)
            .map(|(value, _)| value)
            .map_err(|_| CodecError::InvalidArgument {
                reason: "view too small or misaligned for type",
            })
    }
}

impl<'a> From<&'a mut [u8]> for ByteView<'a> {
    #[inline]
    fn from(bytes: &'a mut [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for ByteView<'a> {
    #[inline]
    fn from(bytes: &'a mut [u8; N]) -> Self {
        Self::new(bytes)
    }
}

/// Read-only view over a byte region.
#[derive(Debug, Clone, Copy)]
pub struct ByteViewConst<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteViewConst<'a> {
    /// Creates a view spanning the whole slice.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the view.
    #[inline]
    pub const fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view spans zero bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Shrinks the view to `size` bytes.
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        ensure!(
            size <= self.bytes.len(),
            InvalidArgumentSnafu {
                reason: "a view can only shrink"
            }
        );
        self.bytes = &self.bytes[..size];
        Ok(())
    }

    /// Bytes covered by the view, with the view's own lifetime.
    #[inline]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Interprets the front of the view as a `T`.
    pub fn cast<T>(&self) -> Result<&'a T>
    where
        T: FromBytes + KnownLayout + Immutable,
    {
        T::ref_from_prefix(self.bytes)
            .map(|(value, _)| value)
            .map_err(|_| CodecError::InvalidArgument {
                reason: "view too small or misaligned for type",
            })
    }
}

impl<'a> From<&'a [u8]> for ByteViewConst<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteViewConst<'a> {
    #[inline]
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a ByteView<'_>> for ByteViewConst<'a> {
    #[inline]
    fn from(view: &'a ByteView<'_>) -> Self {
        view.as_const()
    }
}
