use crate::{Range, TypedRange};
use basis_except::Result;

/// Anything a content operation accepts as its second buffer.
///
/// Pointer pairs are validated as by [`Range::make`].
pub trait IntoRange {
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`](basis_except::ErrorKind::InvalidMemoryRange)
    /// for an invalid `(begin, end)` pair.
    fn into_range(self) -> Result<Range>;
}

impl IntoRange for Range {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(self)
    }
}

impl IntoRange for &Range {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(*self)
    }
}

impl IntoRange for &TypedRange {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(self.range())
    }
}

impl IntoRange for (*mut u8, *mut u8) {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Range::make(self.0, self.1)
    }
}

impl IntoRange for (*const u8, *const u8) {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Range::make(self.0.cast_mut(), self.1.cast_mut())
    }
}

impl IntoRange for &[u8] {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(Range::from_slice(self))
    }
}

impl IntoRange for &mut [u8] {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(Range::from_mut_slice(self))
    }
}

impl<const N: usize> IntoRange for &[u8; N] {
    #[inline]
    fn into_range(self) -> Result<Range> {
        Ok(Range::from_slice(self))
    }
}
