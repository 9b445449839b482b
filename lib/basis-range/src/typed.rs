use crate::Range;
use basis_core::Scalar;
use basis_except::{ErrorKind, Result, ensure, exception, raise};
use core::fmt;

/// A [`Range`] divided into elements of `element_size` bytes.
///
/// Invariants: `element_size > 0` and the byte count is a multiple of it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TypedRange {
    range: Range,
    element_size: usize,
}

impl TypedRange {
    /// Wrap without validating; used for foreign records and by owners that
    /// maintain the invariants themselves.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(range: Range, element_size: usize) -> Self {
        Self {
            range,
            element_size,
        }
    }

    /// An uninitialized range of `element_size`-byte elements.
    ///
    /// # Errors
    /// [`ErrorKind::ZeroElementSize`] if `element_size == 0`.
    pub fn empty(element_size: usize) -> Result<Self> {
        Self::from_range(Range::UNINIT, element_size)
    }

    /// # Errors
    /// * [`ErrorKind::InvalidMemoryRange`] for an invalid pair
    /// * [`ErrorKind::ZeroElementSize`] if `element_size == 0`
    /// * [`ErrorKind::SizeNotMultipleOfElementSize`] if the byte count does
    ///   not divide evenly
    pub fn make(begin: *mut u8, end: *mut u8, element_size: usize) -> Result<Self> {
        Self::from_range(Range::make(begin, end)?, element_size)
    }

    /// # Errors
    /// As [`make`](Self::make).
    pub fn from_range(range: Range, element_size: usize) -> Result<Self> {
        let typed = Self::from_raw_parts(range, element_size);
        typed.validate()?;
        Ok(typed)
    }

    /// `count` elements starting at `begin`.
    ///
    /// # Errors
    /// * [`ErrorKind::ZeroElementSize`] if `element_size == 0`
    /// * [`ErrorKind::ExceedsMaxSize`] if `count * element_size` overflows
    /// * as [`Range::from_base_size`]
    pub fn from_base_count(begin: *mut u8, count: usize, element_size: usize) -> Result<Self> {
        ensure!(element_size > 0, ErrorKind::ZeroElementSize);
        let Some(bytes) = count.checked_mul(element_size) else {
            raise!(
                ErrorKind::ExceedsMaxSize,
                format!("{count} elements of {element_size} bytes")
            );
        };
        Self::from_range(Range::from_base_size(begin, bytes)?, element_size)
    }

    /// The elements of `values`, with `T::SIZE`-byte elements.
    #[must_use]
    pub fn from_slice<T: Scalar>(values: &[T]) -> Self {
        let span = values.as_ptr_range();
        let begin = span.start.cast::<u8>().cast_mut();
        let end = span.end.cast::<u8>().cast_mut();
        Self::from_raw_parts(Range::from_raw_parts(begin, end), T::SIZE)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.element_size > 0, ErrorKind::ZeroElementSize);
        let bytes = self.range.size()?;
        ensure!(
            bytes % self.element_size == 0,
            ErrorKind::SizeNotMultipleOfElementSize,
            format!("{bytes} bytes, element size {}", self.element_size)
        );
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range {
        self.range
    }

    #[inline]
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> *mut u8 {
        self.range.begin()
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> *mut u8 {
        self.range.end()
    }

    /// Element count.
    ///
    /// # Errors
    /// Any invariant violation, as in [`make`](Self::make).
    pub fn size(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.range.diff() / self.element_size)
    }

    /// Byte count.
    ///
    /// # Errors
    /// Any invariant violation, as in [`make`](Self::make).
    pub fn byte_size(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.range.diff())
    }

    /// Holds no elements (empty or uninitialized).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_valid() && self.range.diff() == 0
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Byte offset of element `index`.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn offset_by_index(&self, index: usize) -> Result<usize> {
        let count = self.size()?;
        ensure!(
            index < count,
            ErrorKind::OutOfRange,
            format!("index {index} >= size {count}")
        );
        Ok(index * self.element_size)
    }

    /// First byte of element `index`.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn at_from_front(&self, index: usize) -> Result<*mut u8> {
        let offset = self.offset_by_index(index)?;
        Ok(self.range.begin().wrapping_add(offset))
    }

    /// First byte of element `index`, counted from the last element.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn at_from_back(&self, index: usize) -> Result<*mut u8> {
        let count = self.size()?;
        ensure!(
            index < count,
            ErrorKind::OutOfRange,
            format!("index {index} >= size {count}")
        );
        self.at_from_front(count - 1 - index)
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn at(&self, index: usize, reversed: bool) -> Result<*mut u8> {
        if reversed {
            self.at_from_back(index)
        } else {
            self.at_from_front(index)
        }
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if there are no elements.
    pub fn front(&self) -> Result<*mut u8> {
        self.at_from_front(0)
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if there are no elements.
    pub fn back(&self) -> Result<*mut u8> {
        self.at_from_back(0)
    }

    /// The bytes of element `index`.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn element(&self, index: usize) -> Result<Range> {
        let offset = self.offset_by_index(index)?;
        self.range.slice(offset, self.element_size)
    }

    #[must_use]
    pub const fn is_equal_element_size_to(&self, element_size: usize) -> bool {
        self.element_size == element_size
    }

    #[must_use]
    pub const fn is_equal_element_size(&self, other: &Self) -> bool {
        self.element_size == other.element_size
    }

    /// Same element size, same element count, byte-equal content.
    ///
    /// # Errors
    /// Any invariant violation of either range.
    ///
    /// # Safety
    /// Both ranges must be valid for reads.
    pub unsafe fn is_equal(&self, other: &Self) -> Result<bool> {
        if !self.is_equal_element_size(other) || self.size()? != other.size()? {
            return Ok(false);
        }
        // Safety: forwarded from the caller.
        Ok(unsafe { self.range.compare(other.range)? }.is_null())
    }

    /// # Errors
    /// [`ErrorKind::DifferentElementSize`] if the element sizes differ; both
    /// ranges are left unchanged.
    pub fn swap(&mut self, other: &mut Self) -> Result<()> {
        self.require_same_element_size(other)?;
        core::mem::swap(self, other);
        Ok(())
    }

    /// Take `other`'s range, leaving `other` uninitialized.
    ///
    /// # Errors
    /// [`ErrorKind::DifferentElementSize`] if the element sizes differ.
    pub fn exchange(&mut self, other: &mut Self) -> Result<()> {
        self.require_same_element_size(other)?;
        self.range.exchange(&mut other.range);
        Ok(())
    }

    fn require_same_element_size(&self, other: &Self) -> Result<()> {
        ensure!(
            self.is_equal_element_size(other),
            ErrorKind::DifferentElementSize,
            format!("{} != {}", self.element_size, other.element_size)
        );
        Ok(())
    }

    fn check_scalar<T: Scalar>(&self) -> Result<()> {
        ensure!(
            self.element_size == T::SIZE,
            ErrorKind::DifferentElementSize,
            format!("element size {} != {}", self.element_size, T::SIZE)
        );
        Ok(())
    }

    /// Read element `index` as a `T`.
    ///
    /// # Errors
    /// * [`ErrorKind::DifferentElementSize`] unless `element_size == T::SIZE`
    /// * [`ErrorKind::OutOfRange`] if `index >= size`
    ///
    /// # Safety
    /// The range must be valid for reads.
    pub unsafe fn get<T: Scalar>(&self, index: usize) -> Result<T> {
        self.check_scalar::<T>()?;
        // Safety: forwarded from the caller.
        let bytes = unsafe { self.element(index)?.as_slice()? };
        T::from_ne_slice(bytes).ok_or_else(|| exception!(ErrorKind::DifferentElementSize))
    }

    /// Write `value` into element `index`.
    ///
    /// # Errors
    /// As [`get`](Self::get).
    ///
    /// # Safety
    /// The range must be valid for writes.
    pub unsafe fn put<T: Scalar>(&self, index: usize, value: T) -> Result<()> {
        self.check_scalar::<T>()?;
        // Safety: forwarded from the caller.
        let bytes = unsafe { self.element(index)?.as_mut_slice()? };
        ensure!(value.write_ne_slice(bytes), ErrorKind::DifferentElementSize);
        Ok(())
    }
}

impl fmt::Display for TypedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.range, self.element_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_checks_element_invariants() {
        let buf = [0_u8; 10];
        let r = Range::from_slice(&buf);
        assert!(TypedRange::from_range(r, 5).is_ok());
        assert_eq!(
            TypedRange::from_range(r, 4).unwrap_err().kind(),
            ErrorKind::SizeNotMultipleOfElementSize
        );
        assert_eq!(
            TypedRange::from_range(r, 0).unwrap_err().kind(),
            ErrorKind::ZeroElementSize
        );
    }

    #[test]
    fn element_indexing() {
        let values = [10_u32, 20, 30];
        let t = TypedRange::from_slice(&values);
        assert_eq!(t.size(), Ok(3));
        assert_eq!(t.byte_size(), Ok(12));
        assert_eq!(t.offset_by_index(2), Ok(8));
        assert_eq!(t.at_from_back(0), t.at_from_front(2));
        assert_eq!(t.element(1).unwrap().size(), Ok(4));
        assert_eq!(t.offset_by_index(3).unwrap_err().kind(), ErrorKind::OutOfRange);
        unsafe {
            assert_eq!(t.get::<u32>(1), Ok(20));
            assert_eq!(
                t.get::<u16>(0).unwrap_err().kind(),
                ErrorKind::DifferentElementSize
            );
        }
    }

    #[test]
    fn put_writes_native_endian() {
        let mut values = [0_u16; 2];
        let t = TypedRange::from_base_count(values.as_mut_ptr().cast(), 2, 2).unwrap();
        unsafe { t.put(1, 0xBEEF_u16) }.unwrap();
        assert_eq!(values, [0, 0xBEEF]);
    }

    #[test]
    fn swap_requires_equal_element_size() {
        let a_buf = [0_u8; 4];
        let b_buf = [0_u8; 6];
        let mut a = TypedRange::from_range(Range::from_slice(&a_buf), 2).unwrap();
        let mut b = TypedRange::from_range(Range::from_slice(&b_buf), 3).unwrap();
        let (a0, b0) = (a, b);
        assert_eq!(a.swap(&mut b).unwrap_err().kind(), ErrorKind::DifferentElementSize);
        assert_eq!((a, b), (a0, b0));

        let mut c = TypedRange::from_range(Range::from_slice(&b_buf), 2).unwrap();
        a.exchange(&mut c).unwrap();
        assert_eq!(a.size(), Ok(3));
        assert!(c.range().is_uninit());
        assert_eq!(c.element_size(), 2);
    }

    #[test]
    fn equality_compares_content() {
        let x = [1_u16, 2, 3];
        let y = [1_u16, 2, 3];
        let z = [1_u16, 2, 4];
        let (tx, ty, tz) = (
            TypedRange::from_slice(&x),
            TypedRange::from_slice(&y),
            TypedRange::from_slice(&z),
        );
        unsafe {
            assert_eq!(tx.is_equal(&ty), Ok(true));
            assert_eq!(tx.is_equal(&tz), Ok(false));
        }
        let bytes = [0_u8; 6];
        let tb = TypedRange::from_range(Range::from_slice(&bytes), 1).unwrap();
        assert!(!tx.is_equal_element_size(&tb));
        assert!(tx.is_equal_element_size_to(2));
    }
}
