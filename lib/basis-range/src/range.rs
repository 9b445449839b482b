use crate::{IntoRange, RangeState};
use basis_core::{Address, interval};
use basis_except::{ErrorKind, Result, ensure, exception, raise};
use basis_mem::sized;
use core::{fmt, ptr, slice};

/// An untyped byte range `[begin, end)`.
///
/// A `Range` is a plain pair of addresses; it neither owns nor borrows the
/// bytes it describes. Construction through [`make`](Self::make) and the other
/// checked constructors guarantees a valid [`RangeState`];
/// [`from_raw_parts`](Self::from_raw_parts) accepts any pair so foreign
/// records can be inspected.
///
/// Reading or writing the described bytes is `unsafe`: the caller vouches that
/// the range covers live memory.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    begin: *mut u8,
    end: *mut u8,
}

/// Byte operation in size-pair form, as exported by [`basis_mem::sized`].
type Primitive = unsafe fn(*mut u8, usize, *const u8, usize) -> Result<*mut u8>;
type Probe = unsafe fn(*const u8, usize, *const u8, usize) -> Result<*const u8>;

impl Range {
    /// The uninitialized range: both ends null.
    pub const UNINIT: Self = Self {
        begin: ptr::null_mut(),
        end: ptr::null_mut(),
    };

    /// Wrap a pair without validating it.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(begin: *mut u8, end: *mut u8) -> Self {
        Self { begin, end }
    }

    /// A validated range.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] unless the pair classifies as one of
    /// the valid states.
    pub fn make(begin: *mut u8, end: *mut u8) -> Result<Self> {
        let range = Self::from_raw_parts(begin, end);
        range.validate()?;
        Ok(range)
    }

    /// The range of `size` bytes starting at `begin`.
    ///
    /// A null `begin` with `size == 0` yields [`UNINIT`](Self::UNINIT).
    ///
    /// # Errors
    /// * [`ErrorKind::NullPointer`] if `begin` is null and `size > 0`
    /// * [`ErrorKind::Overflow`] if `begin + size` wraps the address space
    pub fn from_base_size(begin: *mut u8, size: usize) -> Result<Self> {
        if begin.is_null() {
            ensure!(size == 0, ErrorKind::NullPointer, "begin");
            return Ok(Self::UNINIT);
        }
        if Address::from_ptr(begin).checked_add(size).is_none() {
            raise!(ErrorKind::Overflow, format!("{begin:p} + {size}"));
        }
        Ok(Self::from_raw_parts(begin, begin.wrapping_add(size)))
    }

    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::UNINIT
    }

    /// The bytes of `bytes`. An empty slice gives an [`Empty`](RangeState::Empty)
    /// range.
    #[must_use]
    pub const fn from_slice(bytes: &[u8]) -> Self {
        let span = bytes.as_ptr_range();
        Self::from_raw_parts(span.start.cast_mut(), span.end.cast_mut())
    }

    #[must_use]
    pub const fn from_mut_slice(bytes: &mut [u8]) -> Self {
        let span = bytes.as_mut_ptr_range();
        Self::from_raw_parts(span.start, span.end)
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> *mut u8 {
        self.begin
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> *mut u8 {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> RangeState {
        RangeState::classify(self.begin, self.end)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let state = self.state();
        ensure!(state.is_valid(), ErrorKind::InvalidMemoryRange, state.to_string());
        Ok(())
    }

    /// Byte count.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if the range is invalid.
    pub fn size(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.diff())
    }

    /// Unsigned `end - begin`, wrapping; meaningful only for valid ranges.
    #[inline]
    #[must_use]
    pub fn diff(&self) -> usize {
        self.end.addr().wrapping_sub(self.begin.addr())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state() == RangeState::Empty
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.state() == RangeState::HasData
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state().is_valid()
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    #[must_use]
    pub fn is_uninit(&self) -> bool {
        self.state() == RangeState::Uninitialized
    }

    /// `begin <= p < end`.
    #[must_use]
    pub fn contains_ptr(&self, p: *const u8) -> bool {
        self.has_data() && interval::in_half_open(&p.addr(), &self.begin.addr(), &self.end.addr())
    }

    /// `begin <= b` and `e <= end`.
    ///
    /// Only [`Empty`](RangeState::Empty) and [`HasData`](RangeState::HasData)
    /// ranges take part: an uninitialized range describes no memory, so it
    /// neither contains nor is contained, not even by another uninitialized
    /// range. An invalid pair on either side also gives `false`.
    #[must_use]
    pub fn contains_range(&self, b: *const u8, e: *const u8) -> bool {
        let other = RangeState::classify(b, e);
        if !matches!(self.state(), RangeState::Empty | RangeState::HasData)
            || !matches!(other, RangeState::Empty | RangeState::HasData)
        {
            return false;
        }
        let (lo, hi) = (self.begin.addr(), self.end.addr());
        interval::in_closed(&b.addr(), &lo, &hi) && interval::in_closed(&e.addr(), &lo, &hi)
    }

    /// [`contains_range`](Self::contains_range) for `other`'s pair.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_range(other.begin, other.end)
    }

    /// Whether `begin` is a multiple of `alignment`.
    ///
    /// # Errors
    /// [`ErrorKind::NotPowerOfTwo`] unless `alignment` is a power of two.
    pub fn is_aligned(&self, alignment: usize) -> Result<bool> {
        Address::from_ptr(self.begin)
            .is_aligned(alignment)
            .ok_or_else(|| exception!(ErrorKind::NotPowerOfTwo, format!("alignment {alignment}")))
    }

    /// Whether the byte count is a multiple of `k`.
    ///
    /// # Errors
    /// * [`ErrorKind::ZeroElementSize`] if `k == 0`
    /// * [`ErrorKind::InvalidMemoryRange`] if the range is invalid
    pub fn is_multiple_of_size(&self, k: usize) -> Result<bool> {
        ensure!(k > 0, ErrorKind::ZeroElementSize);
        Ok(self.size()? % k == 0)
    }

    /// Address of byte `offset`, counted from `begin`.
    ///
    /// # Errors
    /// * [`ErrorKind::OutOfRange`] if `offset >= size`
    /// * [`ErrorKind::InvalidMemoryRange`] if the range is invalid
    pub fn at_from_front(&self, offset: usize) -> Result<*mut u8> {
        let size = self.size()?;
        ensure!(
            offset < size,
            ErrorKind::OutOfRange,
            format!("offset {offset} >= size {size}")
        );
        Ok(self.begin.wrapping_add(offset))
    }

    /// Address of byte `offset`, counted back from `end - 1`.
    ///
    /// # Errors
    /// As [`at_from_front`](Self::at_from_front).
    pub fn at_from_back(&self, offset: usize) -> Result<*mut u8> {
        let size = self.size()?;
        ensure!(
            offset < size,
            ErrorKind::OutOfRange,
            format!("offset {offset} >= size {size}")
        );
        Ok(self.begin.wrapping_add(size - 1 - offset))
    }

    /// # Errors
    /// As [`at_from_front`](Self::at_from_front).
    pub fn at(&self, offset: usize, reversed: bool) -> Result<*mut u8> {
        if reversed {
            self.at_from_back(offset)
        } else {
            self.at_from_front(offset)
        }
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the range holds no bytes.
    pub fn front(&self) -> Result<*mut u8> {
        self.at(0, false)
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the range holds no bytes.
    pub fn back(&self) -> Result<*mut u8> {
        self.at(0, true)
    }

    #[must_use]
    pub fn is_equal_begin(&self, other: &Self) -> bool {
        self.begin == other.begin
    }

    #[must_use]
    pub fn is_equal_end(&self, other: &Self) -> bool {
        self.end == other.end
    }

    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    pub const fn clear(&mut self) {
        *self = Self::UNINIT;
    }

    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if the pair is invalid; `self` is
    /// left unchanged.
    pub fn assign(&mut self, begin: *mut u8, end: *mut u8) -> Result<()> {
        *self = Self::make(begin, end)?;
        Ok(())
    }

    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if `other` is invalid; `self` is
    /// left unchanged.
    pub fn assign_range(&mut self, other: &Self) -> Result<()> {
        other.validate()?;
        *self = *other;
        Ok(())
    }

    /// # Errors
    /// As [`from_base_size`](Self::from_base_size); `self` is left unchanged.
    pub fn assign_by_size(&mut self, begin: *mut u8, size: usize) -> Result<()> {
        *self = Self::from_base_size(begin, size)?;
        Ok(())
    }

    pub const fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Take `other`'s pair, leaving `other` uninitialized.
    pub const fn exchange(&mut self, other: &mut Self) {
        self.clear();
        self.swap(other);
    }

    /// The subrange `[begin + offset, begin + offset + size)`.
    ///
    /// # Errors
    /// * [`ErrorKind::OutOfRange`] if the subrange escapes `self`
    /// * [`ErrorKind::InvalidMemoryRange`] if `self` is invalid
    pub fn slice(&self, offset: usize, size: usize) -> Result<Self> {
        let total = self.size()?;
        let Some(last) = offset.checked_add(size).filter(|&last| last <= total) else {
            raise!(
                ErrorKind::OutOfRange,
                format!("slice {offset}+{size} exceeds size {total}")
            );
        };
        Ok(Self::from_raw_parts(
            self.begin.wrapping_add(offset),
            self.begin.wrapping_add(last),
        ))
    }

    fn parts(&self) -> Result<(*mut u8, usize)> {
        Ok((self.begin, self.size()?))
    }

    /// # Safety
    /// Both ranges must describe live memory; `op` decides what overlap is
    /// permitted.
    unsafe fn apply(&self, src: impl IntoRange, op: Primitive) -> Result<*mut u8> {
        let (dst, dst_size) = self.parts()?;
        let (src, src_size) = src.into_range()?.parts()?;
        if dst_size.min(src_size) == 0 {
            return Ok(dst);
        }
        // Safety: forwarded from the caller; both ranges are valid and non-empty.
        unsafe { op(dst, dst_size, src.cast_const(), src_size) }
    }

    /// # Safety
    /// Both ranges must describe live memory.
    unsafe fn probe(&self, other: impl IntoRange, op: Probe) -> Result<*const u8> {
        let (lhs, lhs_size) = self.parts()?;
        let (rhs, rhs_size) = other.into_range()?.parts()?;
        if lhs_size.min(rhs_size) == 0 {
            return Ok(ptr::null());
        }
        // Safety: forwarded from the caller; both ranges are valid and non-empty.
        unsafe { op(lhs.cast_const(), lhs_size, rhs.cast_const(), rhs_size) }
    }

    /// # Safety
    /// Both ranges must describe live memory.
    unsafe fn search(&self, needle: impl IntoRange, op: Probe) -> Result<*const u8> {
        let (lhs, lhs_size) = self.parts()?;
        let (rhs, rhs_size) = needle.into_range()?.parts()?;
        if rhs_size == 0 {
            return Ok(lhs.cast_const());
        }
        if lhs_size < rhs_size {
            return Ok(ptr::null());
        }
        // Safety: forwarded from the caller; both ranges are valid and non-empty.
        unsafe { op(lhs.cast_const(), lhs_size, rhs.cast_const(), rhs_size) }
    }

    /// Fill every byte with `value`. Returns `end`.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if the range is invalid.
    ///
    /// # Safety
    /// The range must be valid for writes.
    pub unsafe fn set(&self, value: u8) -> Result<*mut u8> {
        let (dst, size) = self.parts()?;
        if size == 0 {
            return Ok(dst);
        }
        // Safety: forwarded from the caller.
        unsafe { sized::set(dst, size, value) }
    }

    /// Write one byte at `offset` (from the back if `reversed`).
    ///
    /// # Errors
    /// As [`at`](Self::at).
    ///
    /// # Safety
    /// The range must be valid for writes.
    pub unsafe fn set_value(&self, offset: usize, reversed: bool, value: u8) -> Result<()> {
        let p = self.at(offset, reversed)?;
        // Safety: `p` lies inside the range.
        unsafe { p.write(value) };
        Ok(())
    }

    /// Forward copy from `src`; see [`sized::copy`]. A zero effective count
    /// returns `begin` without touching memory.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// `self` must be valid for writes, `src` for reads, without overlap.
    pub unsafe fn copy(&self, src: impl IntoRange) -> Result<*mut u8> {
        // Safety: forwarded from the caller.
        unsafe { self.apply(src, sized::copy) }
    }

    /// Reversed-order copy from `src`; see [`sized::copy_rev`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// `self` must be valid for writes, `src` for reads, without overlap.
    pub unsafe fn copy_rev(&self, src: impl IntoRange) -> Result<*mut u8> {
        // Safety: forwarded from the caller.
        unsafe { self.apply(src, sized::copy_rev) }
    }

    /// Last-byte-first copy from `src`; see [`sized::rcopy`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// `self` must be valid for writes, `src` for reads; overlap only with
    /// `self` above `src`.
    pub unsafe fn rcopy(&self, src: impl IntoRange) -> Result<*mut u8> {
        // Safety: forwarded from the caller.
        unsafe { self.apply(src, sized::rcopy) }
    }

    /// Overlap-safe copy from `src`; see [`sized::move_bytes`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// `self` must be valid for writes and `src` for reads.
    pub unsafe fn move_bytes(&self, src: impl IntoRange) -> Result<*mut u8> {
        // Safety: forwarded from the caller.
        unsafe { self.apply(src, sized::move_bytes) }
    }

    /// Tile `pattern` across the range; see [`sized::set_pattern`]. Returns
    /// null if either side is empty.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// `self` must be valid for writes, `pattern` for reads, without overlap.
    pub unsafe fn set_pattern(&self, pattern: impl IntoRange) -> Result<*mut u8> {
        let (dst, dst_size) = self.parts()?;
        let (src, src_size) = pattern.into_range()?.parts()?;
        if dst_size == 0 || src_size == 0 {
            return Ok(ptr::null_mut());
        }
        // Safety: forwarded from the caller.
        unsafe { sized::set_pattern(dst, dst_size, src.cast_const(), src_size) }
    }

    /// First differing byte; see [`sized::compare`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// Both ranges must be valid for reads.
    pub unsafe fn compare(&self, other: impl IntoRange) -> Result<*const u8> {
        // Safety: forwarded from the caller.
        unsafe { self.probe(other, sized::compare) }
    }

    /// Last differing byte; see [`sized::rcompare`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// Both ranges must be valid for reads.
    pub unsafe fn rcompare(&self, other: impl IntoRange) -> Result<*const u8> {
        // Safety: forwarded from the caller.
        unsafe { self.probe(other, sized::rcompare) }
    }

    /// First occurrence of `needle`; see [`sized::find`] for the boundary
    /// policy.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// Both ranges must be valid for reads.
    pub unsafe fn find(&self, needle: impl IntoRange) -> Result<*const u8> {
        // Safety: forwarded from the caller.
        unsafe { self.search(needle, sized::find) }
    }

    /// Last occurrence of `needle`; see [`sized::rfind`].
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if either range is invalid.
    ///
    /// # Safety
    /// Both ranges must be valid for reads.
    pub unsafe fn rfind(&self, needle: impl IntoRange) -> Result<*const u8> {
        // Safety: forwarded from the caller.
        unsafe { self.search(needle, sized::rfind) }
    }

    /// View the bytes as a slice. An uninitialized range is the empty slice.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if the range is invalid.
    ///
    /// # Safety
    /// The bytes must be live and not mutated for `'a`.
    pub unsafe fn as_slice<'a>(self) -> Result<&'a [u8]> {
        let (begin, size) = self.parts()?;
        if begin.is_null() {
            return Ok(&[]);
        }
        // Safety: forwarded from the caller.
        Ok(unsafe { slice::from_raw_parts(begin, size) })
    }

    /// # Errors
    /// [`ErrorKind::InvalidMemoryRange`] if the range is invalid.
    ///
    /// # Safety
    /// The bytes must be live and not otherwise accessed for `'a`.
    pub unsafe fn as_mut_slice<'a>(self) -> Result<&'a mut [u8]> {
        let (begin, size) = self.parts()?;
        if begin.is_null() {
            return Ok(&mut []);
        }
        // Safety: forwarded from the caller.
        Ok(unsafe { slice::from_raw_parts_mut(begin, size) })
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::UNINIT
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:p}, {:p})", self.begin, self.end)
    }
}

impl From<&[u8]> for Range {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl From<&mut [u8]> for Range {
    fn from(bytes: &mut [u8]) -> Self {
        Self::from_mut_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_rejects_invalid_pairs() {
        let buf = [0_u8; 4];
        let p = buf.as_ptr().cast_mut();
        assert!(Range::make(p, p.wrapping_add(4)).is_ok());
        let err = Range::make(p.wrapping_add(4), p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMemoryRange);
        let err = Range::make(ptr::null_mut(), p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMemoryRange);
        assert!(Range::make(ptr::null_mut(), ptr::null_mut()).unwrap().is_uninit());
    }

    #[test]
    fn from_base_size_handles_null_and_overflow() {
        assert_eq!(Range::from_base_size(ptr::null_mut(), 0), Ok(Range::UNINIT));
        assert_eq!(
            Range::from_base_size(ptr::null_mut(), 1).unwrap_err().kind(),
            ErrorKind::NullPointer
        );
        let high = ptr::without_provenance_mut::<u8>(usize::MAX - 1);
        assert_eq!(
            Range::from_base_size(high, 4).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn indexing_from_both_ends() {
        let buf = *b"abcd";
        let r = Range::from_slice(&buf);
        assert_eq!(r.size(), Ok(4));
        unsafe {
            assert_eq!(*r.front().unwrap(), b'a');
            assert_eq!(*r.back().unwrap(), b'd');
            assert_eq!(*r.at(1, true).unwrap(), b'c');
        }
        assert_eq!(r.at_from_front(4).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(Range::UNINIT.front().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn containment() {
        let buf = [0_u8; 8];
        let r = Range::from_slice(&buf);
        let inner = r.slice(2, 3).unwrap();
        assert!(r.contains(&inner));
        assert!(!inner.contains(&r));
        assert!(r.contains_ptr(buf.as_ptr().wrapping_add(7)));
        assert!(!r.contains_ptr(buf.as_ptr().wrapping_add(8)));
        assert!(!Range::UNINIT.contains(&Range::UNINIT));
    }

    #[test]
    fn containment_needs_initialized_ranges() {
        let buf = [0_u8; 4];
        let r = Range::from_slice(&buf);
        let end = r.slice(4, 0).unwrap();
        assert!(end.is_empty());
        assert!(r.contains(&end));
        assert!(end.contains(&end));

        assert!(!Range::UNINIT.contains(&Range::UNINIT));
        assert!(!r.contains(&Range::UNINIT));
        assert!(!Range::UNINIT.contains(&r));
        assert!(!Range::UNINIT.contains_range(ptr::null(), ptr::null()));

        let p = buf.as_ptr();
        assert!(!r.contains_range(p.wrapping_add(3), p.wrapping_add(1)));
    }

    #[test]
    fn alignment_requires_power_of_two() {
        let r = Range::from_raw_parts(
            ptr::without_provenance_mut(0x1000),
            ptr::without_provenance_mut(0x1010),
        );
        assert_eq!(r.is_aligned(16), Ok(true));
        assert_eq!(r.is_aligned(0x2000), Ok(false));
        assert_eq!(r.is_aligned(3).unwrap_err().kind(), ErrorKind::NotPowerOfTwo);
        assert_eq!(r.is_multiple_of_size(8), Ok(true));
        assert_eq!(r.is_multiple_of_size(3), Ok(false));
        assert_eq!(
            r.is_multiple_of_size(0).unwrap_err().kind(),
            ErrorKind::ZeroElementSize
        );
    }

    #[test]
    fn exchange_takes_and_clears() {
        let buf = [0_u8; 2];
        let mut a = Range::from_slice(&buf[..1]);
        let mut b = Range::from_slice(&buf);
        a.exchange(&mut b);
        assert_eq!(a, Range::from_slice(&buf));
        assert!(b.is_uninit());
    }

    #[test]
    fn failed_assign_leaves_range_unchanged() {
        let buf = [0_u8; 4];
        let mut r = Range::from_slice(&buf);
        let before = r;
        let p = buf.as_ptr().cast_mut();
        assert!(r.assign(p.wrapping_add(3), p).is_err());
        assert_eq!(r, before);
    }

    #[test]
    fn content_ops_honor_both_bounds() {
        let mut dst = [0_u8; 4];
        let r = Range::from_mut_slice(&mut dst);
        unsafe {
            let end = r.copy(&b"xyz123"[..]).unwrap();
            assert_eq!(end, r.end());
            r.set_value(0, true, b'!').unwrap();
        }
        assert_eq!(&dst, b"xyz!");
    }

    #[test]
    fn zero_sized_content_ops_are_no_ops() {
        let mut dst = [7_u8; 2];
        let r = Range::from_mut_slice(&mut dst);
        unsafe {
            assert_eq!(r.copy(Range::UNINIT).unwrap(), r.begin());
            assert!(r.set_pattern(Range::UNINIT).unwrap().is_null());
            assert!(r.compare(Range::UNINIT).unwrap().is_null());
            assert_eq!(r.find(Range::UNINIT).unwrap(), r.begin().cast_const());
            assert!(Range::UNINIT.find(&b"a"[..]).unwrap().is_null());
            assert_eq!(Range::UNINIT.set(0).unwrap(), ptr::null_mut());
        }
        assert_eq!(dst, [7, 7]);
    }

    #[test]
    fn search_within_range() {
        let hay = *b"one two one";
        let r = Range::from_slice(&hay);
        unsafe {
            assert_eq!(r.find(&b"one"[..]).unwrap(), hay.as_ptr());
            assert_eq!(r.rfind(&b"one"[..]).unwrap(), hay.as_ptr().wrapping_add(8));
            assert_eq!(r.find(&b"six"[..]).unwrap(), hay.as_ptr().wrapping_add(11));
        }
    }
}
