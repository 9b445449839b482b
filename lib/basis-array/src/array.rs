use crate::allocated::{AllocatedRange, byte_len};
use basis_alloc::{Allocator, default_allocator};
use basis_core::Scalar;
use basis_except::{ErrorKind, Result, ensure, exception};
use basis_mem::sized;
use basis_range::{Range, TypedRange};
use core::slice;

/// How [`DynArray::resize`] treats a target that fits the current capacity.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResizePolicy {
    /// Only adjust the logical size; reallocate only to grow past capacity.
    Reuse,
    /// Always reallocate to exactly the requested element count.
    Exact,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        if basis_core::config::ARRAY_OPTIMIZE_RESIZE {
            Self::Reuse
        } else {
            Self::Exact
        }
    }
}

/// Snapshot of an array's fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Unpacked {
    pub begin: *mut u8,
    /// End of the live region, `begin + size * element_size`.
    pub end: *mut u8,
    pub element_size: usize,
    pub size: usize,
}

/// A growable array of `element_size`-byte elements in an allocator-owned
/// block.
///
/// `size` elements are live out of `capacity` allocated; the element size is
/// fixed at creation. Live bytes are always initialized: elements exposed by
/// growth are zero-filled. Operations that fail leave the array as it was.
#[repr(C)]
#[derive(Debug)]
pub struct DynArray {
    storage: AllocatedRange,
    size: usize,
    policy: ResizePolicy,
}

impl DynArray {
    /// An array with no block, using the thread's default allocator.
    ///
    /// # Errors
    /// [`ErrorKind::ZeroElementSize`] if `element_size == 0`.
    pub fn new(element_size: usize) -> Result<Self> {
        Self::new_in(default_allocator(), element_size)
    }

    /// # Errors
    /// [`ErrorKind::ZeroElementSize`] if `element_size == 0`.
    pub fn new_in(allocator: Allocator, element_size: usize) -> Result<Self> {
        Ok(Self::from_storage(AllocatedRange::empty(allocator, element_size)?, 0))
    }

    /// `count` zeroed elements from the thread's default allocator.
    ///
    /// # Errors
    /// * [`ErrorKind::ZeroElementSize`] if `element_size == 0`
    /// * [`ErrorKind::ExceedsMaxSize`] if `count * element_size` overflows
    /// * any allocator error
    pub fn make(element_size: usize, count: usize) -> Result<Self> {
        Self::make_in(default_allocator(), element_size, count)
    }

    /// # Errors
    /// As [`make`](Self::make).
    pub fn make_in(allocator: Allocator, element_size: usize, count: usize) -> Result<Self> {
        Ok(Self::from_storage(
            AllocatedRange::make(allocator, element_size, count)?,
            count,
        ))
    }

    /// An empty array with room for `capacity` elements.
    ///
    /// # Errors
    /// As [`make`](Self::make).
    pub fn with_capacity(element_size: usize, capacity: usize) -> Result<Self> {
        Self::with_capacity_in(default_allocator(), element_size, capacity)
    }

    /// # Errors
    /// As [`make`](Self::make).
    pub fn with_capacity_in(
        allocator: Allocator,
        element_size: usize,
        capacity: usize,
    ) -> Result<Self> {
        Ok(Self::from_storage(
            AllocatedRange::make(allocator, element_size, capacity)?,
            0,
        ))
    }

    fn from_storage(storage: AllocatedRange, size: usize) -> Self {
        Self {
            storage,
            size,
            policy: ResizePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    #[must_use]
    pub const fn policy(&self) -> ResizePolicy {
        self.policy
    }

    pub const fn set_policy(&mut self, policy: ResizePolicy) {
        self.policy = policy;
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.storage.element_size()
    }

    #[inline]
    #[must_use]
    pub const fn allocator(&self) -> &Allocator {
        self.storage.allocator()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    #[inline]
    #[must_use]
    pub const fn is_valid_index(&self, index: usize) -> bool {
        index < self.size
    }

    /// The block (capacity) as a typed range.
    #[must_use]
    pub const fn storage(&self) -> &TypedRange {
        self.storage.typed()
    }

    /// The live region as a typed range.
    #[must_use]
    pub fn live(&self) -> TypedRange {
        TypedRange::from_raw_parts(
            Range::from_raw_parts(self.begin(), self.end()),
            self.element_size(),
        )
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> *mut u8 {
        self.storage.begin()
    }

    /// End of the live region.
    #[inline]
    #[must_use]
    pub fn end(&self) -> *mut u8 {
        self.begin().wrapping_add(self.total_size())
    }

    /// Bytes in the live region.
    #[inline]
    #[must_use]
    pub const fn total_size(&self) -> usize {
        self.size * self.element_size()
    }

    /// Bytes allocated past the live region.
    #[inline]
    #[must_use]
    pub fn available_size(&self) -> usize {
        (self.capacity() - self.size) * self.element_size()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        ensure!(
            index < self.size,
            ErrorKind::OutOfRange,
            format!("index {index} >= size {}", self.size)
        );
        Ok(())
    }

    /// First byte of element `index`.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn at_from_front(&self, index: usize) -> Result<*mut u8> {
        self.check_index(index)?;
        Ok(self.begin().wrapping_add(index * self.element_size()))
    }

    /// First byte of element `index`, counted back from the last live one.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn at_from_back(&self, index: usize) -> Result<*mut u8> {
        self.check_index(index)?;
        self.at_from_front(self.size - 1 - index)
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
    /// [`ErrorKind::OutOfRange`] if the array is empty.
    pub fn front(&self) -> Result<*mut u8> {
        self.at_from_front(0)
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the array is empty.
    pub fn back(&self) -> Result<*mut u8> {
        self.at_from_back(0)
    }

    /// Zero the bytes of elements `[from, to)`; `to` must not exceed capacity.
    fn zero_elements(&mut self, from: usize, to: usize) -> Result<()> {
        if to > from {
            let e = self.element_size();
            // Safety: `to <= capacity`; the block is owned by `self`.
            unsafe { sized::set(self.begin().add(from * e), (to - from) * e, 0)? };
        }
        Ok(())
    }

    /// Ensure room for `extra` more elements, reallocating to exactly
    /// `size + extra` if needed.
    ///
    /// # Errors
    /// [`ErrorKind::ExceedsMaxSize`] on overflow, or any allocator error.
    pub fn reserve(&mut self, extra: usize) -> Result<()> {
        let required = self
            .size
            .checked_add(extra)
            .ok_or_else(|| exception!(ErrorKind::ExceedsMaxSize))?;
        byte_len(required, self.element_size())?;
        self.storage.reserve(required)
    }

    /// Set the element count to `new_size`, keeping the first
    /// `min(size, new_size)` elements and zero-filling any new ones.
    ///
    /// Under [`ResizePolicy::Reuse`] a target within capacity only moves the
    /// logical size; otherwise the block is reallocated to exactly
    /// `new_size` elements.
    ///
    /// # Errors
    /// [`ErrorKind::ExceedsMaxSize`] on overflow, or any allocator error.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        let old_size = self.size;
        if self.policy == ResizePolicy::Exact || new_size > self.capacity() {
            self.storage.resize(new_size)?;
        }
        self.zero_elements(old_size, new_size)?;
        self.size = new_size;
        Ok(())
    }

    /// Reallocate capacity down to `size`.
    ///
    /// # Errors
    /// Any allocator error.
    pub fn shrink(&mut self) -> Result<()> {
        self.storage.shrink(self.size)
    }

    /// Free the block; size and capacity become zero, the element size stays.
    ///
    /// # Errors
    /// [`ErrorKind::DeallocatorFunctionNotInitialized`] if the allocator
    /// cannot free; the array is unchanged.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.free()?;
        self.size = 0;
        Ok(())
    }

    /// Same as [`clear`](Self::clear).
    ///
    /// # Errors
    /// As [`clear`](Self::clear).
    pub fn free(&mut self) -> Result<()> {
        self.clear()
    }

    #[must_use]
    pub fn unpack(&self) -> Unpacked {
        Unpacked {
            begin: self.begin(),
            end: self.end(),
            element_size: self.element_size(),
            size: self.size,
        }
    }

    /// Capacity to grow to when one more element is needed.
    fn grown_capacity(&self) -> Result<usize> {
        let size_plus_one = self
            .size
            .checked_add(1)
            .ok_or_else(|| exception!(ErrorKind::ExceedsMaxSize))?;
        let target = self
            .capacity()
            .saturating_mul(2)
            .max(size_plus_one)
            .max(4);
        // Fall back to the minimum if doubling would exceed the limit.
        if byte_len(target, self.element_size()).is_ok() {
            Ok(target)
        } else {
            byte_len(size_plus_one, self.element_size()).map(|_| size_plus_one)
        }
    }

    fn make_room(&mut self) -> Result<()> {
        if self.is_full() {
            let target = self.grown_capacity()?;
            self.storage.reserve(target)?;
        }
        Ok(())
    }

    fn check_element(&self, bytes: &[u8]) -> Result<()> {
        ensure!(
            bytes.len() == self.element_size(),
            ErrorKind::DifferentElementSize,
            format!("{} bytes for a {}-byte element", bytes.len(), self.element_size())
        );
        Ok(())
    }

    /// Append one element.
    ///
    /// # Errors
    /// * [`ErrorKind::DifferentElementSize`] unless `bytes` is one element long
    /// * any growth error
    pub fn push_back(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_element(bytes)?;
        self.make_room()?;
        self.size += 1;
        self.element_mut(self.size - 1).copy_from_slice(bytes);
        Ok(())
    }

    /// Drop the last element.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the array is empty.
    pub fn pop_back(&mut self) -> Result<()> {
        ensure!(self.size > 0, ErrorKind::OutOfRange, "pop from an empty array");
        self.size -= 1;
        Ok(())
    }

    /// Insert one element before `index`, shifting the tail up.
    ///
    /// # Errors
    /// * [`ErrorKind::OutOfRange`] if `index > size`
    /// * as [`push_back`](Self::push_back)
    pub fn insert(&mut self, index: usize, bytes: &[u8]) -> Result<()> {
        ensure!(
            index <= self.size,
            ErrorKind::OutOfRange,
            format!("insert at {index} > size {}", self.size)
        );
        self.check_element(bytes)?;
        self.make_room()?;
        let e = self.element_size();
        let tail = (self.size - index) * e;
        // Safety: `size < capacity` after `make_room`; the shift stays inside the block.
        unsafe {
            let at = self.begin().add(index * e);
            sized::move_bytes(at.add(e), tail, at, tail)?;
        }
        self.size += 1;
        self.element_mut(index).copy_from_slice(bytes);
        Ok(())
    }

    /// Remove element `index`, shifting the tail down.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let e = self.element_size();
        let tail = (self.size - index - 1) * e;
        // Safety: both regions lie in the live part of the owned block.
        unsafe {
            let at = self.begin().add(index * e);
            sized::move_bytes(at, tail, at.add(e), tail)?;
        }
        self.size -= 1;
        Ok(())
    }

    fn element_mut(&mut self, index: usize) -> &mut [u8] {
        let e = self.element_size();
        &mut self.as_bytes_mut()[index * e..(index + 1) * e]
    }

    /// The bytes of element `index`.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= size`.
    pub fn get(&self, index: usize) -> Result<&[u8]> {
        self.check_index(index)?;
        let e = self.element_size();
        Ok(&self.as_bytes()[index * e..(index + 1) * e])
    }

    /// Overwrite element `index`.
    ///
    /// # Errors
    /// * [`ErrorKind::OutOfRange`] if `index >= size`
    /// * [`ErrorKind::DifferentElementSize`] unless `bytes` is one element long
    pub fn set(&mut self, index: usize, bytes: &[u8]) -> Result<()> {
        self.check_index(index)?;
        self.check_element(bytes)?;
        self.element_mut(index).copy_from_slice(bytes);
        Ok(())
    }

    /// Read element `index` as a `T`.
    ///
    /// # Errors
    /// * [`ErrorKind::OutOfRange`] if `index >= size`
    /// * [`ErrorKind::DifferentElementSize`] unless `element_size == T::SIZE`
    pub fn get_scalar<T: Scalar>(&self, index: usize) -> Result<T> {
        T::from_ne_slice(self.get(index)?)
            .ok_or_else(|| exception!(ErrorKind::DifferentElementSize))
    }

    /// Write `value` into element `index`.
    ///
    /// # Errors
    /// As [`get_scalar`](Self::get_scalar).
    pub fn set_scalar<T: Scalar>(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        ensure!(
            value.write_ne_slice(self.element_mut(index)),
            ErrorKind::DifferentElementSize
        );
        Ok(())
    }

    /// Append `value` as one element.
    ///
    /// # Errors
    /// As [`push_back`](Self::push_back).
    pub fn push_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        ensure!(T::SIZE == self.element_size(), ErrorKind::DifferentElementSize);
        self.make_room()?;
        self.size += 1;
        let written = value.write_ne_slice(self.element_mut(self.size - 1));
        debug_assert!(written);
        Ok(())
    }

    /// The live region.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        if self.size == 0 {
            return &[];
        }
        // Safety: the live region is initialized and owned by `self`.
        unsafe { slice::from_raw_parts(self.begin(), self.total_size()) }
    }

    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        if self.size == 0 {
            return &mut [];
        }
        // Safety: the live region is initialized and exclusively borrowed.
        unsafe { slice::from_raw_parts_mut(self.begin(), self.total_size()) }
    }

    /// The live elements, front to back.
    pub fn iter(&self) -> core::slice::ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.element_size())
    }
}

impl<'a> IntoIterator for &'a DynArray {
    type Item = &'a [u8];
    type IntoIter = core::slice::ChunksExact<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stdlib_array(element_size: usize, count: usize) -> DynArray {
        DynArray::make_in(Allocator::stdlib(), element_size, count).unwrap()
    }

    #[test]
    fn make_sets_size_and_zeroes() {
        let a = stdlib_array(4, 3);
        assert_eq!(a.size(), 3);
        assert_eq!(a.capacity(), 3);
        assert!(a.is_full());
        assert_eq!(a.as_bytes(), &[0; 12]);
        assert_eq!(a.total_size(), 12);
        assert_eq!(a.available_size(), 0);
    }

    #[test]
    fn make_rejects_zero_element_size() {
        let err = DynArray::make_in(Allocator::stdlib(), 0, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroElementSize);
    }

    #[test]
    fn empty_array_owns_no_block() {
        let a = DynArray::make_in(Allocator::EMPTY, 4, 0).unwrap();
        assert!(a.begin().is_null());
        assert_eq!(a.capacity(), 0);
        assert_eq!(a.front().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn indexing_is_bounded_by_size_not_capacity() {
        let mut a = DynArray::with_capacity_in(Allocator::stdlib(), 2, 8).unwrap();
        a.push_scalar(7_u16).unwrap();
        assert!(a.is_valid_index(0));
        assert!(!a.is_valid_index(1));
        assert_eq!(a.at_from_front(1).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(a.front(), a.back());
    }

    #[test]
    fn reuse_policy_keeps_block_within_capacity() {
        let mut a = stdlib_array(1, 8).with_policy(ResizePolicy::Reuse);
        let block = a.begin();
        a.resize(2).unwrap();
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.begin(), block);
        a.resize(6).unwrap();
        assert_eq!(a.as_bytes(), &[0; 6]);
    }

    #[test]
    fn exact_policy_reallocates() {
        let mut a = stdlib_array(1, 8).with_policy(ResizePolicy::Exact);
        a.resize(2).unwrap();
        assert_eq!(a.capacity(), 2);
        assert_eq!(a.size(), 2);
    }

    #[test]
    fn growth_is_geometric() {
        let mut a = DynArray::new_in(Allocator::stdlib(), 1).unwrap();
        a.push_back(&[1]).unwrap();
        assert_eq!(a.capacity(), 4);
        for b in 2..=5 {
            a.push_back(&[b]).unwrap();
        }
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.as_bytes(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_and_remove_shift_the_tail() {
        let mut a = DynArray::new_in(Allocator::stdlib(), 2).unwrap();
        for v in [1_u16, 3, 4] {
            a.push_scalar(v).unwrap();
        }
        a.insert(1, &2_u16.to_ne_bytes()).unwrap();
        let values: Vec<u16> = (0..a.size()).map(|i| a.get_scalar(i).unwrap()).collect();
        assert_eq!(values, [1, 2, 3, 4]);
        a.remove(0).unwrap();
        a.pop_back().unwrap();
        let values: Vec<u16> = a.iter().map(|b| u16::from_ne_bytes([b[0], b[1]])).collect();
        assert_eq!(values, [2, 3]);
        assert_eq!(a.insert(5, &[0, 0]).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn element_width_is_enforced() {
        let mut a = stdlib_array(4, 1);
        assert_eq!(
            a.set(0, &[1, 2]).unwrap_err().kind(),
            ErrorKind::DifferentElementSize
        );
        assert_eq!(
            a.get_scalar::<u64>(0).unwrap_err().kind(),
            ErrorKind::DifferentElementSize
        );
        a.set_scalar(0, -1_i32).unwrap();
        assert_eq!(a.get(0).unwrap(), &[0xFF; 4]);
    }

    #[test]
    fn unpack_reports_live_region() {
        let a = stdlib_array(8, 2);
        let u = a.unpack();
        assert_eq!(u.size, 2);
        assert_eq!(u.element_size, 8);
        assert_eq!(u.end.addr() - u.begin.addr(), 16);
        assert_eq!(a.live().size(), Ok(2));
    }
}
