use basis_alloc::Allocator;
use basis_except::{ErrorKind, Result, ensure, exception};
use basis_range::{Range, TypedRange};

/// Largest block a single allocation may span.
const MAX_BYTES: usize = isize::MAX.unsigned_abs();

/// A [`TypedRange`] whose block came from, and goes back to, a specific
/// [`Allocator`].
///
/// The handle is copied in at creation; every later resize and the final free
/// go through that copy. Dropping the range frees the block.
#[repr(C)]
#[derive(Debug)]
pub struct AllocatedRange {
    typed: TypedRange,
    allocator: Allocator,
}

/// Byte count of `count` elements, checked against the addressable maximum.
pub(crate) fn byte_len(count: usize, element_size: usize) -> Result<usize> {
    count
        .checked_mul(element_size)
        .filter(|&bytes| bytes <= MAX_BYTES)
        .ok_or_else(|| {
            exception!(
                ErrorKind::ExceedsMaxSize,
                format!("{count} elements of {element_size} bytes")
            )
        })
}

impl AllocatedRange {
    /// An unallocated range; no block is requested.
    ///
    /// # Errors
    /// [`ErrorKind::ZeroElementSize`] if `element_size == 0`.
    pub fn empty(allocator: Allocator, element_size: usize) -> Result<Self> {
        Ok(Self {
            typed: TypedRange::empty(element_size)?,
            allocator,
        })
    }

    /// Allocate `count` zero-filled elements. `count == 0` allocates nothing.
    ///
    /// # Errors
    /// * [`ErrorKind::ZeroElementSize`] if `element_size == 0`
    /// * [`ErrorKind::ExceedsMaxSize`] if the byte count overflows
    /// * any allocator error
    pub fn make(allocator: Allocator, element_size: usize, count: usize) -> Result<Self> {
        let mut range = Self::empty(allocator, element_size)?;
        let bytes = byte_len(count, element_size)?;
        if bytes > 0 {
            let block = allocator.alloc_zeroed(bytes)?;
            range.typed = TypedRange::from_base_count(block.as_ptr(), count, element_size)?;
        }
        Ok(range)
    }

    #[inline]
    #[must_use]
    pub const fn typed(&self) -> &TypedRange {
        &self.typed
    }

    #[inline]
    #[must_use]
    pub const fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    #[inline]
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.typed.element_size()
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> *mut u8 {
        self.typed.begin()
    }

    /// Element count of the block.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.typed.range().diff() / self.element_size()
    }

    /// Replace the block with one of exactly `count` elements, keeping the
    /// leading `min(capacity, count)` elements. `count == 0` frees the block.
    ///
    /// On failure the old block is kept and `self` is unchanged.
    ///
    /// # Errors
    /// [`ErrorKind::ExceedsMaxSize`] or any allocator error.
    pub fn resize(&mut self, count: usize) -> Result<()> {
        let e = self.element_size();
        let old_bytes = self.capacity() * e;
        let new_bytes = byte_len(count, e)?;
        if old_bytes == new_bytes {
            return Ok(());
        }
        // Safety: the block is owned by `self` and came from `self.allocator`.
        let block = unsafe { self.allocator.realloc(self.begin(), old_bytes, new_bytes)? };
        log::debug!("realloc {old_bytes} -> {new_bytes} bytes at {block:p}");
        self.typed = if block.is_null() {
            TypedRange::from_raw_parts(Range::UNINIT, e)
        } else {
            let range = Range::from_raw_parts(block, block.wrapping_add(new_bytes));
            TypedRange::from_raw_parts(range, e)
        };
        Ok(())
    }

    /// Grow to at least `count` elements.
    ///
    /// # Errors
    /// As [`resize`](Self::resize).
    pub fn reserve(&mut self, count: usize) -> Result<()> {
        if self.capacity() >= count {
            return Ok(());
        }
        self.resize(count)
    }

    /// Shrink to `count` elements if currently larger.
    ///
    /// # Errors
    /// As [`resize`](Self::resize).
    pub fn shrink(&mut self, count: usize) -> Result<()> {
        if self.capacity() <= count {
            return Ok(());
        }
        self.resize(count)
    }

    /// Return the block to the allocator. The element size is kept.
    ///
    /// # Errors
    /// [`ErrorKind::DeallocatorFunctionNotInitialized`] if the handle cannot
    /// free; the block stays owned.
    pub fn free(&mut self) -> Result<()> {
        let begin = self.begin();
        if !begin.is_null() {
            // Safety: the block is owned by `self` and came from `self.allocator`.
            unsafe { self.allocator.free(begin)? };
        }
        self.typed = TypedRange::from_raw_parts(Range::UNINIT, self.element_size());
        Ok(())
    }

    /// Consume the range without freeing, returning its parts.
    #[must_use]
    pub fn into_raw_parts(self) -> (TypedRange, Allocator) {
        let this = core::mem::ManuallyDrop::new(self);
        (this.typed, this.allocator)
    }

    /// Adopt a block previously released with
    /// [`into_raw_parts`](Self::into_raw_parts).
    ///
    /// # Errors
    /// Any invariant violation of `typed`.
    ///
    /// # Safety
    /// `typed` must describe a live block allocated by `allocator` (or be
    /// uninitialized), not owned by anything else.
    pub unsafe fn from_raw_parts(typed: TypedRange, allocator: Allocator) -> Result<Self> {
        ensure!(typed.is_valid(), ErrorKind::InvalidMemoryRange);
        Ok(Self { typed, allocator })
    }
}

impl Drop for AllocatedRange {
    fn drop(&mut self) {
        if let Err(e) = self.free() {
            log::warn!("leaking block at {:p}: {e}", self.begin());
        }
    }
}
