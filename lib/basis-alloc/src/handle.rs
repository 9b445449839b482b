use basis_except::{ErrorKind, Result, ensure, exception, raise};
use core::fmt;
use core::ptr::{self, NonNull};
use libc::c_void;

/// Allocate `size` bytes; returns null on failure.
///
/// Declared `"C-unwind"`: the function may [`throw`](basis_except::throw)
/// (or unwind from foreign code compiled with unwinding support) and the
/// exception reaches the caller's catch frame. Nothing allocated by the
/// failing call is kept.
pub type AllocFn = unsafe extern "C-unwind" fn(size: usize) -> *mut c_void;

/// Release a block previously returned by the paired [`AllocFn`].
///
/// May unwind like [`AllocFn`]; the block is then considered still owned by
/// the caller.
pub type DeallocFn = unsafe extern "C-unwind" fn(ptr: *mut c_void);

unsafe extern "C-unwind" fn stdlib_alloc(size: usize) -> *mut c_void {
    // Safety: `malloc` accepts any size.
    unsafe { libc::malloc(size) }
}

unsafe extern "C-unwind" fn stdlib_free(ptr: *mut c_void) {
    // Safety: forwarded from the caller of the handle.
    unsafe { libc::free(ptr) }
}

/// A pair of allocation functions.
///
/// Either function may be absent; the checked wrappers below turn a missing
/// function into [`ErrorKind::AllocatorFunctionNotInitialized`] or
/// [`ErrorKind::DeallocatorFunctionNotInitialized`] instead of calling through
/// a null pointer.
///
/// Blocks are returned as-is: their contents are unspecified unless obtained
/// through [`alloc_zeroed`](Self::alloc_zeroed).
///
/// Either function may throw. The checked wrappers hold no resource across a
/// call, so an exception unwinds through them to the enclosing
/// [`try_catch`](basis_except::try_catch) and leaves every block the caller
/// owned untouched.
#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct Allocator {
    pub alloc_fn: Option<AllocFn>,
    pub dealloc_fn: Option<DeallocFn>,
}

impl Allocator {
    /// A handle with neither function set.
    pub const EMPTY: Self = Self {
        alloc_fn: None,
        dealloc_fn: None,
    };

    #[must_use]
    pub const fn new(alloc_fn: AllocFn, dealloc_fn: DeallocFn) -> Self {
        Self {
            alloc_fn: Some(alloc_fn),
            dealloc_fn: Some(dealloc_fn),
        }
    }

    /// The host C library's `malloc`/`free`.
    #[must_use]
    pub const fn stdlib() -> Self {
        Self::new(stdlib_alloc, stdlib_free)
    }

    /// The handle every thread's default starts out as.
    ///
    /// [`stdlib`](Self::stdlib) if
    /// [`RUNTIME_ALLOCATOR_USE_STDLIB`](basis_core::config::RUNTIME_ALLOCATOR_USE_STDLIB)
    /// is configured, [`EMPTY`](Self::EMPTY) otherwise.
    #[must_use]
    pub const fn initial() -> Self {
        if basis_core::config::RUNTIME_ALLOCATOR_USE_STDLIB {
            Self::stdlib()
        } else {
            Self::EMPTY
        }
    }

    /// Both functions are present.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.alloc_fn.is_some() && self.dealloc_fn.is_some()
    }

    /// Allocate exactly `size` bytes.
    ///
    /// # Errors
    /// * [`ErrorKind::ZeroMemoryAllocate`] if `size == 0`
    /// * [`ErrorKind::AllocatorFunctionNotInitialized`] if `alloc_fn` is absent
    /// * [`ErrorKind::MemoryNotAllocated`] if the function returns null
    pub fn alloc(&self, size: usize) -> Result<NonNull<u8>> {
        ensure!(size != 0, ErrorKind::ZeroMemoryAllocate);
        let Some(alloc_fn) = self.alloc_fn else {
            raise!(ErrorKind::AllocatorFunctionNotInitialized);
        };
        // Safety: the handle's owner vouches for `alloc_fn`; a null result is handled.
        let raw = unsafe { alloc_fn(size) }.cast::<u8>();
        log::trace!("alloc {size} bytes -> {raw:p}");
        NonNull::new(raw).ok_or_else(|| {
            exception!(
                ErrorKind::MemoryNotAllocated,
                format!("allocation of {size} bytes failed")
            )
        })
    }

    /// Allocate exactly `size` zero-filled bytes.
    ///
    /// # Errors
    /// As [`alloc`](Self::alloc).
    pub fn alloc_zeroed(&self, size: usize) -> Result<NonNull<u8>> {
        let block = self.alloc(size)?;
        // Safety: `block` is a fresh allocation of `size` bytes.
        unsafe { ptr::write_bytes(block.as_ptr(), 0, size) };
        Ok(block)
    }

    /// Release `ptr`. A null `ptr` is a no-op.
    ///
    /// # Errors
    /// [`ErrorKind::DeallocatorFunctionNotInitialized`] if `dealloc_fn` is absent.
    ///
    /// # Safety
    /// `ptr` must be null or a live block obtained from this handle's
    /// allocation function, and must not be used afterwards.
    pub unsafe fn free(&self, ptr: *mut u8) -> Result<()> {
        let Some(dealloc_fn) = self.dealloc_fn else {
            raise!(ErrorKind::DeallocatorFunctionNotInitialized);
        };
        if ptr.is_null() {
            return Ok(());
        }
        log::trace!("free {ptr:p}");
        // Safety: forwarded from the caller.
        unsafe { dealloc_fn(ptr.cast()) };
        Ok(())
    }

    /// Move the block at `ptr` (`old_size` bytes) to a block of `new_size`
    /// bytes.
    ///
    /// * `old_size == new_size`: returns `ptr` unchanged.
    /// * `ptr` is null: behaves as [`alloc`](Self::alloc)`(new_size)`.
    /// * `new_size == 0`: frees `ptr` and returns null.
    /// * otherwise: allocates `new_size` bytes, copies
    ///   `min(old_size, new_size)` bytes, frees `ptr`.
    ///
    /// On failure the old block is left untouched and still owned by the
    /// caller.
    ///
    /// # Errors
    /// Any error of [`alloc`](Self::alloc) or [`free`](Self::free).
    ///
    /// # Safety
    /// `ptr` must be null or a live block of at least `old_size` bytes from
    /// this handle. On success the old pointer must no longer be used unless
    /// it was returned.
    pub unsafe fn realloc(
        &self,
        ptr: *mut u8,
        old_size: usize,
        new_size: usize,
    ) -> Result<*mut u8> {
        if old_size == new_size {
            return Ok(ptr);
        }
        if ptr.is_null() {
            return self.alloc(new_size).map(NonNull::as_ptr);
        }
        if new_size == 0 {
            // Safety: forwarded from the caller.
            unsafe { self.free(ptr)? };
            return Ok(ptr::null_mut());
        }
        // Checked up front so a missing deallocator cannot strand the new block.
        ensure!(
            self.dealloc_fn.is_some(),
            ErrorKind::DeallocatorFunctionNotInitialized
        );
        let fresh = self.alloc(new_size)?;
        log::trace!("realloc {ptr:p} ({old_size} bytes) -> {fresh:p} ({new_size} bytes)");
        // Safety: distinct live blocks, each at least `min(old_size, new_size)` long.
        unsafe {
            ptr::copy_nonoverlapping(ptr, fresh.as_ptr(), old_size.min(new_size));
            self.free(ptr)?;
        }
        Ok(fresh.as_ptr())
    }
}

impl fmt::Debug for Allocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocator")
            .field("alloc_fn", &self.alloc_fn.map(|p| p as *const ()))
            .field("dealloc_fn", &self.dealloc_fn.map(|p| p as *const ()))
            .finish()
    }
}

/// [`Allocator::alloc`] through a possibly-null handle.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `handle` is `None`, otherwise as
/// [`Allocator::alloc`].
pub fn alloc(handle: Option<&Allocator>, size: usize) -> Result<NonNull<u8>> {
    let Some(handle) = handle else {
        raise!(ErrorKind::NullPointer, "allocator handle");
    };
    handle.alloc(size)
}

/// [`Allocator::free`] through a possibly-null handle.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `handle` is `None`, otherwise as
/// [`Allocator::free`].
///
/// # Safety
/// As [`Allocator::free`].
pub unsafe fn free(handle: Option<&Allocator>, ptr: *mut u8) -> Result<()> {
    let Some(handle) = handle else {
        raise!(ErrorKind::NullPointer, "allocator handle");
    };
    // Safety: forwarded from the caller.
    unsafe { handle.free(ptr) }
}

/// [`Allocator::realloc`] through a possibly-null handle.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `handle` is `None`, otherwise as
/// [`Allocator::realloc`].
///
/// # Safety
/// As [`Allocator::realloc`].
pub unsafe fn realloc(
    handle: Option<&Allocator>,
    ptr: *mut u8,
    old_size: usize,
    new_size: usize,
) -> Result<*mut u8> {
    let Some(handle) = handle else {
        raise!(ErrorKind::NullPointer, "allocator handle");
    };
    // Safety: forwarded from the caller.
    unsafe { handle.realloc(ptr, old_size, new_size) }
}
