//! Allocator handle exports.

use crate::status::{get, guard, put};
use basis_alloc::{Allocator, c_void};

/// Allocate `size` bytes through `handle`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_alloc(
    handle: *const Allocator,
    size: usize,
    out: *mut *mut c_void,
) -> u32 {
    guard(|| unsafe {
        let block = basis_alloc::alloc(handle.as_ref(), size)?;
        put(out, block.as_ptr().cast())
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_free(handle: *const Allocator, ptr: *mut c_void) -> u32 {
    guard(|| unsafe { basis_alloc::free(handle.as_ref(), ptr.cast()) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_realloc(
    handle: *const Allocator,
    ptr: *mut c_void,
    old_size: usize,
    new_size: usize,
    out: *mut *mut c_void,
) -> u32 {
    guard(|| unsafe {
        let block = basis_alloc::realloc(handle.as_ref(), ptr.cast(), old_size, new_size)?;
        put(out, block.cast())
    })
}

/// Copy the calling thread's default handle into `out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_default_allocator(out: *mut Allocator) -> u32 {
    guard(|| unsafe { put(out, basis_alloc::default_allocator()) })
}

/// Install `*handle` as the calling thread's default; the previous handle is
/// written to `previous` unless it is null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_set_default_allocator(
    handle: *const Allocator,
    previous: *mut Allocator,
) -> u32 {
    guard(|| unsafe {
        let handle = *get(handle)?;
        crate::status::put_opt(previous, basis_alloc::set_default_allocator(handle));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_except::ErrorKind;
    use core::ptr;

    #[test]
    fn round_trip_through_the_abi() {
        let heap = Allocator::stdlib();
        let mut block = ptr::null_mut();
        unsafe {
            assert_eq!(basis_alloc(&heap, 8, &mut block), 0);
            assert!(!block.is_null());
            assert_eq!(basis_realloc(&heap, block, 8, 32, &mut block), 0);
            assert_eq!(basis_free(&heap, block), 0);
        }
    }

    #[test]
    fn null_handle_is_reported() {
        let mut block = ptr::null_mut();
        let code = unsafe { basis_alloc(ptr::null(), 8, &mut block) };
        assert_eq!(code, ErrorKind::NullPointer.code());
        let code = unsafe { basis_alloc(&Allocator::stdlib(), 0, &mut block) };
        assert_eq!(code, ErrorKind::ZeroMemoryAllocate.code());
    }

    #[test]
    fn default_handle_can_be_swapped() {
        let mut previous = Allocator::EMPTY;
        unsafe {
            assert_eq!(basis_set_default_allocator(&Allocator::EMPTY, &mut previous), 0);
            let mut current = Allocator::stdlib();
            assert_eq!(basis_default_allocator(&mut current), 0);
            assert!(!current.is_initialized());
            assert_eq!(basis_set_default_allocator(&previous, ptr::null_mut()), 0);
        }
    }
}
