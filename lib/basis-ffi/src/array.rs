//! Dynamic array exports.
//!
//! Arrays are opaque to C: `basis_array_make*` hand out an owning pointer that
//! must be released with [`basis_array_destroy`]. Fields are read back through
//! [`basis_array_unpack`].

use crate::status::{get, get_mut, guard, put, put_opt};
use basis_alloc::Allocator;
use basis_array::DynArray;
use core::slice;

fn into_raw(array: DynArray) -> *mut DynArray {
    Box::into_raw(Box::new(array))
}

/// Create an array of `count` zeroed elements using the thread's default
/// allocator.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_make(
    element_size: usize,
    count: usize,
    out: *mut *mut DynArray,
) -> u32 {
    guard(|| unsafe { put(out, into_raw(DynArray::make(element_size, count)?)) })
}

/// As [`basis_array_make`], allocating through `*handle`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_make_in(
    handle: *const Allocator,
    element_size: usize,
    count: usize,
    out: *mut *mut DynArray,
) -> u32 {
    guard(|| unsafe {
        let handle = *get(handle)?;
        put(out, into_raw(DynArray::make_in(handle, element_size, count)?))
    })
}

/// Free the block and release the array. A null `array` is a no-op.
///
/// If the block cannot be freed the error is reported and the array stays
/// alive.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_destroy(array: *mut DynArray) -> u32 {
    guard(|| unsafe {
        if array.is_null() {
            return Ok(());
        }
        (*array).free()?;
        drop(Box::from_raw(array));
        Ok(())
    })
}

/// Write the array's fields; each null out-pointer is skipped.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_unpack(
    array: *const DynArray,
    begin: *mut *mut u8,
    end: *mut *mut u8,
    element_size: *mut usize,
    size: *mut usize,
) -> u32 {
    guard(|| unsafe {
        let unpacked = get(array)?.unpack();
        put_opt(begin, unpacked.begin);
        put_opt(end, unpacked.end);
        put_opt(element_size, unpacked.element_size);
        put_opt(size, unpacked.size);
        Ok(())
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_capacity(array: *const DynArray, out: *mut usize) -> u32 {
    guard(|| unsafe { put(out, get(array)?.capacity()) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_at(
    array: *const DynArray,
    index: usize,
    reversed: bool,
    out: *mut *mut u8,
) -> u32 {
    guard(|| unsafe { put(out, get(array)?.at(index, reversed)?) })
}

macro_rules! export_sized {
    ($($name:ident => $op:ident;)*) => {$(
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(array: *mut DynArray, n: usize) -> u32 {
            guard(|| unsafe { get_mut(array)?.$op(n) })
        }
    )*};
}

export_sized! {
    basis_array_reserve => reserve;
    basis_array_resize => resize;
}

macro_rules! export_unit {
    ($($name:ident => $op:ident;)*) => {$(
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(array: *mut DynArray) -> u32 {
            guard(|| unsafe { get_mut(array)?.$op() })
        }
    )*};
}

export_unit! {
    basis_array_shrink => shrink;
    basis_array_clear => clear;
    basis_array_free => free;
    basis_array_pop_back => pop_back;
}

/// Append the `len` bytes at `element` as one element.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_array_push_back(
    array: *mut DynArray,
    element: *const u8,
    len: usize,
) -> u32 {
    guard(|| unsafe {
        basis_except::ensure!(!element.is_null(), basis_except::ErrorKind::NullPointer, "element");
        get_mut(array)?.push_back(slice::from_raw_parts(element, len))
    })
}
