//! Range and typed-range exports. Records are passed by pointer and use the
//! `#[repr(C)]` layouts of [`Range`] (`begin`, `end`) and [`TypedRange`]
//! (`begin`, `end`, `element_size`).

use crate::status::{get, guard, put};
use basis_range::{Range, TypedRange};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_make(begin: *mut u8, end: *mut u8, out: *mut Range) -> u32 {
    guard(|| unsafe { put(out, Range::make(begin, end)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_from_base_size(
    begin: *mut u8,
    size: usize,
    out: *mut Range,
) -> u32 {
    guard(|| unsafe { put(out, Range::from_base_size(begin, size)?) })
}

/// Writes the [`RangeState`](basis_range::RangeState) discriminant.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_state(range: *const Range, out: *mut u8) -> u32 {
    guard(|| unsafe { put(out, get(range)?.state() as u8) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_size(range: *const Range, out: *mut usize) -> u32 {
    guard(|| unsafe { put(out, get(range)?.size()?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_at(
    range: *const Range,
    offset: usize,
    reversed: bool,
    out: *mut *mut u8,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.at(offset, reversed)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_slice(
    range: *const Range,
    offset: usize,
    size: usize,
    out: *mut Range,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.slice(offset, size)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_contains(
    range: *const Range,
    other: *const Range,
    out: *mut bool,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.contains(get(other)?)) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_is_aligned(
    range: *const Range,
    alignment: usize,
    out: *mut bool,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.is_aligned(alignment)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_range_set(range: *const Range, value: u8, out: *mut *mut u8) -> u32 {
    guard(|| unsafe { put(out, get(range)?.set(value)?) })
}

macro_rules! export_range_op {
    ($($name:ident => $op:ident -> $ret:ty;)*) => {$(
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            range: *const Range,
            other: *const Range,
            out: *mut $ret,
        ) -> u32 {
            guard(|| unsafe { put(out, get(range)?.$op(get(other)?)?) })
        }
    )*};
}

export_range_op! {
    basis_range_copy => copy -> *mut u8;
    basis_range_copy_rev => copy_rev -> *mut u8;
    basis_range_rcopy => rcopy -> *mut u8;
    basis_range_move => move_bytes -> *mut u8;
    basis_range_set_pattern => set_pattern -> *mut u8;
    basis_range_compare => compare -> *const u8;
    basis_range_rcompare => rcompare -> *const u8;
    basis_range_find => find -> *const u8;
    basis_range_rfind => rfind -> *const u8;
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_typed_range_make(
    begin: *mut u8,
    end: *mut u8,
    element_size: usize,
    out: *mut TypedRange,
) -> u32 {
    guard(|| unsafe { put(out, TypedRange::make(begin, end, element_size)?) })
}

/// Writes the element count.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_typed_range_size(range: *const TypedRange, out: *mut usize) -> u32 {
    guard(|| unsafe { put(out, get(range)?.size()?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_typed_range_at(
    range: *const TypedRange,
    index: usize,
    reversed: bool,
    out: *mut *mut u8,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.at(index, reversed)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_typed_range_is_equal(
    range: *const TypedRange,
    other: *const TypedRange,
    out: *mut bool,
) -> u32 {
    guard(|| unsafe { put(out, get(range)?.is_equal(get(other)?)?) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_except::ErrorKind;
    use basis_range::RangeState;
    use core::ptr;

    #[test]
    fn record_layouts_are_flat() {
        assert_eq!(size_of::<Range>(), 2 * size_of::<usize>());
        assert_eq!(size_of::<TypedRange>(), 3 * size_of::<usize>());
    }

    #[test]
    fn make_classify_and_index() {
        let mut buf = *b"abcd";
        let p = buf.as_mut_ptr();
        let mut r = Range::UNINIT;
        let mut state = 0_u8;
        let mut at = ptr::null_mut();
        unsafe {
            assert_eq!(basis_range_make(p, p.add(4), &mut r), 0);
            assert_eq!(basis_range_state(&r, &mut state), 0);
            assert_eq!(state, RangeState::HasData as u8);
            assert_eq!(basis_range_at(&r, 0, true, &mut at), 0);
            assert_eq!(*at, b'd');
            let code = basis_range_at(&r, 4, false, &mut at);
            assert_eq!(code, ErrorKind::OutOfRange.code());
            let code = basis_range_make(p.add(4), p, &mut r);
            assert_eq!(code, ErrorKind::InvalidMemoryRange.code());
        }
    }

    #[test]
    fn copy_between_records() {
        let src = *b"xyz";
        let mut dst = [0_u8; 2];
        let s = Range::from_slice(&src);
        let d = Range::from_mut_slice(&mut dst);
        let mut end = ptr::null_mut();
        unsafe { assert_eq!(basis_range_copy(&d, &s, &mut end), 0) };
        assert_eq!(&dst, b"xy");
        assert_eq!(end, d.end());
    }

    #[test]
    fn typed_records() {
        let values = [1_u32, 2, 3];
        let t = TypedRange::from_slice(&values);
        let mut n = 0;
        let mut equal = false;
        unsafe {
            assert_eq!(basis_typed_range_size(&t, &mut n), 0);
            assert_eq!(basis_typed_range_is_equal(&t, &t, &mut equal), 0);
            let mut out = TypedRange::from_slice(&values);
            let code = basis_typed_range_make(t.begin(), t.end(), 5, &mut out);
            assert_eq!(code, ErrorKind::SizeNotMultipleOfElementSize.code());
        }
        assert_eq!(n, 3);
        assert!(equal);
    }
}
