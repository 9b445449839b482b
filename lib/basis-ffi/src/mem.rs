//! Raw primitive exports, in size-pair (`basis_mem_*`) and pointer-pair
//! (`basis_mem_*_ptr`) forms. The primitive's returned pointer is written to
//! `out`.

use crate::status::{guard, put};
use basis_mem::{bounded, sized};

macro_rules! export_write {
    ($($name:ident, $ptr_name:ident => $op:ident;)*) => {$(
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            dst: *mut u8,
            dst_size: usize,
            src: *const u8,
            src_size: usize,
            out: *mut *mut u8,
        ) -> u32 {
            guard(|| unsafe { put(out, sized::$op(dst, dst_size, src, src_size)?) })
        }

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $ptr_name(
            dst: *mut u8,
            dst_end: *mut u8,
            src: *const u8,
            src_end: *const u8,
            out: *mut *mut u8,
        ) -> u32 {
            guard(|| unsafe { put(out, bounded::$op(dst, dst_end, src, src_end)?) })
        }
    )*};
}

macro_rules! export_read {
    ($($name:ident, $ptr_name:ident => $op:ident;)*) => {$(
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            lhs: *const u8,
            lhs_size: usize,
            rhs: *const u8,
            rhs_size: usize,
            out: *mut *const u8,
        ) -> u32 {
            guard(|| unsafe { put(out, sized::$op(lhs, lhs_size, rhs, rhs_size)?) })
        }

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $ptr_name(
            lhs: *const u8,
            lhs_end: *const u8,
            rhs: *const u8,
            rhs_end: *const u8,
            out: *mut *const u8,
        ) -> u32 {
            guard(|| unsafe { put(out, bounded::$op(lhs, lhs_end, rhs, rhs_end)?) })
        }
    )*};
}

export_write! {
    basis_mem_copy, basis_mem_copy_ptr => copy;
    basis_mem_copy_rev, basis_mem_copy_rev_ptr => copy_rev;
    basis_mem_rcopy, basis_mem_rcopy_ptr => rcopy;
    basis_mem_move, basis_mem_move_ptr => move_bytes;
    basis_mem_set_pattern, basis_mem_set_pattern_ptr => set_pattern;
}

export_read! {
    basis_mem_compare, basis_mem_compare_ptr => compare;
    basis_mem_rcompare, basis_mem_rcompare_ptr => rcompare;
    basis_mem_find, basis_mem_find_ptr => find;
    basis_mem_rfind, basis_mem_rfind_ptr => rfind;
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_mem_set(
    dst: *mut u8,
    dst_size: usize,
    value: u8,
    out: *mut *mut u8,
) -> u32 {
    guard(|| unsafe { put(out, sized::set(dst, dst_size, value)?) })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn basis_mem_set_ptr(
    dst: *mut u8,
    dst_end: *mut u8,
    value: u8,
    out: *mut *mut u8,
) -> u32 {
    guard(|| unsafe { put(out, bounded::set(dst, dst_end, value)?) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_except::ErrorKind;
    use core::ptr;

    #[test]
    fn both_forms_report_the_same_pointer() {
        let src = *b"ABCDE";
        let mut a = [0_u8; 5];
        let mut b = [0_u8; 5];
        let (mut ra, mut rb) = (ptr::null_mut(), ptr::null_mut());
        unsafe {
            assert_eq!(basis_mem_copy(a.as_mut_ptr(), 5, src.as_ptr(), 5, &mut ra), 0);
            let pb = b.as_mut_ptr();
            assert_eq!(
                basis_mem_copy_ptr(pb, pb.add(5), src.as_ptr(), src.as_ptr().add(5), &mut rb),
                0
            );
        }
        assert_eq!(a, b);
        assert_eq!(ra, a.as_mut_ptr().wrapping_add(5));
        assert_eq!(rb, b.as_mut_ptr().wrapping_add(5));
    }

    #[test]
    fn errors_become_codes() {
        let mut out = ptr::null();
        let buf = [0_u8; 4];
        let p = buf.as_ptr();
        unsafe {
            let code = basis_mem_find_ptr(p.add(4), p, p, p.add(1), &mut out);
            assert_eq!(code, ErrorKind::InvalidMemoryRange.code());
            let code = basis_mem_compare(ptr::null(), 0, p, 4, &mut out);
            assert_eq!(code, ErrorKind::NullPointer.code());
            let code = basis_mem_find(p, 4, p, 1, ptr::null_mut());
            assert_eq!(code, ErrorKind::NullPointer.code());
        }
    }
}
