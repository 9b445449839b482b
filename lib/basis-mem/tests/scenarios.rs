//! Literal end-to-end scenarios for the byte primitives.

use basis_except::{ErrorKind, try_catch, OrThrow};
use basis_mem::{bounded, sized};

#[test]
fn forward_copy() {
    let mut dst = [0_u8; 5];
    let src = *b"ABCDE";
    let end = unsafe { sized::copy(dst.as_mut_ptr(), 5, src.as_ptr(), 5) }.unwrap();
    assert_eq!(dst, [65, 66, 67, 68, 69]);
    assert_eq!(end, dst.as_mut_ptr().wrapping_add(5));
}

#[test]
fn min_bound_copy() {
    let mut dst = [0_u8; 3];
    let src = *b"HELLO";
    let end = unsafe { sized::copy(dst.as_mut_ptr(), 3, src.as_ptr(), 5) }.unwrap();
    assert_eq!(&dst, b"HEL");
    assert_eq!(end, dst.as_mut_ptr().wrapping_add(3));
}

#[test]
fn move_with_overlap_towards_higher_addresses() {
    let mut buf = *b"ABCDEFGHIJ";
    let p = buf.as_mut_ptr();
    unsafe { sized::move_bytes(p.add(4), 5, p.add(2), 5) }.unwrap();
    assert_eq!(&buf, b"ABCDCDEFGJ");
}

#[test]
fn reverse_byte_copy() {
    let src = [1_u8, 2, 3, 4];
    let mut dst = [0_u8; 4];
    unsafe { sized::copy_rev(dst.as_mut_ptr(), 4, src.as_ptr(), 4) }.unwrap();
    assert_eq!(dst, [4, 3, 2, 1]);
}

#[test]
fn pattern_tiling() {
    let mut dst = [0_u8; 7];
    let src = [0xAA_u8, 0xBB];
    unsafe { sized::set_pattern(dst.as_mut_ptr(), 7, src.as_ptr(), 2) }.unwrap();
    assert_eq!(dst, [0xAA, 0xBB, 0xAA, 0xBB, 0xAA, 0xBB, 0xAA]);
}

#[test]
fn reversed_pair_is_caught_as_invalid_range() {
    let buf = [0_u8; 8];
    let p = buf.as_ptr();
    let caught = try_catch::<*const u8>(|| unsafe {
        bounded::find(p.wrapping_add(8), p, p, p.wrapping_add(1)).or_throw()
    })
    .unwrap_err();
    assert_eq!(caught.kind(), ErrorKind::InvalidMemoryRange);
}

#[test]
fn null_source_is_caught() {
    let mut dst = [0_u8; 2];
    let caught = try_catch::<*mut u8>(|| unsafe {
        sized::copy(dst.as_mut_ptr(), 2, core::ptr::null(), 2).or_throw()
    })
    .unwrap_err();
    assert_eq!(caught.kind(), ErrorKind::NullPointer);
    assert_eq!(dst, [0, 0]);
}
