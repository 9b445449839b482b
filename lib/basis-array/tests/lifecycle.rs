//! Array lifecycle, failure surfacing and allocator-failure atomicity.

use basis_alloc::{Allocator, c_void};
use basis_array::{DynArray, ResizePolicy};
use basis_except::{ErrorKind, OrThrow, exception, throw, try_catch};
use std::cell::Cell;

thread_local! {
    static FAIL: Cell<bool> = const { Cell::new(false) };
    static THROW: Cell<bool> = const { Cell::new(false) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

unsafe extern "C-unwind" fn flaky_alloc(size: usize) -> *mut c_void {
    if FAIL.get() {
        return core::ptr::null_mut();
    }
    LIVE.set(LIVE.get() + 1);
    unsafe { libc::malloc(size) }
}

unsafe extern "C-unwind" fn tracked_free(ptr: *mut c_void) {
    LIVE.set(LIVE.get() - 1);
    unsafe { libc::free(ptr) }
}

fn flaky() -> Allocator {
    Allocator::new(flaky_alloc, tracked_free)
}

unsafe extern "C-unwind" fn throwing_alloc(size: usize) -> *mut c_void {
    if THROW.get() {
        throw(exception!(ErrorKind::Interrupt, "allocator refused"));
    }
    unsafe { flaky_alloc(size) }
}

#[test]
fn dynamic_array_lifecycle() {
    let mut a = DynArray::make_in(Allocator::stdlib(), 4, 3).unwrap();
    for (i, v) in [10_u32, 20, 30].into_iter().enumerate() {
        a.set_scalar(i, v).unwrap();
    }

    a.reserve(2).unwrap();
    assert!(a.capacity() >= 5);
    for (i, v) in [10_u32, 20, 30].into_iter().enumerate() {
        assert_eq!(a.get_scalar::<u32>(i), Ok(v));
    }

    a.resize(5).unwrap();
    assert_eq!(a.size(), 5);
    assert!(a.capacity() >= 5);
    for (i, v) in [10_u32, 20, 30].into_iter().enumerate() {
        assert_eq!(a.get_scalar::<u32>(i), Ok(v));
    }

    a.shrink().unwrap();
    assert_eq!(a.capacity(), 5);

    a.clear().unwrap();
    assert_eq!(a.size(), 0);
    assert_eq!(a.capacity(), 0);
    assert_eq!(a.element_size(), 4);
}

#[test]
fn out_of_range_reaches_the_handler() {
    let a = DynArray::make_in(Allocator::stdlib(), 4, 3).unwrap();
    let before = a.unpack();
    let caught = try_catch(|| a.at_from_front(a.size()).or_throw()).unwrap_err();
    assert_eq!(caught.kind(), ErrorKind::OutOfRange);
    assert_eq!(a.unpack(), before);
    assert_eq!(a.capacity(), 3);
}

#[test]
fn failed_growth_leaves_array_intact() {
    let mut a = DynArray::make_in(flaky(), 2, 2)
        .unwrap()
        .with_policy(ResizePolicy::Exact);
    a.set_scalar(0, 0xAAAA_u16).unwrap();
    a.set_scalar(1, 0xBBBB_u16).unwrap();
    let before = a.unpack();

    FAIL.set(true);
    assert_eq!(a.reserve(10).unwrap_err().kind(), ErrorKind::MemoryNotAllocated);
    assert_eq!(a.resize(1).unwrap_err().kind(), ErrorKind::MemoryNotAllocated);
    assert_eq!(a.push_scalar(1_u16).unwrap_err().kind(), ErrorKind::MemoryNotAllocated);
    assert_eq!(a.insert(0, &[0, 0]).unwrap_err().kind(), ErrorKind::MemoryNotAllocated);
    FAIL.set(false);

    assert_eq!(a.unpack(), before);
    assert_eq!(a.get_scalar::<u16>(0), Ok(0xAAAA));
    assert_eq!(a.get_scalar::<u16>(1), Ok(0xBBBB));
}

#[test]
fn drop_returns_every_block() {
    let start = LIVE.get();
    {
        let mut a = DynArray::new_in(flaky(), 8).unwrap();
        for v in 0_u64..100 {
            a.push_scalar(v).unwrap();
        }
        a.shrink().unwrap();
        assert_eq!(LIVE.get(), start + 1);
    }
    assert_eq!(LIVE.get(), start);
}

#[test]
fn missing_allocator_functions_surface() {
    let err = DynArray::make_in(Allocator::EMPTY, 4, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocatorFunctionNotInitialized);

    let mut a = DynArray::new_in(Allocator::EMPTY, 4).unwrap();
    assert_eq!(
        a.push_scalar(1_u32).unwrap_err().kind(),
        ErrorKind::AllocatorFunctionNotInitialized
    );
    assert!(a.is_empty());
}

#[test]
fn throw_from_allocator_reaches_the_handler() {
    let heap = Allocator::new(throwing_alloc, tracked_free);
    let start = LIVE.get();

    THROW.set(true);
    let caught = try_catch(|| DynArray::make_in(heap, 4, 1)).unwrap_err();
    THROW.set(false);
    assert_eq!(caught.kind(), ErrorKind::Interrupt);
    assert_eq!(caught.description(), Some("allocator refused"));
    assert_eq!(LIVE.get(), start);

    let mut a = DynArray::make_in(heap, 4, 2).unwrap();
    a.set_scalar(0, 11_u32).unwrap();
    a.set_scalar(1, 22_u32).unwrap();
    let before = a.unpack();

    THROW.set(true);
    let caught = try_catch(|| a.push_scalar(33_u32)).unwrap_err();
    THROW.set(false);
    assert_eq!(caught.kind(), ErrorKind::Interrupt);
    assert_eq!(a.unpack(), before);
    assert_eq!(a.capacity(), 2);
    assert_eq!(a.get_scalar::<u32>(1), Ok(22));

    a.push_scalar(33_u32).unwrap();
    assert_eq!(a.get_scalar::<u32>(2), Ok(33));
    drop(a);
    assert_eq!(LIVE.get(), start);
}
