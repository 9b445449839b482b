//! # Allocator handle
//!
//! An [`Allocator`] is a `#[repr(C)]` pair of optional function pointers,
//! allocate and deallocate, so foreign code can plug its own heap into every
//! basis data structure. The checked wrappers never call through a missing
//! function and never hand out a null block:
//!
//! | Operation | Fails with |
//! |-----------|------------|
//! | [`alloc`] / [`Allocator::alloc`] | `NULL_POINTER` (no handle), `ZERO_MEMORY_ALLOCATE`, `ALLOCATOR_FUNCTION_NOT_INITIALIZED`, `MEMORY_NOT_ALLOCATED` |
//! | [`free`] / [`Allocator::free`] | `NULL_POINTER` (no handle), `DEALLOCATOR_FUNCTION_NOT_INITIALIZED` |
//! | [`realloc`] / [`Allocator::realloc`] | any of the above; the old block survives every failure |
//!
//! Each thread has a default handle ([`default_allocator`]). It starts out as
//! the C library's `malloc`/`free` when the `stdlib-allocator` feature of
//! `basis-core` is enabled and empty otherwise.
//!
//! ```rust
//! use basis_alloc::Allocator;
//!
//! let heap = Allocator::stdlib();
//! let block = heap.alloc(16).unwrap();
//! let block = unsafe { heap.realloc(block.as_ptr(), 16, 64) }.unwrap();
//! unsafe { heap.free(block) }.unwrap();
//! ```

mod default;
mod handle;

pub use default::{default_allocator, set_default_allocator, with_default_allocator};
pub use handle::{AllocFn, Allocator, DeallocFn, alloc, free, realloc};
pub use libc::c_void;
