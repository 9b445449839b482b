//! # C ABI
//!
//! Exports the basis layers as `extern "C"` symbols for use from a shared
//! object. Conventions:
//!
//! * Every function returns a status: `0` on success, otherwise the
//!   [`ErrorKind`](basis_except::ErrorKind) code of the failure.
//! * Results are written through trailing out-pointers. A null required
//!   out-pointer fails with `NULL_POINTER`.
//! * The most recent failure on the calling thread is available from
//!   [`basis_last_error`] and [`basis_last_error_message`].
//! * No panic or thrown exception ever unwinds into the caller.
//!
//! | Prefix | Layer |
//! |--------|-------|
//! | `basis_alloc`, `basis_free`, `basis_realloc`, `basis_*_default_allocator` | allocator handle |
//! | `basis_mem_*` | raw primitives (`*_ptr` for pointer-pair form) |
//! | `basis_range_*`, `basis_typed_range_*` | ranges |
//! | `basis_array_*` | dynamic array (opaque handle) |

#![allow(unsafe_code, clippy::missing_safety_doc)]

mod alloc;
mod array;
mod mem;
mod range;
mod status;

pub use status::{basis_clear_error, basis_last_error, basis_last_error_message, basis_version};
