//! # Allocated arrays
//!
//! The top two layers of the basis data model:
//!
//! * [`AllocatedRange`]: a [`TypedRange`](basis_range::TypedRange) whose block
//!   is owned and obtained from an [`Allocator`](basis_alloc::Allocator).
//! * [`DynArray`]: an allocated range plus a logical size, growing and
//!   shrinking through the allocator's `realloc`.
//!
//! A failed allocation never leaves an array half-modified: the old block and
//! the old size survive.
//!
//! ```rust
//! use basis_array::DynArray;
//!
//! let mut values = DynArray::make(4, 3)?;
//! for (i, v) in [10_u32, 20, 30].into_iter().enumerate() {
//!     values.set_scalar(i, v)?;
//! }
//! values.reserve(2)?;
//! assert!(values.capacity() >= 5);
//! assert_eq!(values.get_scalar::<u32>(2)?, 30);
//! # Ok::<(), basis_except::Exception>(())
//! ```

#![allow(unsafe_code)]

mod allocated;
mod array;

pub use allocated::AllocatedRange;
pub use array::{DynArray, ResizePolicy, Unpacked};
