//! # Raw byte primitives
//!
//! Forward and reverse copy, move, fill, compare and search over caller
//! buffers, in two equivalent calling conventions:
//!
//! | Module      | Buffer given as           |
//! |-------------|---------------------------|
//! | [`sized`]   | `(pointer, size)`         |
//! | [`bounded`] | `(begin, end)`, exclusive |
//!
//! Every two-buffer operation touches exactly `min(size_a, size_b)` bytes, so
//! neither side is overrun. Failures come back as [`basis_except::Exception`].
//!
//! ```rust
//! use basis_mem::sized;
//!
//! let src = *b"HELLO";
//! let mut dst = [0_u8; 3];
//! let end = unsafe { sized::copy(dst.as_mut_ptr(), 3, src.as_ptr(), 5) }?;
//! assert_eq!(&dst, b"HEL");
//! assert_eq!(end, dst.as_mut_ptr().wrapping_add(3));
//! # Ok::<(), basis_except::Exception>(())
//! ```

#![allow(unsafe_code)]

pub mod bounded;
pub mod sized;
