//! # Byte ranges
//!
//! Two layered views over caller memory:
//!
//! * [`Range`]: an untyped `[begin, end)` pair, classified into one of six
//!   [`RangeState`]s, with indexing, slicing, containment and the content
//!   operations of [`basis_mem`] bounded by both operands.
//! * [`TypedRange`]: a `Range` plus an element size, indexed element-wise.
//!
//! Neither type owns memory. Content operations are `unsafe` because the
//! caller vouches that the described bytes are live.
//!
//! ```rust
//! use basis_range::{Range, RangeState};
//!
//! let mut buf = *b"hello world";
//! let r = Range::from_mut_slice(&mut buf);
//! assert_eq!(r.state(), RangeState::HasData);
//!
//! let word = r.slice(6, 5)?;
//! unsafe { word.copy(b"WORLD")? };
//! assert_eq!(&buf, b"hello WORLD");
//! # Ok::<(), basis_except::Exception>(())
//! ```

#![allow(unsafe_code)]

mod into;
mod range;
mod state;
mod typed;

pub use into::IntoRange;
pub use range::Range;
pub use state::RangeState;
pub use typed::TypedRange;
