//! # Failure protocol
//!
//! Every basis layer reports failure through one closed taxonomy,
//! [`ErrorKind`], wrapped in an [`Exception`] that may carry a description and,
//! in traced builds, the site it was raised at.
//!
//! Failures travel two ways:
//!
//! * **Explicit results.** Fallible operations return [`Result<T>`] and
//!   propagate with `?`. The lowest layer that detects a violated
//!   precondition raises with [`raise!`] or [`ensure!`]; intermediate layers
//!   never recover.
//! * **Catch frames.** [`try_catch`] installs a frame on a per-thread stack
//!   and runs a protected region; [`throw`] anywhere inside transfers control
//!   straight back to it with the exception in hand. [`OrThrow::or_throw`]
//!   turns an `Err` from the first style into a throw of the second.
//!
//! ```rust
//! use basis_except::{ErrorKind, OrThrow, Result, raise, try_catch};
//!
//! fn element(values: &[u32], i: usize) -> Result<u32> {
//!     if i >= values.len() {
//!         raise!(ErrorKind::OutOfRange);
//!     }
//!     Ok(values[i])
//! }
//!
//! let values = [10, 20, 30];
//! let caught = try_catch(|| element(&values, 3).or_throw());
//! assert_eq!(caught.unwrap_err().kind(), ErrorKind::OutOfRange);
//! ```
//!
//! ## Unwinding requirement
//!
//! Catch frames are built on unwinding, so binaries using [`throw`] must not
//! be compiled with `panic = "abort"`. Explicit results work either way.

mod exception;
mod frame;
mod kind;

pub use exception::{Exception, Trace};
pub use frame::{
    OrThrow, current_exception, depth, rethrow, throw, try_catch, try_catch_with,
};
pub use kind::ErrorKind;

#[doc(hidden)]
pub use basis_core as __core;

/// Result type used by every basis layer.
pub type Result<T, E = Exception> = core::result::Result<T, E>;
