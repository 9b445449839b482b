//! # Basis Core
//!
//! Ambient definitions shared by every layer of the `basis` workspace: the
//! numeric model, a typed address wrapper, compile-time configuration and the
//! per-thread state slot used by the failure protocol and the default
//! allocator.
//!
//! ## Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`types`] | Fixed-width aliases (`UAddr`, `SAddr`, `SSize`, `UChar`) and the sealed [`Scalar`] element trait. |
//! | [`Address`] | `#[repr(transparent)]` wrapper over an unsigned address with alignment helpers. |
//! | [`interval`] | Closed and half-open interval membership and clamping. |
//! | [`config`] | The four compile-time switches (`TRACE`, `ARRAY_OPTIMIZE_RESIZE`, `THREAD_LOCAL`, `RUNTIME_ALLOCATOR_USE_STDLIB`). |
//! | [`local`] | [`LocalSlot`], a value that is per-thread or process-wide depending on [`config::THREAD_LOCAL`]. |
//! | [`Version`] | The library version record. |
//!
//! ## Address arithmetic
//!
//! All range arithmetic in the upper layers goes through [`Address`], which is
//! computed on unsigned integers so that distances never rely on signed pointer
//! offsets:
//!
//! ```rust
//! # use basis_core::Address;
//! let a = Address::new(0x1234);
//! assert_eq!(a.align_down(0x100), Some(Address::new(0x1200)));
//! assert_eq!(a.align_up(0x100), Some(Address::new(0x1300)));
//! assert_eq!(Address::new(0x1300).distance_from(a), Some(0xCC));
//! ```

#![allow(unsafe_code, clippy::inline_always)]

mod address;
pub mod config;
pub mod interval;
pub mod local;
pub mod types;
mod version;

pub use address::Address;
pub use local::{LocalSlot, SpinCell};
pub use types::{SAddr, SSize, Scalar, UAddr, UChar};
pub use version::{VERSION, Version};

/// Returns `true` if `value` is a non-zero power of two.
#[inline]
#[must_use]
pub const fn is_power_of_two(value: usize) -> bool {
    value != 0 && (value & (value - 1)) == 0
}

/// Smallest power of two `>= value`, or `None` on overflow.
///
/// `0` maps to `1`.
#[inline]
#[must_use]
pub const fn next_power_of_two(value: usize) -> Option<usize> {
    value.checked_next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_detection() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(2));
        assert!(!is_power_of_two(3));
        assert!(is_power_of_two(4096));
        assert!(!is_power_of_two(usize::MAX));
    }

    #[test]
    fn next_power_of_two_rounds_up() {
        assert_eq!(next_power_of_two(0), Some(1));
        assert_eq!(next_power_of_two(5), Some(8));
        assert_eq!(next_power_of_two(8), Some(8));
        assert_eq!(next_power_of_two(usize::MAX), None);
    }
}
