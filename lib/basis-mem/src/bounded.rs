//! Pointer-pair forms: every buffer is given as `(begin, end)`, `end`
//! exclusive.
//!
//! Each function derives sizes as `end - begin` and delegates to the
//! same-named function in [`sized`](crate::sized), so both forms agree on
//! identical inputs.

use crate::sized;
use basis_except::{ErrorKind, Result, ensure, exception};

/// Byte length of `[begin, end)`.
///
/// # Errors
/// * [`ErrorKind::NullPointer`] if `end` is null
/// * [`ErrorKind::InvalidMemoryRange`] if `end` precedes `begin`
#[inline]
pub fn span(begin: *const u8, end: *const u8) -> Result<usize> {
    ensure!(!end.is_null(), ErrorKind::NullPointer, "end");
    end.addr()
        .checked_sub(begin.addr())
        .ok_or_else(|| exception!(ErrorKind::InvalidMemoryRange, "end precedes begin"))
}

macro_rules! two_buffer {
    ($(#[$doc:meta])* $name:ident, $dst:ty, $src:ty, $ret:ty) => {
        $(#[$doc])*
        ///
        /// # Errors
        /// * [`ErrorKind::NullPointer`] if any pointer is null
        /// * [`ErrorKind::InvalidMemoryRange`] if an end precedes its begin
        ///
        /// # Safety
        #[doc = concat!("As [`sized::", stringify!($name), "`] for the derived sizes.")]
        pub unsafe fn $name(dst: $dst, dst_end: $dst, src: $src, src_end: $src) -> Result<$ret> {
            let dst_size = span(dst.cast_const(), dst_end.cast_const())?;
            let src_size = span(src, src_end)?;
            // Safety: forwarded from the caller.
            unsafe { sized::$name(dst, dst_size, src, src_size) }
        }
    };
}

two_buffer!(
    /// Forward copy; see [`sized::copy`].
    copy, *mut u8, *const u8, *mut u8
);
two_buffer!(
    /// Reversed-order copy; see [`sized::copy_rev`].
    copy_rev, *mut u8, *const u8, *mut u8
);
two_buffer!(
    /// Last-byte-first copy; see [`sized::rcopy`].
    rcopy, *mut u8, *const u8, *mut u8
);
two_buffer!(
    /// Overlap-safe copy; see [`sized::move_bytes`].
    move_bytes, *mut u8, *const u8, *mut u8
);
two_buffer!(
    /// Pattern fill; see [`sized::set_pattern`].
    set_pattern, *mut u8, *const u8, *mut u8
);

macro_rules! two_reads {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// # Errors
        /// * [`ErrorKind::NullPointer`] if any pointer is null
        /// * [`ErrorKind::InvalidMemoryRange`] if an end precedes its begin
        ///
        /// # Safety
        #[doc = concat!("As [`sized::", stringify!($name), "`] for the derived sizes.")]
        pub unsafe fn $name(
            lhs: *const u8,
            lhs_end: *const u8,
            rhs: *const u8,
            rhs_end: *const u8,
        ) -> Result<*const u8> {
            let lhs_size = span(lhs, lhs_end)?;
            let rhs_size = span(rhs, rhs_end)?;
            // Safety: forwarded from the caller.
            unsafe { sized::$name(lhs, lhs_size, rhs, rhs_size) }
        }
    };
}

two_reads!(
    /// First difference; see [`sized::compare`].
    compare
);
two_reads!(
    /// Last difference; see [`sized::rcompare`].
    rcompare
);
two_reads!(
    /// First occurrence; see [`sized::find`].
    find
);
two_reads!(
    /// Last occurrence; see [`sized::rfind`].
    rfind
);

/// Byte fill; see [`sized::set`].
///
/// # Errors
/// * [`ErrorKind::NullPointer`] if either pointer is null
/// * [`ErrorKind::InvalidMemoryRange`] if `dst_end` precedes `dst`
///
/// # Safety
/// As [`sized::set`] for the derived size.
pub unsafe fn set(dst: *mut u8, dst_end: *mut u8, value: u8) -> Result<*mut u8> {
    let dst_size = span(dst.cast_const(), dst_end.cast_const())?;
    // Safety: forwarded from the caller.
    unsafe { sized::set(dst, dst_size, value) }
}
