//! Status codes and the per-thread last error.
//!
//! Every export returns the [`ErrorKind`] code of its outcome (`0` on
//! success). A failing call also records the exception; successful calls
//! leave the record alone, so it always describes the most recent failure.

use basis_except::{ErrorKind, Exception, Result, exception, try_catch};
use core::ffi::c_char;
use std::ffi::CString;
use std::panic::{self, AssertUnwindSafe};

struct LastError {
    code: u32,
    message: CString,
}

basis_core::local_slot! {
    static LAST: Option<LastError> = None;
}

fn record(exception: &Exception) -> u32 {
    let code = exception.code();
    let message = CString::new(exception.to_string()).unwrap_or_default();
    log::debug!("ffi call failed: {exception}");
    LAST.replace(Some(LastError { code, message }));
    code
}

/// Run an export body, mapping its outcome to a status code.
///
/// Thrown exceptions are caught like returned ones. Any other panic is
/// reported as [`ErrorKind::Interrupt`] and never crosses the ABI.
pub(crate) fn guard(body: impl FnOnce() -> Result<()>) -> u32 {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| try_catch(body)));
    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(thrown)) => Err(thrown),
        Err(_) => Err(exception!(ErrorKind::Interrupt, "panic in library code")),
    };
    match result {
        Ok(()) => ErrorKind::Ok.code(),
        Err(exception) => record(&exception),
    }
}

/// Store `value` through a required out-pointer.
///
/// # Safety
/// A non-null `out` must be valid for writes.
pub(crate) unsafe fn put<T>(out: *mut T, value: T) -> Result<()> {
    basis_except::ensure!(!out.is_null(), ErrorKind::NullPointer, "out-pointer");
    // Safety: forwarded from the caller.
    unsafe { out.write(value) };
    Ok(())
}

/// Store `value` through an optional out-pointer; null is skipped.
///
/// # Safety
/// A non-null `out` must be valid for writes.
pub(crate) unsafe fn put_opt<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // Safety: forwarded from the caller.
        unsafe { out.write(value) };
    }
}

/// Borrow a required in-pointer.
///
/// # Safety
/// A non-null `p` must point to a live `T` for `'a`.
pub(crate) unsafe fn get<'a, T>(p: *const T) -> Result<&'a T> {
    // Safety: forwarded from the caller.
    unsafe { p.as_ref() }.ok_or_else(|| exception!(ErrorKind::NullPointer, "argument"))
}

/// Mutably borrow a required in-pointer.
///
/// # Safety
/// A non-null `p` must point to a live `T`, not otherwise accessed for `'a`.
pub(crate) unsafe fn get_mut<'a, T>(p: *mut T) -> Result<&'a mut T> {
    // Safety: forwarded from the caller.
    unsafe { p.as_mut() }.ok_or_else(|| exception!(ErrorKind::NullPointer, "argument"))
}

/// Code of the calling thread's most recent failure, or `0` if none.
#[unsafe(no_mangle)]
pub extern "C" fn basis_last_error() -> u32 {
    LAST.with(|last| last.as_ref().map_or(0, |e| e.code))
}

/// Description of the calling thread's most recent failure, or null.
///
/// The string stays valid until the next failing call on this thread or
/// [`basis_clear_error`].
#[unsafe(no_mangle)]
pub extern "C" fn basis_last_error_message() -> *const c_char {
    LAST.with(|last| last.as_ref().map_or(core::ptr::null(), |e| e.message.as_ptr()))
}

#[unsafe(no_mangle)]
pub extern "C" fn basis_clear_error() {
    LAST.replace(None);
}

/// The library version packed as `major << 32 | minor << 16 | patch`.
#[unsafe(no_mangle)]
pub extern "C" fn basis_version() -> u64 {
    basis_core::VERSION.as_u64()
}
