//! The catch-frame stack.
//!
//! A catch frame is an exception slot plus the point control returns to when
//! something is thrown while the frame is the innermost one. Frames form a
//! LIFO stack held in a [`LocalSlot`](basis_core::LocalSlot): per thread by
//! default, process-wide when thread-local storage is configured off.
//!
//! The transfer itself is an unwind carrying a private payload that names the
//! target frame. [`try_catch`] installs the frame, runs the protected region
//! and pops the frame again, on normal exit and on unwind alike.

use crate::{ErrorKind, Exception, Result};
use std::panic::{self, AssertUnwindSafe};

struct CatchFrame {
    id: u64,
    slot: Option<Exception>,
}

struct FrameStack {
    frames: Vec<CatchFrame>,
    /// Exceptions whose handlers are currently running, innermost last.
    handling: Vec<Exception>,
    next_id: u64,
}

impl FrameStack {
    const fn new() -> Self {
        Self {
            frames: Vec::new(),
            handling: Vec::new(),
            next_id: 1,
        }
    }
}

basis_core::local_slot! {
    static STACK: FrameStack = FrameStack::new();
}

/// Unwind payload; identifies the frame whose slot holds the exception.
struct Thrown {
    frame: u64,
}

fn push_frame() -> u64 {
    STACK.with(|stack| {
        let id = stack.next_id;
        stack.next_id = stack.next_id.wrapping_add(1);
        stack.frames.push(CatchFrame { id, slot: None });
        id
    })
}

/// Pop frames down to and including `id`, returning its slot.
fn pop_frame(id: u64) -> Option<Exception> {
    STACK.with(|stack| {
        while let Some(frame) = stack.frames.pop() {
            if frame.id == id {
                return frame.slot;
            }
        }
        None
    })
}

/// Run `body` under a new catch frame.
///
/// Returns `Ok` with the body's value on normal exit, or `Err` with the
/// exception thrown (via [`throw`], [`rethrow`] or [`OrThrow::or_throw`])
/// anywhere inside it. Panics that are not throws pass through unchanged.
///
/// ```rust
/// # use basis_except::{try_catch, throw, exception, ErrorKind};
/// let r = try_catch::<u32>(|| throw(exception!(ErrorKind::Overflow)));
/// assert_eq!(r.unwrap_err().kind(), ErrorKind::Overflow);
/// ```
pub fn try_catch<R>(body: impl FnOnce() -> R) -> Result<R> {
    let id = push_frame();
    let outcome = panic::catch_unwind(AssertUnwindSafe(body));
    let slot = pop_frame(id);
    match outcome {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Thrown>() {
            Ok(thrown) if thrown.frame == id => {
                Err(slot.unwrap_or_else(|| Exception::new(ErrorKind::Interrupt)))
            }
            Ok(thrown) => panic::resume_unwind(thrown),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Run `body` under a new catch frame and pass a thrown exception to
/// `handler`.
///
/// While `handler` runs, the exception is the *current* one: [`rethrow`]
/// re-raises it to the next enclosing frame.
pub fn try_catch_with<R>(body: impl FnOnce() -> R, handler: impl FnOnce(&Exception) -> R) -> R {
    match try_catch(body) {
        Ok(value) => value,
        Err(exception) => {
            let _handling = Handling::enter(exception.clone());
            handler(&exception)
        }
    }
}

/// Keeps an exception on the handling stack for the duration of a handler.
struct Handling;

impl Handling {
    fn enter(exception: Exception) -> Self {
        STACK.with(|stack| stack.handling.push(exception));
        Self
    }
}

impl Drop for Handling {
    fn drop(&mut self) {
        STACK.with(|stack| {
            stack.handling.pop();
        });
    }
}

/// Transfer control to the innermost catch frame, storing `exception` in its
/// slot.
///
/// With no frame installed the exception is logged and the process aborts.
pub fn throw(exception: Exception) -> ! {
    log::debug!("throw {exception}");
    let delivered = STACK.with(|stack| match stack.frames.last_mut() {
        Some(frame) => {
            frame.slot = Some(exception);
            Ok(frame.id)
        }
        None => Err(exception),
    });
    match delivered {
        Ok(frame) => panic::resume_unwind(Box::new(Thrown { frame })),
        Err(exception) => {
            log::error!("uncaught exception {exception}; aborting");
            std::process::abort()
        }
    }
}

/// Re-raise the exception currently being handled.
///
/// Outside a handler this raises [`ErrorKind::InvalidArgument`] instead.
pub fn rethrow() -> ! {
    match current_exception() {
        Some(exception) => throw(exception),
        None => throw(crate::exception!(
            ErrorKind::InvalidArgument,
            "rethrow without an exception being handled"
        )),
    }
}

/// The exception whose handler is currently running, if any.
#[must_use]
pub fn current_exception() -> Option<Exception> {
    STACK.with(|stack| stack.handling.last().cloned())
}

/// Number of installed catch frames.
#[must_use]
pub fn depth() -> usize {
    STACK.with(|stack| stack.frames.len())
}

/// Bridge from explicit results to the catch-frame protocol.
pub trait OrThrow<T> {
    /// Unwrap the value or [`throw`] the error.
    fn or_throw(self) -> T;
}

impl<T> OrThrow<T> for Result<T> {
    #[inline]
    fn or_throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(exception) => throw(exception),
        }
    }
}

impl<T> OrThrow<T> for core::result::Result<T, ErrorKind> {
    #[inline]
    fn or_throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(kind) => throw(Exception::new(kind)),
        }
    }
}
