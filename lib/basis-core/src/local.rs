//! Per-thread state with a process-wide fallback.
//!
//! The failure protocol's catch-frame stack and the default allocator handle
//! live in a [`LocalSlot`]. With [`THREAD_LOCAL`](crate::config::THREAD_LOCAL)
//! on, every thread sees its own value; with it off, all threads share one
//! value behind a [`SpinCell`].
//!
//! ```rust
//! basis_core::local_slot! {
//!     static COUNTER: u32 = 0;
//! }
//!
//! COUNTER.with(|c| *c += 1);
//! assert_eq!(COUNTER.with(|c| *c), 1);
//! ```

use crate::config;
use core::cell::{RefCell, UnsafeCell};
use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, Ordering};
use std::thread::LocalKey;

/// A value guarded by a test-and-test-and-set spin lock.
///
/// Access is closure-scoped; the closure must not re-enter the same cell.
pub struct SpinCell<T> {
    /// * `false`: unlocked
    /// * `true`: locked
    locked: AtomicBool,
    inner: UnsafeCell<T>,
}

// Safety: mutual exclusion; only T: Send may cross threads.
unsafe impl<T: Send> Sync for SpinCell<T> {}

impl<T> SpinCell<T> {
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            inner: UnsafeCell::new(inner),
        }
    }

    /// Run `f` with exclusive access to the value.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.acquire();
        let _release = Release(&self.locked);
        // Safety: the lock is held until `_release` drops.
        f(unsafe { &mut *self.inner.get() })
    }

    /// Mutable access when you have `&mut self` (no contention possible).
    #[inline]
    pub const fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    fn acquire(&self) {
        while self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
    }
}

/// Unlocks on drop, including during unwinding.
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A value that is per-thread or process-wide depending on configuration.
///
/// Declare instances with [`local_slot!`](crate::local_slot).
pub struct LocalSlot<T: 'static> {
    per_thread: &'static LocalKey<RefCell<T>>,
    shared: &'static SpinCell<T>,
}

impl<T: 'static> LocalSlot<T> {
    #[doc(hidden)]
    pub const fn new(
        per_thread: &'static LocalKey<RefCell<T>>,
        shared: &'static SpinCell<T>,
    ) -> Self {
        Self { per_thread, shared }
    }

    /// Run `f` with exclusive access to the calling thread's value (or the
    /// shared value when thread-local storage is disabled).
    ///
    /// `f` must not access the same slot again.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        if config::THREAD_LOCAL {
            self.per_thread.with(|cell| f(&mut cell.borrow_mut()))
        } else {
            self.shared.with(f)
        }
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.with(|slot| core::mem::replace(slot, value))
    }
}

impl<T: Copy + 'static> LocalSlot<T> {
    /// Copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.with(|slot| *slot)
    }
}

/// Declare a [`LocalSlot`] static.
///
/// The initializer must be a constant expression.
#[macro_export]
macro_rules! local_slot {
    ($(#[$attr:meta])* $vis:vis static $name:ident: $ty:ty = $init:expr;) => {
        $(#[$attr])*
        $vis static $name: $crate::LocalSlot<$ty> = {
            ::std::thread_local! {
                static PER_THREAD: ::core::cell::RefCell<$ty> =
                    const { ::core::cell::RefCell::new($init) };
            }
            static SHARED: $crate::SpinCell<$ty> = $crate::SpinCell::new($init);
            $crate::LocalSlot::new(&PER_THREAD, &SHARED)
        };
    };
}
