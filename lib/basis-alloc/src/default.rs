//! The per-thread default allocator handle.

use crate::Allocator;

basis_core::local_slot! {
    static DEFAULT: Allocator = Allocator::initial();
}

/// The calling thread's default handle.
#[must_use]
pub fn default_allocator() -> Allocator {
    DEFAULT.get()
}

/// Install `allocator` as the calling thread's default, returning the
/// previous one.
pub fn set_default_allocator(allocator: Allocator) -> Allocator {
    log::debug!("default allocator replaced with {allocator:?}");
    DEFAULT.replace(allocator)
}

/// Run `f` with `allocator` installed as the default, restoring the previous
/// handle afterwards (also when `f` unwinds).
pub fn with_default_allocator<R>(allocator: Allocator, f: impl FnOnce() -> R) -> R {
    struct Restore(Allocator);

    impl Drop for Restore {
        fn drop(&mut self) {
            DEFAULT.replace(self.0);
        }
    }

    let _restore = Restore(DEFAULT.replace(allocator));
    f()
}
