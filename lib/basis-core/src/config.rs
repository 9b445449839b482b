//! Compile-time configuration.
//!
//! Every switch is a Cargo feature of this crate; the other layers read the
//! constants below instead of testing features themselves, so enabling a
//! feature here reconfigures the whole workspace.

/// Capture `(timestamp, file, line, function)` into raised exceptions.
///
/// On in debug builds, or in any build with the `trace` feature.
pub const TRACE: bool = cfg!(any(debug_assertions, feature = "trace"));

/// Let the dynamic array change its logical size in place when the new size
/// fits the current capacity, instead of reallocating to the exact size.
pub const ARRAY_OPTIMIZE_RESIZE: bool = cfg!(feature = "optimize-resize");

/// Keep the catch-frame stack and the default allocator per thread.
///
/// When off, both degrade to a single process-wide slot and the library must
/// only be used from one thread at a time.
pub const THREAD_LOCAL: bool = cfg!(feature = "thread-local");

/// Pre-wire the default allocator handle to the C library's `malloc`/`free`.
///
/// When off, the default handle starts out empty and every use raises the
/// corresponding "function not initialized" error until one is installed.
pub const RUNTIME_ALLOCATOR_USE_STDLIB: bool = cfg!(feature = "stdlib-allocator");
