use crate::ErrorKind;
use std::borrow::Cow;
use std::fmt;
use std::time::SystemTime;

/// Where and when an exception was raised.
///
/// Only attached when [`config::TRACE`](basis_core::config::TRACE) holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Trace {
    pub timestamp: SystemTime,
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl Trace {
    #[must_use]
    pub fn capture(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// A raised failure: kind, optional description, optional capture site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    kind: ErrorKind,
    description: Option<Cow<'static, str>>,
    trace: Option<Trace>,
}

impl Exception {
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            description: None,
            trace: None,
        }
    }

    /// Constructor used by [`exception!`](crate::exception).
    #[doc(hidden)]
    #[must_use]
    pub const fn raised(
        kind: ErrorKind,
        description: Option<Cow<'static, str>>,
        trace: Option<Trace>,
    ) -> Self {
        Self {
            kind,
            description,
            trace,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.kind.code()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Transfer control to the innermost catch frame.
    ///
    /// See [`throw`](crate::throw).
    pub fn throw(self) -> ! {
        crate::throw(self)
    }
}

impl From<ErrorKind> for Exception {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        if let Some(trace) = &self.trace {
            write!(f, " at {trace}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Exception {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Path of the enclosing function, e.g. `my_crate::module::function`.
#[doc(hidden)]
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __name_of(__here);
        match name.strip_suffix("::__here") {
            Some(stripped) => stripped,
            None => name,
        }
    }};
}

/// Capture the call site if tracing is configured.
#[doc(hidden)]
#[macro_export]
macro_rules! trace_here {
    () => {
        if $crate::__core::config::TRACE {
            ::core::option::Option::Some($crate::Trace::capture(
                ::core::file!(),
                ::core::line!(),
                $crate::function_name!(),
            ))
        } else {
            ::core::option::Option::None
        }
    };
}

/// Build an [`Exception`] of the given kind, capturing the call site in
/// traced builds.
///
/// ```rust
/// # use basis_except::{exception, ErrorKind};
/// let e = exception!(ErrorKind::OutOfRange, "index 3 >= size 3");
/// assert_eq!(e.kind(), ErrorKind::OutOfRange);
/// assert_eq!(e.description(), Some("index 3 >= size 3"));
/// ```
#[macro_export]
macro_rules! exception {
    ($kind:expr) => {
        $crate::Exception::raised($kind, ::core::option::Option::None, $crate::trace_here!())
    };
    ($kind:expr, $description:expr) => {
        $crate::Exception::raised(
            $kind,
            ::core::option::Option::Some(::std::borrow::Cow::from($description)),
            $crate::trace_here!(),
        )
    };
}

/// Return early with an [`Exception`] of the given kind.
#[macro_export]
macro_rules! raise {
    ($kind:expr) => {
        return ::core::result::Result::Err($crate::exception!($kind))
    };
    ($kind:expr, $description:expr) => {
        return ::core::result::Result::Err($crate::exception!($kind, $description))
    };
}

/// Raise unless `cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:expr) => {
        if !($cond) {
            $crate::raise!($kind);
        }
    };
    ($cond:expr, $kind:expr, $description:expr) => {
        if !($cond) {
            $crate::raise!($kind, $description);
        }
    };
}
