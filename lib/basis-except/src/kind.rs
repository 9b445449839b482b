/// The closed set of failure kinds raised by the basis layers.
///
/// The discriminant is the stable numeric code reported across the C ABI and
/// as the "return value" of a non-local transfer; [`Ok`](Self::Ok) (`0`) means
/// no failure and is never raised.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[repr(u32)]
pub enum ErrorKind {
    #[error("ok")]
    Ok = 0,
    #[error("null pointer")]
    NullPointer = 1,
    #[error("arithmetic overflow")]
    Overflow = 2,
    #[error("interrupted")]
    Interrupt = 3,
    #[error("index or offset out of range")]
    OutOfRange = 4,
    #[error("invalid argument")]
    InvalidArgument = 5,
    #[error("invalid memory range")]
    InvalidMemoryRange = 6,
    #[error("value is not a power of two")]
    NotPowerOfTwo = 7,
    #[error("zero-byte allocation requested")]
    ZeroMemoryAllocate = 8,
    #[error("element size is zero")]
    ZeroElementSize = 9,
    #[error("size is not a multiple of the element size")]
    SizeNotMultipleOfElementSize = 10,
    #[error("element sizes differ")]
    DifferentElementSize = 11,
    #[error("memory not allocated")]
    MemoryNotAllocated = 12,
    #[error("size exceeds the addressable maximum")]
    ExceedsMaxSize = 13,
    #[error("allocator function not initialized")]
    AllocatorFunctionNotInitialized = 14,
    #[error("deallocator function not initialized")]
    DeallocatorFunctionNotInitialized = 15,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 16] = [
        Self::Ok,
        Self::NullPointer,
        Self::Overflow,
        Self::Interrupt,
        Self::OutOfRange,
        Self::InvalidArgument,
        Self::InvalidMemoryRange,
        Self::NotPowerOfTwo,
        Self::ZeroMemoryAllocate,
        Self::ZeroElementSize,
        Self::SizeNotMultipleOfElementSize,
        Self::DifferentElementSize,
        Self::MemoryNotAllocated,
        Self::ExceedsMaxSize,
        Self::AllocatorFunctionNotInitialized,
        Self::DeallocatorFunctionNotInitialized,
    ];

    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        if (code as usize) < Self::ALL.len() {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    /// Upper-case identifier, e.g. `"OUT_OF_RANGE"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NullPointer => "NULL_POINTER",
            Self::Overflow => "OVERFLOW",
            Self::Interrupt => "INTERRUPT",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidMemoryRange => "INVALID_MEMORY_RANGE",
            Self::NotPowerOfTwo => "NOT_POWER_OF_TWO",
            Self::ZeroMemoryAllocate => "ZERO_MEMORY_ALLOCATE",
            Self::ZeroElementSize => "ZERO_ELEMENT_SIZE",
            Self::SizeNotMultipleOfElementSize => "SIZE_NOT_MULTIPLE_OF_ELEMENT_SIZE",
            Self::DifferentElementSize => "DIFFERENT_ELEMENT_SIZE",
            Self::MemoryNotAllocated => "MEMORY_NOT_ALLOCATED",
            Self::ExceedsMaxSize => "EXCEEDS_MAX_SIZE",
            Self::AllocatorFunctionNotInitialized => "ALLOCATOR_FUNCTION_NOT_INITIALIZED",
            Self::DeallocatorFunctionNotInitialized => "DEALLOCATOR_FUNCTION_NOT_INITIALIZED",
        }
    }
}

impl From<ErrorKind> for u32 {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u32> for ErrorKind {
    type Error = u32;

    #[inline]
    fn try_from(code: u32) -> Result<Self, u32> {
        Self::from_code(code).ok_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dense_and_round_trip() {
        for (i, kind) in ErrorKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(ErrorKind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(ErrorKind::from_code(16), None);
        assert_eq!(ErrorKind::try_from(99), Err(99));
    }

    #[test]
    fn names_and_messages() {
        assert_eq!(ErrorKind::OutOfRange.name(), "OUT_OF_RANGE");
        assert_eq!(ErrorKind::OutOfRange.to_string(), "index or offset out of range");
        assert_eq!(ErrorKind::Ok.code(), 0);
    }
}
