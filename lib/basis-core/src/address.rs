use crate::UAddr;
use core::fmt;
use core::ops::{Add, AddAssign};
use core::ptr::NonNull;

/// A raw, unsigned memory address.
///
/// Range arithmetic (sizes, distances, containment) is performed on this type
/// rather than on pointers, so it never depends on signed offsets between
/// unrelated allocations.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address(UAddr);

impl Address {
    /// The null address.
    pub const NULL: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn new(value: UAddr) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr.addr())
    }

    #[inline]
    #[must_use]
    pub fn from_nonnull<T>(ptr: NonNull<T>) -> Self {
        Self::from_ptr(ptr.as_ptr())
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> UAddr {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// `self + offset`, or `None` if the sum wraps around the address space.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, offset: usize) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Unsigned distance `self - origin`, or `None` if `self` precedes `origin`.
    #[inline]
    #[must_use]
    pub const fn distance_from(self, origin: Self) -> Option<usize> {
        self.0.checked_sub(origin.0)
    }

    /// Returns `true` if the address is a multiple of `align`.
    ///
    /// Returns `None` if `align` is not a power of two.
    #[inline]
    #[must_use]
    pub const fn is_aligned(self, align: usize) -> Option<bool> {
        if !crate::is_power_of_two(align) {
            return None;
        }
        Some(self.0 & (align - 1) == 0)
    }

    /// Align down to `align` (must be a power of two).
    #[inline]
    #[must_use]
    pub const fn align_down(self, align: usize) -> Option<Self> {
        if !crate::is_power_of_two(align) {
            return None;
        }
        Some(Self(self.0 & !(align - 1)))
    }

    /// Align up to `align` (must be a power of two), `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn align_up(self, align: usize) -> Option<Self> {
        if !crate::is_power_of_two(align) {
            return None;
        }
        match self.0.checked_add(align - 1) {
            Some(v) => Some(Self(v & !(align - 1))),
            None => None,
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#018X})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018X}", self.0)
    }
}

impl From<UAddr> for Address {
    #[inline]
    fn from(v: UAddr) -> Self {
        Self::new(v)
    }
}

impl From<Address> for UAddr {
    #[inline]
    fn from(a: Address) -> Self {
        a.as_usize()
    }
}

impl<T> From<*const T> for Address {
    #[inline]
    fn from(ptr: *const T) -> Self {
        Self::from_ptr(ptr)
    }
}

impl<T> From<*mut T> for Address {
    #[inline]
    fn from(ptr: *mut T) -> Self {
        Self::from_ptr(ptr.cast_const())
    }
}

impl Add<usize> for Address {
    type Output = Self;
    #[inline]
    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<usize> for Address {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        self.0 += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_round_trip_keeps_address() {
        let buf = [0_u8; 4];
        let a = Address::from_ptr(buf.as_ptr());
        assert_eq!(a.as_usize(), buf.as_ptr() as usize);
        assert!(!a.is_null());
        assert!(Address::NULL.is_null());
    }

    #[test]
    fn alignment_helpers() {
        let a = Address::new(0x12345);
        assert_eq!(a.align_down(0x1000), Some(Address::new(0x12000)));
        assert_eq!(a.align_up(0x1000), Some(Address::new(0x13000)));
        assert_eq!(a.is_aligned(1), Some(true));
        assert_eq!(a.is_aligned(2), Some(false));
        assert_eq!(Address::new(0x12000).is_aligned(0x1000), Some(true));
        assert_eq!(a.is_aligned(3), None);
        assert_eq!(a.align_down(0), None);
        assert_eq!(Address::new(usize::MAX).align_up(16), None);
    }

    #[test]
    fn distance_is_unsigned() {
        let lo = Address::new(0x100);
        let hi = Address::new(0x180);
        assert_eq!(hi.distance_from(lo), Some(0x80));
        assert_eq!(lo.distance_from(hi), None);
        assert_eq!(Address::new(usize::MAX).checked_add(1), None);
    }

    #[test]
    fn formatting() {
        let a = Address::new(0xAB);
        assert_eq!(format!("{a}"), "0x00000000000000AB");
        assert_eq!(format!("{a:?}"), "Address(0x00000000000000AB)");
    }
}
