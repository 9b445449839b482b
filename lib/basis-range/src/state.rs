use core::fmt;

/// Classification of a `(begin, end)` pair.
///
/// The six cases are disjoint and cover every pair; only the first three are
/// valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RangeState {
    /// `begin` and `end` are both null.
    Uninitialized = 0,
    /// `begin == end`, non-null.
    Empty = 1,
    /// `begin < end`, both non-null.
    HasData = 2,
    /// `begin` is null, `end` is not.
    InvalidNullBegin = 3,
    /// `end` is null, `begin` is not.
    InvalidNullEnd = 4,
    /// `begin > end`.
    InvalidDangling = 5,
}

impl RangeState {
    #[must_use]
    pub fn classify(begin: *const u8, end: *const u8) -> Self {
        match (begin.is_null(), end.is_null()) {
            (true, true) => Self::Uninitialized,
            (true, false) => Self::InvalidNullBegin,
            (false, true) => Self::InvalidNullEnd,
            (false, false) => match begin.addr().cmp(&end.addr()) {
                core::cmp::Ordering::Equal => Self::Empty,
                core::cmp::Ordering::Less => Self::HasData,
                core::cmp::Ordering::Greater => Self::InvalidDangling,
            },
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Uninitialized | Self::Empty | Self::HasData)
    }
}

impl fmt::Display for RangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Empty => "empty",
            Self::HasData => "has data",
            Self::InvalidNullBegin => "invalid (null begin)",
            Self::InvalidNullEnd => "invalid (null end)",
            Self::InvalidDangling => "invalid (end before begin)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pair_shape_is_classified() {
        let buf = [0_u8; 2];
        let p = buf.as_ptr();
        let q = p.wrapping_add(1);
        let null = core::ptr::null();
        assert_eq!(RangeState::classify(null, null), RangeState::Uninitialized);
        assert_eq!(RangeState::classify(p, p), RangeState::Empty);
        assert_eq!(RangeState::classify(p, q), RangeState::HasData);
        assert_eq!(RangeState::classify(null, q), RangeState::InvalidNullBegin);
        assert_eq!(RangeState::classify(p, null), RangeState::InvalidNullEnd);
        assert_eq!(RangeState::classify(q, p), RangeState::InvalidDangling);
    }

    #[test]
    fn validity() {
        assert!(RangeState::Empty.is_valid());
        assert!(!RangeState::InvalidDangling.is_valid());
    }
}
