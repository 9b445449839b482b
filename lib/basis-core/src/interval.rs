//! Interval membership and clamping.

/// `lo <= value <= hi`.
#[inline]
#[must_use]
pub fn in_closed<T: PartialOrd>(value: &T, lo: &T, hi: &T) -> bool {
    lo <= value && value <= hi
}

/// `lo <= value < hi`.
#[inline]
#[must_use]
pub fn in_half_open<T: PartialOrd>(value: &T, lo: &T, hi: &T) -> bool {
    lo <= value && value < hi
}

/// `lo < value < hi`.
#[inline]
#[must_use]
pub fn in_open<T: PartialOrd>(value: &T, lo: &T, hi: &T) -> bool {
    lo < value && value < hi
}

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike [`Ord::clamp`] this does not panic when `lo > hi`; the lower bound
/// wins in that case.
#[inline]
#[must_use]
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        if hi < lo { lo } else { hi }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        assert!(in_closed(&3, &3, &5));
        assert!(in_closed(&5, &3, &5));
        assert!(!in_half_open(&5, &3, &5));
        assert!(in_half_open(&3, &3, &5));
        assert!(!in_open(&3, &3, &5));
        assert!(in_open(&4, &3, &5));
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp(1, 3, 5), 3);
        assert_eq!(clamp(4, 3, 5), 4);
        assert_eq!(clamp(9, 3, 5), 5);
        assert_eq!(clamp(9, 5, 3), 5);
        assert!((clamp(0.5_f64, 1.0, 2.0) - 1.0).abs() < f64::EPSILON);
    }
}
