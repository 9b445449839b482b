//! Fixed-width numeric model.
//!
//! Rust already provides exact-width integers (`u8`…`u64`, `i8`…`i64`) and
//! platform words (`usize`, `isize`). The aliases below name the remaining
//! roles the memory layers rely on.

use core::fmt::Debug;

/// Unsigned integer wide enough to hold any pointer.
pub type UAddr = usize;

/// Signed integer wide enough to hold any pointer.
pub type SAddr = isize;

/// Signed platform word.
pub type SSize = isize;

/// Exact-byte unsigned integer used by the byte primitives.
pub type UChar = u8;

const _: () = assert!(size_of::<UAddr>() == size_of::<*const ()>());
const _: () = assert!(size_of::<UChar>() == 1);

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value that can be stored as raw element bytes.
///
/// Implemented for the primitive integers and floats, whose every bit pattern
/// is a valid value. Used for typed access to byte-addressed elements.
pub trait Scalar: sealed::Sealed + Copy + PartialEq + Debug + 'static {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Decode from exactly [`SIZE`](Self::SIZE) native-endian bytes.
    ///
    /// Returns `None` if `bytes` has the wrong length.
    fn from_ne_slice(bytes: &[u8]) -> Option<Self>;

    /// Encode into exactly [`SIZE`](Self::SIZE) native-endian bytes.
    ///
    /// Returns `false` (and writes nothing) if `out` has the wrong length.
    fn write_ne_slice(self, out: &mut [u8]) -> bool;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            const SIZE: usize = size_of::<$t>();

            #[inline]
            fn from_ne_slice(bytes: &[u8]) -> Option<Self> {
                let raw: [u8; size_of::<$t>()] = bytes.try_into().ok()?;
                Some(<$t>::from_ne_bytes(raw))
            }

            #[inline]
            fn write_ne_slice(self, out: &mut [u8]) -> bool {
                if out.len() != Self::SIZE {
                    return false;
                }
                out.copy_from_slice(&self.to_ne_bytes());
                true
            }
        }
    )*};
}

impl_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sizes_match_layout() {
        assert_eq!(<u8 as Scalar>::SIZE, 1);
        assert_eq!(<i16 as Scalar>::SIZE, 2);
        assert_eq!(<u32 as Scalar>::SIZE, 4);
        assert_eq!(<f64 as Scalar>::SIZE, 8);
        assert_eq!(<usize as Scalar>::SIZE, size_of::<usize>());
    }

    #[test]
    fn scalar_encode_decode() {
        let mut buf = [0_u8; 4];
        assert!(0x1122_3344_u32.write_ne_slice(&mut buf));
        assert_eq!(buf, 0x1122_3344_u32.to_ne_bytes());
        assert_eq!(u32::from_ne_slice(&buf), Some(0x1122_3344));
    }

    #[test]
    fn scalar_rejects_wrong_width() {
        let mut short = [0_u8; 3];
        assert!(!7_u32.write_ne_slice(&mut short));
        assert_eq!(short, [0, 0, 0]);
        assert_eq!(u32::from_ne_slice(&short), None);
        assert_eq!(u16::from_ne_slice(&[1, 2, 3]), None);
    }
}
