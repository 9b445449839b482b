//! Size-pair forms: every buffer is given as `(pointer, size in bytes)`.
//!
//! This is the canonical implementation; [`bounded`](crate::bounded) adapts
//! `(begin, end)` pairs onto it.
//!
//! Two-buffer operations work on the first `min(dst_size, src_size)` bytes
//! (the *effective count*), so neither buffer is ever overrun. Null pointers
//! raise [`ErrorKind::NullPointer`] regardless of size.

use basis_except::{ErrorKind, Result, ensure};
use core::cmp::Ordering;
use core::slice;

#[inline]
fn check_dst(dst: *mut u8) -> Result<()> {
    ensure!(!dst.is_null(), ErrorKind::NullPointer, "destination");
    Ok(())
}

#[inline]
fn check_src(src: *const u8) -> Result<()> {
    ensure!(!src.is_null(), ErrorKind::NullPointer, "source");
    Ok(())
}

/// Low-to-high byte loop. Correct for overlap when `dst <= src`.
#[inline]
unsafe fn forward(dst: *mut u8, src: *const u8, n: usize) {
    for i in 0..n {
        // Safety: caller guarantees both ranges hold `n` bytes.
        unsafe { dst.add(i).write(src.add(i).read()) };
    }
}

/// High-to-low byte loop. Correct for overlap when `dst >= src`.
#[inline]
unsafe fn backward(dst: *mut u8, src: *const u8, n: usize) {
    for i in (0..n).rev() {
        // Safety: caller guarantees both ranges hold `n` bytes.
        unsafe { dst.add(i).write(src.add(i).read()) };
    }
}

/// Forward copy of `min(dst_size, src_size)` bytes.
///
/// Returns the address one past the last byte written in `dst`.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` or `src` is null.
///
/// # Safety
/// `dst` must be valid for `dst_size` byte writes, `src` for `src_size` byte
/// reads, and the effective ranges must not overlap.
pub unsafe fn copy(
    dst: *mut u8,
    dst_size: usize,
    src: *const u8,
    src_size: usize,
) -> Result<*mut u8> {
    check_dst(dst)?;
    check_src(src)?;
    let n = dst_size.min(src_size);
    // Safety: forwarded from the caller.
    unsafe {
        core::ptr::copy_nonoverlapping(src, dst, n);
        Ok(dst.add(n))
    }
}

/// Copy of `min(dst_size, src_size)` bytes in reversed order: source byte `i`
/// lands at destination byte `n - 1 - i`.
///
/// Returns the address one past the last byte written in `dst`.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` or `src` is null.
///
/// # Safety
/// As [`copy`]; the ranges must not overlap.
pub unsafe fn copy_rev(
    dst: *mut u8,
    dst_size: usize,
    src: *const u8,
    src_size: usize,
) -> Result<*mut u8> {
    check_dst(dst)?;
    check_src(src)?;
    let n = dst_size.min(src_size);
    for i in 0..n {
        // Safety: forwarded from the caller; `i` and `n - 1 - i` are both `< n`.
        unsafe { dst.add(n - 1 - i).write(src.add(i).read()) };
    }
    // Safety: `n <= dst_size`.
    Ok(unsafe { dst.add(n) })
}

/// Reverse-direction copy of `min(dst_size, src_size)` bytes, last byte
/// first. Safe for overlap with `dst > src`.
///
/// Returns `dst`.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` or `src` is null.
///
/// # Safety
/// `dst` must be valid for `dst_size` byte writes and `src` for `src_size`
/// byte reads. If the ranges overlap, `dst` must not precede `src`.
pub unsafe fn rcopy(
    dst: *mut u8,
    dst_size: usize,
    src: *const u8,
    src_size: usize,
) -> Result<*mut u8> {
    check_dst(dst)?;
    check_src(src)?;
    // Safety: forwarded from the caller.
    unsafe { backward(dst, src, dst_size.min(src_size)) };
    Ok(dst)
}

/// Copy `min(dst_size, src_size)` bytes as if through a temporary buffer,
/// picking the direction that is safe for the overlap at hand.
///
/// Returns `dst`.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` or `src` is null.
///
/// # Safety
/// `dst` must be valid for `dst_size` byte writes and `src` for `src_size`
/// byte reads. Overlap is allowed.
pub unsafe fn move_bytes(
    dst: *mut u8,
    dst_size: usize,
    src: *const u8,
    src_size: usize,
) -> Result<*mut u8> {
    check_dst(dst)?;
    check_src(src)?;
    let n = dst_size.min(src_size);
    let (d, s) = (dst.addr(), src.addr());
    match d.cmp(&s) {
        Ordering::Equal => {}
        // Safety: forwarded from the caller; direction matches the overlap.
        Ordering::Less => unsafe { forward(dst, src, n) },
        Ordering::Greater => unsafe { backward(dst, src, n) },
    }
    Ok(dst)
}

/// Write `value` to each of the `dst_size` bytes at `dst`.
///
/// Returns `dst + dst_size`.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` is null.
///
/// # Safety
/// `dst` must be valid for `dst_size` byte writes.
pub unsafe fn set(dst: *mut u8, dst_size: usize, value: u8) -> Result<*mut u8> {
    check_dst(dst)?;
    // Safety: forwarded from the caller.
    unsafe {
        core::ptr::write_bytes(dst, value, dst_size);
        Ok(dst.add(dst_size))
    }
}

/// Tile the `src_size`-byte pattern at `src` across the `dst_size` bytes at
/// `dst`, truncating the final tile.
///
/// Returns `dst`, or null if either size is zero (nothing written).
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `dst` or `src` is null.
///
/// # Safety
/// `dst` must be valid for `dst_size` byte writes, `src` for `src_size` byte
/// reads, and the ranges must not overlap.
pub unsafe fn set_pattern(
    dst: *mut u8,
    dst_size: usize,
    src: *const u8,
    src_size: usize,
) -> Result<*mut u8> {
    check_dst(dst)?;
    check_src(src)?;
    if dst_size == 0 || src_size == 0 {
        return Ok(core::ptr::null_mut());
    }
    let mut offset = 0;
    while offset < dst_size {
        let tile = src_size.min(dst_size - offset);
        // Safety: `offset + tile <= dst_size` and `tile <= src_size`.
        unsafe { core::ptr::copy_nonoverlapping(src, dst.add(offset), tile) };
        offset += tile;
    }
    Ok(dst)
}

/// Compare the first `min(lhs_size, rhs_size)` bytes front to back.
///
/// Returns the address in `lhs` of the first differing byte, or null if the
/// compared bytes are equal.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `lhs` or `rhs` is null.
///
/// # Safety
/// `lhs` and `rhs` must be valid for `lhs_size` and `rhs_size` byte reads.
pub unsafe fn compare(
    lhs: *const u8,
    lhs_size: usize,
    rhs: *const u8,
    rhs_size: usize,
) -> Result<*const u8> {
    check_src(lhs)?;
    check_src(rhs)?;
    let n = lhs_size.min(rhs_size);
    // Safety: forwarded from the caller.
    let (a, b) = unsafe { (slice::from_raw_parts(lhs, n), slice::from_raw_parts(rhs, n)) };
    Ok(match a.iter().zip(b).position(|(x, y)| x != y) {
        // Safety: `i < n <= lhs_size`.
        Some(i) => unsafe { lhs.add(i) },
        None => core::ptr::null(),
    })
}

/// Compare the last `min(lhs_size, rhs_size)` bytes of each buffer, back to
/// front, with the buffers aligned at their ends.
///
/// Returns the address in `lhs` of the differing byte closest to the end, or
/// null if the compared bytes are equal.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `lhs` or `rhs` is null.
///
/// # Safety
/// `lhs` and `rhs` must be valid for `lhs_size` and `rhs_size` byte reads.
pub unsafe fn rcompare(
    lhs: *const u8,
    lhs_size: usize,
    rhs: *const u8,
    rhs_size: usize,
) -> Result<*const u8> {
    check_src(lhs)?;
    check_src(rhs)?;
    let n = lhs_size.min(rhs_size);
    // Safety: forwarded from the caller; both tails lie inside their buffers.
    let (a, b) = unsafe {
        (
            slice::from_raw_parts(lhs.add(lhs_size - n), n),
            slice::from_raw_parts(rhs.add(rhs_size - n), n),
        )
    };
    Ok(match a.iter().zip(b).rposition(|(x, y)| x != y) {
        // Safety: the tail starts `lhs_size - n` bytes in and `i < n`.
        Some(i) => unsafe { lhs.add(lhs_size - n + i) },
        None => core::ptr::null(),
    })
}

enum Search<'a> {
    Done(*const u8),
    Scan(&'a [u8], &'a [u8]),
}

/// Boundary policy shared by [`find`] and [`rfind`].
unsafe fn search_bounds<'a>(
    lhs: *const u8,
    lhs_size: usize,
    rhs: *const u8,
    rhs_size: usize,
) -> Result<Search<'a>> {
    check_src(lhs)?;
    check_src(rhs)?;
    if rhs_size == 0 {
        return Ok(Search::Done(lhs));
    }
    if lhs_size == 0 || rhs_size > lhs_size {
        return Ok(Search::Done(core::ptr::null()));
    }
    // Safety: forwarded from the caller.
    unsafe {
        Ok(Search::Scan(
            slice::from_raw_parts(lhs, lhs_size),
            slice::from_raw_parts(rhs, rhs_size),
        ))
    }
}

/// Locate the first occurrence of the `rhs` needle in the `lhs` haystack.
///
/// Returns:
/// * the address of the first match;
/// * `lhs` if the needle is empty;
/// * null if the haystack is empty or shorter than the needle;
/// * `lhs + lhs_size` if there is no match.
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `lhs` or `rhs` is null.
///
/// # Safety
/// `lhs` and `rhs` must be valid for `lhs_size` and `rhs_size` byte reads.
pub unsafe fn find(
    lhs: *const u8,
    lhs_size: usize,
    rhs: *const u8,
    rhs_size: usize,
) -> Result<*const u8> {
    // Safety: forwarded from the caller.
    match unsafe { search_bounds(lhs, lhs_size, rhs, rhs_size)? } {
        Search::Done(p) => Ok(p),
        Search::Scan(haystack, needle) => {
            let at = haystack
                .windows(needle.len())
                .position(|w| w == needle)
                .unwrap_or(lhs_size);
            // Safety: `at <= lhs_size`.
            Ok(unsafe { lhs.add(at) })
        }
    }
}

/// Locate the last occurrence of the `rhs` needle in the `lhs` haystack.
///
/// Same boundary policy as [`find`].
///
/// # Errors
/// [`ErrorKind::NullPointer`] if `lhs` or `rhs` is null.
///
/// # Safety
/// `lhs` and `rhs` must be valid for `lhs_size` and `rhs_size` byte reads.
pub unsafe fn rfind(
    lhs: *const u8,
    lhs_size: usize,
    rhs: *const u8,
    rhs_size: usize,
) -> Result<*const u8> {
    // Safety: forwarded from the caller.
    match unsafe { search_bounds(lhs, lhs_size, rhs, rhs_size)? } {
        Search::Done(p) => Ok(p),
        Search::Scan(haystack, needle) => {
            let at = haystack
                .windows(needle.len())
                .rposition(|w| w == needle)
                .unwrap_or(lhs_size);
            // Safety: `at <= lhs_size`.
            Ok(unsafe { lhs.add(at) })
        }
    }
}
