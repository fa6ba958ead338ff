//! Alignment helpers shared by the pool and allocator modules

/// Aligns `value` up to the nearest multiple of `alignment`.
///
/// `alignment` must be a power of two.
///
/// # Examples
///
/// ```
/// use fastalloc::utils::align_up;
///
/// assert_eq!(align_up(13, 8), 16);
/// assert_eq!(align_up(16, 8), 16);
/// assert_eq!(align_up(0, 16), 0);
/// ```
#[inline(always)]
#[must_use]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Checks whether `value` is aligned to `alignment`.
///
/// `alignment` must be a power of two.
///
/// # Examples
///
/// ```
/// use fastalloc::utils::is_aligned;
///
/// assert!(is_aligned(16, 8));
/// assert!(!is_aligned(13, 8));
/// ```
#[inline(always)]
#[must_use]
pub const fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    value & (alignment - 1) == 0
}
