//! Modular arithmetic over alphabet indices.
//!
//! Indices form the ring Z/nZ where n is the alphabet size. Rotor offsets
//! are applied and removed with [`shift`], which never underflows.

/// Reduces `value` into `0..modulus`.
///
/// Returns 0 for an empty ring.
///
/// # Example
///
/// ```
/// use enigma::ring::wrap;
///
/// assert_eq!(wrap(27, 26), 1);
/// assert_eq!(wrap(-1, 26), 25);
/// assert_eq!(wrap(-27, 26), 25);
/// ```
#[inline]
#[must_use]
pub fn wrap(value: i64, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    value.rem_euclid(modulus as i64) as usize
}

/// Adds a signed offset to `index` in the ring of size `modulus`.
///
/// # Example
///
/// ```
/// use enigma::ring::shift;
///
/// assert_eq!(shift(25, 1, 26), 0);
/// assert_eq!(shift(0, -1, 26), 25);
/// ```
#[inline]
#[must_use]
pub fn shift(index: usize, offset: i64, modulus: usize) -> usize {
    wrap(index as i64 + offset, modulus)
}
