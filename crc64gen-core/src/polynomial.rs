//! Polynomial helpers.
//!
//! All tables are generated from the reflected (bit-reversed) form of the
//! generator polynomial. Catalogues usually list the normal form, so
//! [`reflect`] converts between the two.

use crate::error::{CrcGenError, Result};

/// Reflected "Jones" polynomial (normal form `0xad93d23594c935a9`).
pub const JONES: u64 = 0x95ac9329ac4bc9b5;

/// Reflected ECMA-182 polynomial (normal form `0x42f0e1eba9ea3693`), used by XZ.
pub const ECMA_182: u64 = 0xc96c5795d7870f42;

/// Reflected NVMe polynomial (normal form `0xad93d23594c93659`).
pub const NVME: u64 = 0x9a6c9329ac4bc9b5;

/// Convert between normal and reflected polynomial form.
///
/// The conversion is its own inverse.
#[inline]
pub const fn reflect(polynomial: u64) -> u64 {
    polynomial.reverse_bits()
}

/// Parse a 64-bit polynomial written in hexadecimal.
///
/// Accepts an optional `0x`/`0X` prefix, either letter case and `_` digit
/// separators. At most 16 hex digits are allowed.
///
/// # Example
///
/// ```
/// use crc64gen_core::polynomial::{parse_polynomial, JONES};
///
/// assert_eq!(parse_polynomial("0x95ac_9329_ac4b_c9b5").unwrap(), JONES);
/// assert!(parse_polynomial("0x1_0000_0000_0000_0000").is_err());
/// ```
pub fn parse_polynomial(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || digits.len() > 16 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CrcGenError::invalid_polynomial(input));
    }

    u64::from_str_radix(&digits, 16).map_err(|_| CrcGenError::invalid_polynomial(input))
}
