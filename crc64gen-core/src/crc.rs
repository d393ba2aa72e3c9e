//! CRC-64 checksums driven by generated tables.
//!
//! This is the consumer side of the generated tables: a slicing-by-8
//! main loop over 8-byte words with a byte-at-a-time tail.
//!
//! Supported presets:
//!
//! - **CRC-64/Jones**: initial value 0, no final XOR (as used by Redis)
//! - **CRC-64/ECMA-182**: the XZ variant
//! - **CRC-64/NVMe**: NVM Express end-to-end protection
//!
//! Any other reflected polynomial can be used through [`Crc64Params::custom`].

use crate::polynomial::{self, reflect};
use crate::table::{TableSet, generate_table_set};

/// Standard check input for CRC catalogues.
pub const CHECK_INPUT: &[u8] = b"123456789";

/// Parameters of a reflected CRC-64 variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc64Params {
    /// Human-readable name.
    pub name: &'static str,
    /// Generator polynomial in reflected form.
    pub polynomial: u64,
    /// Initial register value.
    pub init: u64,
    /// Value XORed into the register on finalization.
    pub xor_out: u64,
    /// CRC of [`CHECK_INPUT`], when known.
    pub check: Option<u64>,
}

impl Crc64Params {
    /// CRC-64/Jones.
    ///
    /// - Polynomial: 0xAD93D23594C935A9 (reflected: 0x95AC9329AC4BC9B5)
    /// - Initial value: 0x0000000000000000
    /// - Final XOR: 0x0000000000000000
    pub const JONES: Self = Self {
        name: "jones",
        polynomial: polynomial::JONES,
        init: 0,
        xor_out: 0,
        check: Some(0xe9c6d914c4b8d9ca),
    };

    /// CRC-64/ECMA-182 as used by XZ.
    ///
    /// - Polynomial: 0x42F0E1EBA9EA3693 (reflected: 0xC96C5795D7870F42)
    /// - Initial value: 0xFFFFFFFFFFFFFFFF
    /// - Final XOR: 0xFFFFFFFFFFFFFFFF
    pub const ECMA_182: Self = Self {
        name: "ecma182",
        polynomial: polynomial::ECMA_182,
        init: u64::MAX,
        xor_out: u64::MAX,
        check: Some(0x995dc9bbdf1939fa),
    };

    /// CRC-64/NVMe.
    ///
    /// - Polynomial: 0xAD93D23594C93659 (reflected: 0x9A6C9329AC4BC9B5)
    /// - Initial value: 0xFFFFFFFFFFFFFFFF
    /// - Final XOR: 0xFFFFFFFFFFFFFFFF
    pub const NVME: Self = Self {
        name: "nvme",
        polynomial: polynomial::NVME,
        init: u64::MAX,
        xor_out: u64::MAX,
        check: Some(0xae8b14860a799888),
    };

    /// All built-in presets.
    pub const PRESETS: [Self; 3] = [Self::JONES, Self::ECMA_182, Self::NVME];

    /// Parameters for an arbitrary reflected polynomial.
    pub const fn custom(polynomial: u64, init: u64, xor_out: u64) -> Self {
        Self {
            name: "custom",
            polynomial,
            init,
            xor_out,
            check: None,
        }
    }

    /// Look up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The polynomial in normal (non-reflected) form.
    pub const fn normal_polynomial(&self) -> u64 {
        reflect(self.polynomial)
    }

    /// Compute the CRC of [`CHECK_INPUT`] with these parameters.
    pub fn compute_check(&self) -> u64 {
        Crc64::compute(*self, CHECK_INPUT)
    }

    /// Whether the computed check value matches the catalogue value.
    ///
    /// Returns `None` when no catalogue value is known.
    pub fn self_test(&self) -> Option<bool> {
        self.check.map(|expected| self.compute_check() == expected)
    }
}

impl Default for Crc64Params {
    fn default() -> Self {
        Self::JONES
    }
}

/// CRC-64 calculator.
///
/// # Example
///
/// ```
/// use crc64gen_core::crc::{Crc64, Crc64Params};
///
/// let mut crc = Crc64::new(Crc64Params::JONES);
/// crc.update(b"12345");
/// crc.update(b"6789");
/// assert_eq!(crc.finalize(), 0xe9c6d914c4b8d9ca);
/// ```
#[derive(Debug, Clone)]
pub struct Crc64 {
    params: Crc64Params,
    tables: Box<TableSet>,
    crc: u64,
}

impl Crc64 {
    /// Create a new calculator, generating its tables.
    pub fn new(params: Crc64Params) -> Self {
        Self {
            params,
            tables: Box::new(generate_table_set(params.polynomial)),
            crc: params.init,
        }
    }

    /// Parameters this calculator was built with.
    pub fn params(&self) -> &Crc64Params {
        &self.params
    }

    /// The slicing-by-8 tables in use.
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = self.params.init;
    }

    /// Update the CRC with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.crc = update_slice8(&self.tables, self.crc, data);
    }

    /// Get the current CRC value (without finalizing).
    pub fn value(&self) -> u64 {
        self.crc ^ self.params.xor_out
    }

    /// Finalize and return the CRC value.
    pub fn finalize(self) -> u64 {
        self.value()
    }

    /// Compute the CRC of a slice in one call.
    pub fn compute(params: Crc64Params, data: &[u8]) -> u64 {
        let mut crc = Self::new(params);
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new(Crc64Params::default())
    }
}

/// Byte-at-a-time update using table 0 only.
#[inline]
pub fn update_bytewise(tables: &TableSet, mut crc: u64, data: &[u8]) -> u64 {
    for &byte in data {
        crc = tables[0][((crc ^ u64::from(byte)) & 0xff) as usize] ^ (crc >> 8);
    }
    crc
}

/// Slicing-by-8 update: 8 table lookups per 8-byte word.
///
/// The word is loaded little-endian, so its first byte has the furthest to
/// travel and goes through table 7.
#[inline]
pub fn update_slice8(tables: &TableSet, mut crc: u64, data: &[u8]) -> u64 {
    let mut words = data.chunks_exact(8);
    for chunk in &mut words {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        let word = crc ^ u64::from_le_bytes(bytes);

        crc = tables[7][(word & 0xff) as usize]
            ^ tables[6][((word >> 8) & 0xff) as usize]
            ^ tables[5][((word >> 16) & 0xff) as usize]
            ^ tables[4][((word >> 24) & 0xff) as usize]
            ^ tables[3][((word >> 32) & 0xff) as usize]
            ^ tables[2][((word >> 40) & 0xff) as usize]
            ^ tables[1][((word >> 48) & 0xff) as usize]
            ^ tables[0][(word >> 56) as usize];
    }

    update_bytewise(tables, crc, words.remainder())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_check_values() {
        assert_eq!(Crc64::compute(Crc64Params::JONES, CHECK_INPUT), 0xe9c6d914c4b8d9ca);
        assert_eq!(
            Crc64::compute(Crc64Params::ECMA_182, CHECK_INPUT),
            0x995dc9bbdf1939fa
        );
        assert_eq!(Crc64::compute(Crc64Params::NVME, CHECK_INPUT), 0xae8b14860a799888);

        for preset in Crc64Params::PRESETS {
            assert_eq!(preset.self_test(), Some(true), "{}", preset.name);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Crc64::compute(Crc64Params::JONES, b""), 0);
        assert_eq!(Crc64::compute(Crc64Params::ECMA_182, b""), 0);
    }

    #[test]
    fn test_incremental() {
        let mut crc = Crc64::new(Crc64Params::ECMA_182);
        crc.update(b"1234");
        crc.update(b"56789");
        assert_eq!(crc.finalize(), 0x995dc9bbdf1939fa);
    }

    #[test]
    fn test_reset() {
        let mut crc = Crc64::new(Crc64Params::NVME);
        crc.update(b"garbage");
        crc.reset();
        crc.update(CHECK_INPUT);
        assert_eq!(crc.value(), 0xae8b14860a799888);
    }

    #[test]
    fn test_slice8_matches_bytewise() {
        let tables = generate_table_set(polynomial::JONES);
        let data: Vec<u8> = (0..64u32).map(|i| (i * 37 + 11) as u8).collect();

        for len in 0..=data.len() {
            for init in [0, u64::MAX, 0x0123456789abcdef] {
                assert_eq!(
                    update_slice8(&tables, init, &data[..len]),
                    update_bytewise(&tables, init, &data[..len]),
                    "len {len} init {init:#x}"
                );
            }
        }
    }

    #[test]
    fn test_various_chunkings() {
        let data = b"The quick brown fox jumps over the lazy dog".repeat(7);
        let one_shot = Crc64::compute(Crc64Params::JONES, &data);

        for chunk in [1, 3, 7, 8, 9, 16, 17, 64] {
            let mut crc = Crc64::new(Crc64Params::JONES);
            for part in data.chunks(chunk) {
                crc.update(part);
            }
            assert_eq!(crc.finalize(), one_shot, "chunk size {chunk}");
        }
    }

    #[test]
    fn test_known_sentence() {
        assert_eq!(
            Crc64::compute(
                Crc64Params::JONES,
                b"The quick brown fox jumps over the lazy dog"
            ),
            0xbf7ee596c3aa372b
        );
    }

    #[test]
    fn test_by_name_and_custom() {
        assert_eq!(Crc64Params::by_name("ECMA182"), Some(Crc64Params::ECMA_182));
        assert_eq!(Crc64Params::by_name("nvme"), Some(Crc64Params::NVME));
        assert_eq!(Crc64Params::by_name("adler"), None);

        let custom = Crc64Params::custom(polynomial::JONES, 0, 0);
        assert_eq!(custom.self_test(), None);
        assert_eq!(custom.compute_check(), 0xe9c6d914c4b8d9ca);
        assert_eq!(Crc64Params::JONES.normal_polynomial(), 0xad93d23594c935a9);
    }
}
