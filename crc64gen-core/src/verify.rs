//! Checking previously generated text against a fresh generation.

use crate::error::{CrcGenError, Result};
use crate::parse::ParsedTables;
use crate::table::{GenerationMode, Tables};
use tracing::debug;

/// Verify that `parsed` is exactly what the generator produces for
/// `polynomial` and `mode`.
///
/// Reports the first difference found, checking in order: the recorded
/// polynomial (when present), the layout, then every entry.
pub fn verify(parsed: &ParsedTables, polynomial: u64, mode: GenerationMode) -> Result<()> {
    if let Some(found) = parsed.polynomial.filter(|&found| found != polynomial) {
        return Err(CrcGenError::polynomial_mismatch(polynomial, found));
    }

    let found_mode = parsed.mode();
    if found_mode != mode {
        return Err(CrcGenError::layout_mismatch(mode.describe(), found_mode.describe()));
    }

    let fresh = Tables::generate(polynomial, mode)?;
    compare(&fresh, parsed.tables())?;

    debug!(name = %parsed.name, layout = %mode.describe(), "generated tables are up to date");
    Ok(())
}

/// Compare two table sets entry by entry.
pub fn compare(expected: &Tables, found: &Tables) -> Result<()> {
    let (expected, found) = (expected.as_slice(), found.as_slice());
    if expected.len() != found.len() {
        return Err(CrcGenError::layout_mismatch(
            format!("{} tables", expected.len()),
            format!("{} tables", found.len()),
        ));
    }

    for (table, (want, got)) in expected.iter().zip(found).enumerate() {
        if let Some(index) = want.iter().zip(got.iter()).position(|(a, b)| a != b) {
            return Err(CrcGenError::stale_entry(table, index, want[index], got[index]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatConfig, Formatter};
    use crate::parse::parse;
    use crate::polynomial::{ECMA_182, JONES};

    fn generated(polynomial: u64, mode: GenerationMode) -> String {
        let tables = Tables::generate(polynomial, mode).unwrap();
        Formatter::new(FormatConfig::default())
            .unwrap()
            .render(polynomial, &tables)
            .unwrap()
    }

    #[test]
    fn test_fresh_output_verifies() {
        for mode in [GenerationMode::Single, GenerationMode::SLICE8] {
            let parsed = parse(&generated(JONES, mode)).unwrap();
            verify(&parsed, JONES, mode).unwrap();
        }
    }

    #[test]
    fn test_polynomial_mismatch() {
        let parsed = parse(&generated(JONES, GenerationMode::Single)).unwrap();
        let err = verify(&parsed, ECMA_182, GenerationMode::Single).unwrap_err();
        assert!(matches!(
            err,
            CrcGenError::PolynomialMismatch { expected: ECMA_182, found: JONES }
        ));
    }

    #[test]
    fn test_layout_mismatch() {
        let parsed = parse(&generated(JONES, GenerationMode::Single)).unwrap();
        let err = verify(&parsed, JONES, GenerationMode::SLICE8).unwrap_err();
        assert_eq!(err.to_string(), "Layout mismatch: expected 8x256, found 256");
    }

    #[test]
    fn test_flipped_entry_is_reported() {
        let text = generated(JONES, GenerationMode::SLICE8);
        // Table 0, entry 3 lives on the second row of the first table.
        let edited = text.replacen("0x8f689158505e9b8bull", "0x8f689158505e9b8aull", 1);
        assert_ne!(text, edited);

        let parsed = parse(&edited).unwrap();
        let err = verify(&parsed, JONES, GenerationMode::SLICE8).unwrap_err();
        assert!(matches!(
            err,
            CrcGenError::StaleEntry {
                table: 0,
                index: 3,
                expected: 0x8f689158505e9b8b,
                found: 0x8f689158505e9b8a,
            }
        ));
    }

    #[test]
    fn test_compare_table_counts() {
        let four = Tables::generate(JONES, GenerationMode::Sliced { slices: 4 }).unwrap();
        let eight = Tables::generate(JONES, GenerationMode::SLICE8).unwrap();
        assert!(compare(&eight, &four).unwrap_err().is_mismatch());
        compare(&four, &four).unwrap();
    }
}
