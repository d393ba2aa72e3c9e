//! Check command implementation.

use crc64gen_core::{GenerationMode, parse, verify};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn cmd_check(
    file: &Path,
    polynomial: u64,
    mode: GenerationMode,
) -> Result<(), Box<dyn std::error::Error>> {
    mode.validate()?;
    let text = fs::read_to_string(file)?;
    let parsed = parse(&text)?;
    info!(name = %parsed.name, syntax = %parsed.syntax, "parsed {}", file.display());

    verify(&parsed, polynomial, mode)?;

    println!(
        "OK: {} ({} {}, polynomial 0x{:016x})",
        file.display(),
        parsed.syntax,
        mode.describe(),
        polynomial
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crc64gen_core::polynomial::{ECMA_182, JONES};
    use crc64gen_core::{FormatConfig, Formatter, Tables};
    use std::path::PathBuf;

    fn write_generated(file_name: &str, polynomial: u64, mode: GenerationMode) -> PathBuf {
        let tables = Tables::generate(polynomial, mode).unwrap();
        let text = Formatter::new(FormatConfig::default())
            .unwrap()
            .render(polynomial, &tables)
            .unwrap();
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), file_name));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_check_up_to_date_file() {
        let path = write_generated("fresh.h", JONES, GenerationMode::SLICE8);
        let result = cmd_check(&path, JONES, GenerationMode::SLICE8);
        let _ = fs::remove_file(&path);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_stale_file() {
        let path = write_generated("stale.h", JONES, GenerationMode::Single);
        let result = cmd_check(&path, ECMA_182, GenerationMode::Single);
        let _ = fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Polynomial mismatch"));
    }

    #[test]
    fn test_check_rejects_zero_slices_before_reading() {
        let path = write_generated("zero.h", JONES, GenerationMode::SLICE8);
        let result = cmd_check(&path, JONES, GenerationMode::Sliced { slices: 0 });
        let _ = fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Invalid slice count: 0"), "{err}");
    }

    #[test]
    fn test_check_missing_file() {
        let path = std::env::temp_dir().join("crc64gen-does-not-exist.h");
        assert!(cmd_check(&path, JONES, GenerationMode::SLICE8).is_err());
    }
}
