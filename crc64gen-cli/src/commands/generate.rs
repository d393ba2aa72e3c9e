//! Generate command implementation.

use crc64gen_core::format::{FormatConfig, Formatter, Syntax};
use crc64gen_core::{GenerationMode, Tables};
use std::io::{self, Write};
use tracing::info;

pub fn cmd_generate(
    polynomial: u64,
    mode: GenerationMode,
    name: Option<String>,
    columns: usize,
    syntax: Syntax,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FormatConfig::new(syntax).with_columns(columns);
    if let Some(name) = name {
        config = config.with_name(name);
    }
    let formatter = Formatter::new(config)?;

    let tables = Tables::generate(polynomial, mode)?;
    info!(
        polynomial = %format_args!("{polynomial:#018x}"),
        layout = %mode.describe(),
        syntax = %syntax,
        "generating tables"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate_into(&mut out, &formatter, polynomial, &tables)
}

/// Write the rendered tables, treating a closed pipe as a normal stop.
fn generate_into<W: Write>(
    out: &mut W,
    formatter: &Formatter,
    polynomial: u64,
    tables: &Tables,
) -> Result<(), Box<dyn std::error::Error>> {
    match formatter.write_to(out, polynomial, tables) {
        Ok(()) => Ok(()),
        Err(crc64gen_core::CrcGenError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crc64gen_core::polynomial::JONES;

    #[test]
    fn test_generate_into_buffer() {
        let formatter = Formatter::new(FormatConfig::new(Syntax::Rust).with_name("JONES")).unwrap();
        let tables = Tables::generate(JONES, GenerationMode::Single).unwrap();

        let mut buf = Vec::new();
        generate_into(&mut buf, &formatter, JONES, &tables).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("// This file is generated automatically"));
        assert!(text.contains("pub static JONES: [u64; 256] = ["));
    }
}
