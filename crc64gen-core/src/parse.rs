//! Reading generated array literals back into tables.
//!
//! Accepts the text produced by [`Formatter`](crate::format::Formatter) in
//! either syntax. The parser is line based and only as strict as needed to
//! recover the numbers: header comments, the declaration line and the hex
//! literals that follow it.

use crate::error::{CrcGenError, Result};
use crate::format::{POLYNOMIAL_LABEL, Syntax};
use crate::polynomial::parse_polynomial;
use crate::table::{GenerationMode, MAX_SLICES, TABLE_SIZE, Table, Tables};
use tracing::{debug, trace};

/// Tables recovered from generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTables {
    /// Declared array name.
    pub name: String,
    /// Syntax of the declaration.
    pub syntax: Syntax,
    /// Polynomial recorded in the provenance comment, if any.
    pub polynomial: Option<u64>,
    tables: Tables,
}

impl ParsedTables {
    /// The recovered tables.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Consume and return the recovered tables.
    pub fn into_tables(self) -> Tables {
        self.tables
    }

    /// Layout of the recovered tables.
    pub fn mode(&self) -> GenerationMode {
        self.tables.mode()
    }
}

/// Declaration line contents.
struct Declaration {
    name: String,
    syntax: Syntax,
    /// Outermost dimension first.
    dims: Vec<usize>,
}

/// Parse generated text.
///
/// # Example
///
/// ```
/// use crc64gen_core::format::{FormatConfig, Formatter};
/// use crc64gen_core::parse::parse;
/// use crc64gen_core::table::{GenerationMode, Tables};
///
/// let tables = Tables::generate(0x95ac9329ac4bc9b5, GenerationMode::Single).unwrap();
/// let text = Formatter::new(FormatConfig::default())
///     .unwrap()
///     .render(0x95ac9329ac4bc9b5, &tables)
///     .unwrap();
///
/// let parsed = parse(&text).unwrap();
/// assert_eq!(parsed.polynomial, Some(0x95ac9329ac4bc9b5));
/// assert_eq!(parsed.tables(), &tables);
/// ```
pub fn parse(text: &str) -> Result<ParsedTables> {
    let mut polynomial = None;
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (decl_line, decl, body_start) = loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(CrcGenError::parse(
                text.lines().count().max(1),
                "missing array declaration",
            ));
        };

        if let Some(pos) = line.find(POLYNOMIAL_LABEL) {
            let value = line[pos + POLYNOMIAL_LABEL.len()..]
                .trim()
                .trim_end_matches("*/")
                .trim();
            let parsed = parse_polynomial(value)
                .map_err(|_| CrcGenError::parse(line_no, format!("bad polynomial {value:?}")))?;
            polynomial = Some(parsed);
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("static ") || trimmed.starts_with("pub static ") {
            let Some(eq) = line.find('=') else {
                return Err(CrcGenError::parse(line_no, "declaration has no initializer"));
            };
            let decl = parse_declaration(&line[..eq], line_no)?;
            break (line_no, decl, &line[eq + 1..]);
        }
    };

    let (tables_count, nested) = match decl.dims.as_slice() {
        [TABLE_SIZE] => (1, false),
        [count, TABLE_SIZE] if (1..=MAX_SLICES).contains(count) => (*count, true),
        [count, TABLE_SIZE] => {
            return Err(CrcGenError::parse(
                decl_line,
                format!("table count {count} out of range 1..={MAX_SLICES}"),
            ));
        }
        dims => {
            return Err(CrcGenError::parse(
                decl_line,
                format!("unsupported dimensions {dims:?}, expected [256] or [N][256]"),
            ));
        }
    };

    let expected = tables_count * TABLE_SIZE;
    let mut values = Vec::with_capacity(expected);
    let mut last_line = decl_line;

    scan_literals(body_start, decl_line, &mut values)?;
    for (line_no, line) in lines {
        last_line = line_no;
        scan_literals(line, line_no, &mut values)?;
        if matches!(line.trim(), "};" | "];") {
            break;
        }
    }

    if values.len() != expected {
        return Err(CrcGenError::parse(
            last_line,
            format!("expected {expected} entries, found {}", values.len()),
        ));
    }

    let mut set: Vec<Table> = values
        .chunks_exact(TABLE_SIZE)
        .map(|chunk| {
            let mut table = [0u64; TABLE_SIZE];
            table.copy_from_slice(chunk);
            table
        })
        .collect();

    let tables = if nested {
        Tables::Sliced(set)
    } else {
        match set.pop() {
            Some(table) => Tables::Single(Box::new(table)),
            None => return Err(CrcGenError::parse(last_line, "empty table")),
        }
    };

    debug!(
        name = %decl.name,
        syntax = %decl.syntax,
        tables = tables_count,
        "parsed generated tables"
    );

    Ok(ParsedTables {
        name: decl.name,
        syntax: decl.syntax,
        polynomial,
        tables,
    })
}

/// Parse the part of the declaration before `=`.
fn parse_declaration(head: &str, line_no: usize) -> Result<Declaration> {
    if let Some((binding, ty)) = head.split_once(':') {
        // pub static NAME: [[u64; 256]; 8]
        let name = last_word(binding, line_no)?;
        let mut dims = ty
            .split(';')
            .skip(1)
            .map(|part| parse_dim(part.trim().trim_end_matches(']').trim(), line_no))
            .collect::<Result<Vec<_>>>()?;
        dims.reverse();
        return Ok(Declaration {
            name,
            syntax: Syntax::Rust,
            dims,
        });
    }

    // static const unsigned long long name[8][256]
    let Some(open) = head.find('[') else {
        return Err(CrcGenError::parse(line_no, "declaration has no array dimensions"));
    };
    let name = last_word(&head[..open], line_no)?;
    let dims = head[open..]
        .split('[')
        .skip(1)
        .map(|part| parse_dim(part.trim().trim_end_matches(']').trim(), line_no))
        .collect::<Result<Vec<_>>>()?;

    Ok(Declaration {
        name,
        syntax: Syntax::C,
        dims,
    })
}

fn last_word(text: &str, line_no: usize) -> Result<String> {
    text.split_whitespace()
        .last()
        .map(str::to_string)
        .ok_or_else(|| CrcGenError::parse(line_no, "declaration has no name"))
}

fn parse_dim(text: &str, line_no: usize) -> Result<usize> {
    text.parse()
        .map_err(|_| CrcGenError::parse(line_no, format!("bad array dimension {text:?}")))
}

/// Collect every `0x` literal on a line.
fn scan_literals(line: &str, line_no: usize, values: &mut Vec<u64>) -> Result<()> {
    let mut rest = line;
    while let Some(pos) = rest.find("0x") {
        let digits_start = &rest[pos + 2..];
        let len = digits_start
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(digits_start.len());
        let digits = &digits_start[..len];

        if digits.is_empty() || digits.len() > 16 {
            return Err(CrcGenError::parse(
                line_no,
                format!("bad literal 0x{digits}"),
            ));
        }
        let value = u64::from_str_radix(digits, 16)
            .map_err(|_| CrcGenError::parse(line_no, format!("bad literal 0x{digits}")))?;
        trace!(line = line_no, value, "literal");
        values.push(value);

        rest = &digits_start[len..];
    }
    Ok(())
}
