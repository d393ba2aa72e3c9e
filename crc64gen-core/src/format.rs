//! Rendering tables as static array literals.
//!
//! The reference layout is C:
//!
//! ```text
//! /* This file is generated automatically, don't change it. */
//! /* Reversed polynomial: 0x95ac9329ac4bc9b5 */
//! static const unsigned long long crc_table[8][256] = {
//! 	{
//! 		0x0000000000000000ull, 0x7ad870c830358979ull,
//! 		...
//! 	},
//! };
//! ```
//!
//! Rust output follows the same shape with `//` comments, `[`/`]` and no
//! literal suffix.

use crate::error::{CrcGenError, Result};
use crate::table::{TABLE_SIZE, Table, Tables};
use std::fmt::{self, Write as _};
use std::io;
use tracing::debug;

/// First header line of every generated file.
pub const GENERATED_WARNING: &str = "This file is generated automatically, don't change it.";

/// Prefix of the provenance header line.
pub const POLYNOMIAL_LABEL: &str = "Reversed polynomial:";

/// Reserved words of C (C23 included) that cannot name an array.
const C_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "char", "const", "constexpr",
    "continue", "default", "do", "double", "else", "enum", "extern", "false", "float", "for",
    "goto", "if", "inline", "int", "long", "nullptr", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "static_assert", "struct", "switch", "thread_local", "true",
    "typedef", "typeof", "typeof_unqual", "union", "unsigned", "void", "volatile", "while",
];

/// Strict and reserved Rust keywords.
const RUST_KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Target language of the emitted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// `static const unsigned long long name[N][256] = { ... };`
    #[default]
    C,
    /// `pub static NAME: [[u64; 256]; N] = [ ... ];`
    Rust,
}

impl Syntax {
    /// Array name used when none is configured.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::C => "crc_table",
            Self::Rust => "CRC_TABLE",
        }
    }

    /// Get the syntax name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Rust => "Rust",
        }
    }

    /// Whether `name` is reserved in this language.
    pub fn is_keyword(&self, name: &str) -> bool {
        match self {
            Self::C => C_KEYWORDS.contains(&name),
            Self::Rust => RUST_KEYWORDS.contains(&name),
        }
    }

    fn indent(&self) -> &'static str {
        match self {
            Self::C => "\t",
            Self::Rust => "    ",
        }
    }

    fn open(&self) -> char {
        match self {
            Self::C => '{',
            Self::Rust => '[',
        }
    }

    fn close(&self) -> char {
        match self {
            Self::C => '}',
            Self::Rust => ']',
        }
    }

    fn comment(&self, out: &mut impl fmt::Write, text: fmt::Arguments<'_>) -> fmt::Result {
        match self {
            Self::C => writeln!(out, "/* {text} */"),
            Self::Rust => writeln!(out, "// {text}"),
        }
    }

    fn literal(&self, out: &mut impl fmt::Write, value: u64) -> fmt::Result {
        match self {
            Self::C => write!(out, "0x{value:016x}ull"),
            Self::Rust => write!(out, "0x{value:016x}"),
        }
    }

    fn declaration(&self, out: &mut impl fmt::Write, name: &str, tables: &Tables) -> fmt::Result {
        let count = tables.as_slice().len();
        match (self, tables.is_nested()) {
            (Self::C, false) => writeln!(
                out,
                "static const unsigned long long {name}[{TABLE_SIZE}] = {{"
            ),
            (Self::C, true) => writeln!(
                out,
                "static const unsigned long long {name}[{count}][{TABLE_SIZE}] = {{"
            ),
            (Self::Rust, false) => writeln!(out, "pub static {name}: [u64; {TABLE_SIZE}] = ["),
            (Self::Rust, true) => {
                writeln!(out, "pub static {name}: [[u64; {TABLE_SIZE}]; {count}] = [")
            }
        }
    }
}

impl std::fmt::Display for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Layout settings for the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Identifier of the emitted array.
    pub name: String,
    /// Entries per line.
    pub columns: usize,
    /// Target language.
    pub syntax: Syntax,
}

impl FormatConfig {
    /// Entries per line in the reference layout.
    pub const DEFAULT_COLUMNS: usize = 2;

    /// Reference layout for `syntax`, with its default array name.
    pub fn new(syntax: Syntax) -> Self {
        Self {
            name: syntax.default_name().to_string(),
            columns: Self::DEFAULT_COLUMNS,
            syntax,
        }
    }

    /// Set the array name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the number of entries per line.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Check the column count and the array name.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(CrcGenError::invalid_columns(self.columns));
        }
        if !is_identifier(&self.name) || self.syntax.is_keyword(&self.name) {
            return Err(CrcGenError::invalid_name(&self.name));
        }
        Ok(())
    }

    /// Number of lines each table occupies.
    pub fn rows_per_table(&self) -> usize {
        TABLE_SIZE.div_ceil(self.columns)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(Syntax::default())
    }
}

/// Whether `name` is an ASCII identifier usable in both C and Rust.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders [`Tables`] as a static array literal.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    /// Create a formatter, validating the configuration.
    pub fn new(config: FormatConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Render to a string.
    pub fn render(&self, polynomial: u64, tables: &Tables) -> Result<String> {
        let mut out = String::with_capacity(self.estimated_len(tables));
        self.write_fmt_to(&mut out, polynomial, tables)?;
        debug!(
            bytes = out.len(),
            tables = tables.as_slice().len(),
            syntax = %self.config.syntax,
            "rendered tables"
        );
        Ok(out)
    }

    /// Render and write to an I/O sink.
    pub fn write_to<W: io::Write>(&self, out: &mut W, polynomial: u64, tables: &Tables) -> Result<()> {
        let text = self.render(polynomial, tables)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn estimated_len(&self, tables: &Tables) -> usize {
        // literal plus ", " separator
        tables.entry_count() * 24 + self.config.rows_per_table() * tables.as_slice().len() * 4 + 256
    }

    fn write_fmt_to(&self, out: &mut impl fmt::Write, polynomial: u64, tables: &Tables) -> fmt::Result {
        let syntax = self.config.syntax;

        syntax.comment(out, format_args!("{GENERATED_WARNING}"))?;
        syntax.comment(out, format_args!("{POLYNOMIAL_LABEL} 0x{polynomial:016x}"))?;
        syntax.declaration(out, &self.config.name, tables)?;

        match tables {
            Tables::Single(table) => self.write_table(out, table, 1)?,
            Tables::Sliced(set) => {
                let indent = syntax.indent();
                for table in set {
                    writeln!(out, "{indent}{}", syntax.open())?;
                    self.write_table(out, table, 2)?;
                    writeln!(out, "{indent}{},", syntax.close())?;
                }
            }
        }

        writeln!(out, "{};", syntax.close())
    }

    fn write_table(&self, out: &mut impl fmt::Write, table: &Table, depth: usize) -> fmt::Result {
        let syntax = self.config.syntax;
        let indent = syntax.indent();
        let last = self.config.rows_per_table() - 1;

        for (row, entries) in table.chunks(self.config.columns).enumerate() {
            for _ in 0..depth {
                out.write_str(indent)?;
            }
            for (i, &value) in entries.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                syntax.literal(out, value)?;
            }
            if row != last {
                out.write_char(',')?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}
