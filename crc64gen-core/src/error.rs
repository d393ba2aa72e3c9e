//! Error types for crc64gen operations.
//!
//! Table generation itself is total over every 64-bit polynomial. Errors only
//! come from configuration (column count, slice count, identifiers), from
//! reading back previously generated text, and from comparing such text with
//! a fresh generation.

use std::{fmt, io};
use thiserror::Error;

/// The main error type for crc64gen operations.
#[derive(Debug, Error)]
pub enum CrcGenError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error while rendering text.
    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),

    /// Column count that cannot lay out a table.
    #[error("Invalid column count: {columns} (must be at least 1)")]
    InvalidColumns {
        /// The rejected column count.
        columns: usize,
    },

    /// Slice count that cannot produce a table set.
    #[error(
        "Invalid slice count: {slices} (must be between 1 and {max})",
        max = crate::table::MAX_SLICES
    )]
    InvalidSliceCount {
        /// The rejected slice count.
        slices: usize,
    },

    /// Identifier that is not usable as an array name.
    #[error("Invalid identifier: {name:?}")]
    InvalidName {
        /// The rejected identifier.
        name: String,
    },

    /// Polynomial text that is not a 64-bit hexadecimal value.
    #[error("Invalid polynomial: {input:?}")]
    InvalidPolynomial {
        /// The rejected input text.
        input: String,
    },

    /// Generated text that could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the problem.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Recorded polynomial differs from the expected one.
    #[error("Polynomial mismatch: expected {expected:#018x}, found {found:#018x}")]
    PolynomialMismatch {
        /// Expected reflected polynomial.
        expected: u64,
        /// Reflected polynomial recorded in the text.
        found: u64,
    },

    /// Table layout differs from the expected one.
    #[error("Layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch {
        /// Expected layout description.
        expected: String,
        /// Layout found in the text.
        found: String,
    },

    /// A table entry differs from a fresh generation.
    #[error("Stale entry in table {table} at index {index}: expected {expected:#018x}, found {found:#018x}")]
    StaleEntry {
        /// Index of the table within the set.
        table: usize,
        /// Byte index within the table.
        index: usize,
        /// Freshly generated value.
        expected: u64,
        /// Value found in the text.
        found: u64,
    },
}

/// Result type alias for crc64gen operations.
pub type Result<T> = std::result::Result<T, CrcGenError>;

impl CrcGenError {
    /// Create an invalid column count error.
    pub fn invalid_columns(columns: usize) -> Self {
        Self::InvalidColumns { columns }
    }

    /// Create an invalid slice count error.
    pub fn invalid_slice_count(slices: usize) -> Self {
        Self::InvalidSliceCount { slices }
    }

    /// Create an invalid identifier error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create an invalid polynomial error.
    pub fn invalid_polynomial(input: impl Into<String>) -> Self {
        Self::InvalidPolynomial {
            input: input.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a polynomial mismatch error.
    pub fn polynomial_mismatch(expected: u64, found: u64) -> Self {
        Self::PolynomialMismatch { expected, found }
    }

    /// Create a layout mismatch error.
    pub fn layout_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::LayoutMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a stale entry error.
    pub fn stale_entry(table: usize, index: usize, expected: u64, found: u64) -> Self {
        Self::StaleEntry {
            table,
            index,
            expected,
            found,
        }
    }

    /// Whether this error means generated text no longer matches its parameters.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::PolynomialMismatch { .. } | Self::LayoutMismatch { .. } | Self::StaleEntry { .. }
        )
    }
}
