//! # crc64gen Core
//!
//! Core components for generating CRC-64 lookup tables.
//!
//! This crate provides:
//!
//! - [`table`]: byte-wise tables and slicing-by-N table sets (reflected form)
//! - [`format`]: rendering tables as static C or Rust array literals
//! - [`parse`]: reading generated literals back into tables
//! - [`verify`]: checking generated text against a fresh generation
//! - [`crc`]: CRC-64 checksums driven by the generated tables
//! - [`polynomial`]: polynomial constants, parsing and reflection
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use crc64gen_core::format::{FormatConfig, Formatter};
//! use crc64gen_core::polynomial::JONES;
//! use crc64gen_core::table::{GenerationMode, Tables};
//!
//! let tables = Tables::generate(JONES, GenerationMode::SLICE8).unwrap();
//! let text = Formatter::new(FormatConfig::default())
//!     .unwrap()
//!     .render(JONES, &tables)
//!     .unwrap();
//!
//! assert!(text.contains("static const unsigned long long crc_table[8][256] = {"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod crc;
pub mod error;
pub mod format;
pub mod parse;
pub mod polynomial;
pub mod table;
pub mod verify;

// Re-exports for convenience
pub use crc::{Crc64, Crc64Params};
pub use error::{CrcGenError, Result};
pub use format::{FormatConfig, Formatter, Syntax};
pub use parse::{ParsedTables, parse};
pub use table::{
    GenerationMode, Table, TableSet, Tables, generate_slices, generate_table, generate_table_set,
};
pub use verify::verify;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::crc::{Crc64, Crc64Params};
    pub use crate::error::{CrcGenError, Result};
    pub use crate::format::{FormatConfig, Formatter, Syntax};
    pub use crate::table::{GenerationMode, Tables, generate_table, generate_table_set};
}
