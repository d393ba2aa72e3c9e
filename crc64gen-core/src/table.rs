//! CRC-64 lookup table generation.
//!
//! Tables use the reflected ("bit-reversed") convention: the register shifts
//! right and the reflected polynomial is XORed in whenever a set bit falls
//! off the low end.
//!
//! ## Slicing-by-N
//!
//! A single [`Table`] lets a checksum consume one byte per step. A table set
//! of `N` tables lets it consume `N` bytes per step: table `k` holds the
//! contribution of a byte that still has `k` more bytes to travel through the
//! register. Table `k` is derived from table `k - 1` by pushing one extra zero
//! byte through the register with the help of table 0:
//!
//! ```text
//! x = T[k-1][pos]
//! T[k][pos] = (x >> 8) ^ T[0][x & 0xff]
//! ```

use crate::error::{CrcGenError, Result};
use tracing::debug;

/// Number of entries in a table, one per byte value.
pub const TABLE_SIZE: usize = 256;

/// Number of tables in a slicing-by-8 set.
pub const SLICE8: usize = 8;

/// Largest slice count accepted by [`generate_slices`] and the parser.
pub const MAX_SLICES: usize = 64;

/// A 256-entry lookup table, indexed by byte value.
pub type Table = [u64; TABLE_SIZE];

/// The 8 tables used by slicing-by-8.
pub type TableSet = [Table; SLICE8];

/// Compute a single table entry.
///
/// Starts from register `byte` and runs 8 rounds of conditional
/// shift-and-XOR.
#[inline]
pub const fn table_entry(polynomial: u64, byte: u8) -> u64 {
    let mut crc = byte as u64;
    let mut round = 0;
    while round < 8 {
        if crc & 1 != 0 {
            crc = polynomial ^ (crc >> 1);
        } else {
            crc >>= 1;
        }
        round += 1;
    }
    crc
}

/// Generate the byte-wise lookup table for a reflected polynomial.
///
/// # Example
///
/// ```
/// use crc64gen_core::table::generate_table;
///
/// let table = generate_table(0x95ac9329ac4bc9b5);
/// assert_eq!(table[0], 0);
/// assert_eq!(table[1], 0x7ad870c830358979);
/// ```
pub const fn generate_table(polynomial: u64) -> Table {
    let mut table = [0u64; TABLE_SIZE];
    let mut i = 0usize;
    while i < TABLE_SIZE {
        table[i] = table_entry(polynomial, i as u8);
        i += 1;
    }
    table
}

/// Derive the next slicing table from the previous one and the base table.
#[inline]
const fn next_table(base: &Table, prev: &Table) -> Table {
    let mut table = [0u64; TABLE_SIZE];
    let mut pos = 0usize;
    while pos < TABLE_SIZE {
        let x = prev[pos];
        table[pos] = (x >> 8) ^ base[(x & 0xff) as usize];
        pos += 1;
    }
    table
}

/// Generate the slicing-by-8 table set for a reflected polynomial.
///
/// `set[0]` equals [`generate_table`]; every later table comes from the
/// one before it and `set[0]`.
pub const fn generate_table_set(polynomial: u64) -> TableSet {
    let mut set = [[0u64; TABLE_SIZE]; SLICE8];
    set[0] = generate_table(polynomial);

    let mut k = 1;
    while k < SLICE8 {
        set[k] = next_table(&set[0], &set[k - 1]);
        k += 1;
    }

    set
}

/// Generate a slicing-by-`slices` table set.
///
/// The same recurrence as [`generate_table_set`], for up to [`MAX_SLICES`] tables.
/// `slices == 8` reproduces [`generate_table_set`] exactly.
///
/// Fails with [`CrcGenError::InvalidSliceCount`] unless `1 <= slices <= MAX_SLICES`.
pub fn generate_slices(polynomial: u64, slices: usize) -> Result<Vec<Table>> {
    GenerationMode::Sliced { slices }.validate()?;

    let mut tables = Vec::with_capacity(slices);
    tables.push(generate_table(polynomial));
    for k in 1..slices {
        let next = next_table(&tables[0], &tables[k - 1]);
        tables.push(next);
    }

    debug!(polynomial = %format_args!("{polynomial:#018x}"), slices, "generated table set");
    Ok(tables)
}

/// How many tables to generate and how to lay them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// One flat 256-entry table for byte-at-a-time processing.
    Single,
    /// A nested set of tables for multi-byte processing.
    Sliced {
        /// Number of tables (bytes consumed per step).
        slices: usize,
    },
}

impl GenerationMode {
    /// The slicing-by-8 layout.
    pub const SLICE8: Self = Self::Sliced { slices: SLICE8 };

    /// Number of tables this mode produces.
    pub fn table_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Sliced { slices } => *slices,
        }
    }

    /// Check that the mode describes a table count the generator accepts.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Single => Ok(()),
            Self::Sliced { slices } if (1..=MAX_SLICES).contains(&slices) => Ok(()),
            Self::Sliced { slices } => Err(CrcGenError::invalid_slice_count(slices)),
        }
    }

    /// Short description used in diagnostics, e.g. `8x256`.
    pub fn describe(&self) -> String {
        match self {
            Self::Single => format!("{TABLE_SIZE}"),
            Self::Sliced { slices } => format!("{slices}x{TABLE_SIZE}"),
        }
    }
}

impl Default for GenerationMode {
    fn default() -> Self {
        Self::SLICE8
    }
}

/// Generated tables, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tables {
    /// A flat table.
    Single(Box<Table>),
    /// A nested table set.
    Sliced(Vec<Table>),
}

impl Tables {
    /// Run the generator for `mode`.
    pub fn generate(polynomial: u64, mode: GenerationMode) -> Result<Self> {
        match mode {
            GenerationMode::Single => Ok(Self::Single(Box::new(generate_table(polynomial)))),
            GenerationMode::Sliced { slices } => {
                generate_slices(polynomial, slices).map(Self::Sliced)
            }
        }
    }

    /// The tables as a slice, one element for [`Tables::Single`].
    pub fn as_slice(&self) -> &[Table] {
        match self {
            Self::Single(table) => std::slice::from_ref(&**table),
            Self::Sliced(tables) => tables,
        }
    }

    /// The mode that produces this layout.
    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::Single(_) => GenerationMode::Single,
            Self::Sliced(tables) => GenerationMode::Sliced {
                slices: tables.len(),
            },
        }
    }

    /// Whether the tables are laid out as a nested array.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Sliced(_))
    }

    /// Total number of entries across all tables.
    pub fn entry_count(&self) -> usize {
        self.as_slice().len() * TABLE_SIZE
    }
}
