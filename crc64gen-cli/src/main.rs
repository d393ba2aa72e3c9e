//! crc64gen CLI - CRC-64 lookup table generator
//!
//! Emits reflected CRC-64 tables as static C or Rust array literals, checks
//! previously generated files and computes table-driven checksums.

mod commands;
mod utils;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use crc64gen_core::format::{FormatConfig, Syntax};
use crc64gen_core::polynomial::{parse_polynomial, reflect};
use crc64gen_core::table::SLICE8;
use crc64gen_core::{Crc64Params, GenerationMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crc64gen")]
#[command(author, version, about = "CRC-64 lookup table generator")]
#[command(long_about = "
crc64gen computes CRC-64 lookup tables (reflected polynomial form) and prints
them as static array literals for inclusion in a host program.

Examples:
  crc64gen generate > crc64_table.h
  crc64gen generate --mode single --columns 4
  crc64gen generate --preset ecma182 --syntax rust --name CRC64_ECMA
  crc64gen generate --polynomial 0xad93d23594c935a9 --normal
  crc64gen check crc64_table.h
  crc64gen checksum --preset nvme data.bin
  crc64gen presets --json
")]
pub(crate) struct Cli {
    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print lookup tables as a static array literal
    #[command(alias = "g")]
    Generate {
        #[command(flatten)]
        polynomial: PolynomialArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Array name (default: crc_table for C, CRC_TABLE for Rust)
        #[arg(short, long)]
        name: Option<String>,

        /// Entries per line
        #[arg(short, long, default_value_t = FormatConfig::DEFAULT_COLUMNS)]
        columns: usize,

        /// Output language
        #[arg(short, long, value_enum, default_value = "c")]
        syntax: SyntaxArg,
    },

    /// Verify a generated file is up to date
    #[command(alias = "k")]
    Check {
        /// Previously generated file
        file: PathBuf,

        #[command(flatten)]
        polynomial: PolynomialArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Compute CRC-64 checksums of files (stdin when none given)
    #[command(alias = "c")]
    Checksum {
        /// Files to checksum
        files: Vec<PathBuf>,

        #[command(flatten)]
        polynomial: PolynomialArgs,

        /// Initial register value (hex)
        #[arg(long, value_parser = parse_polynomial)]
        init: Option<u64>,

        /// Final XOR value (hex)
        #[arg(long, value_parser = parse_polynomial)]
        xor_out: Option<u64>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// List built-in polynomial presets
    Presets {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Polynomial selection shared by all table commands.
#[derive(Args, Debug, Clone)]
struct PolynomialArgs {
    /// Built-in polynomial preset
    #[arg(short, long, value_enum, conflicts_with = "polynomial")]
    preset: Option<Preset>,

    /// Custom polynomial (hex), reflected form unless --normal is given
    #[arg(short = 'P', long, value_parser = parse_polynomial)]
    polynomial: Option<u64>,

    /// Treat --polynomial as normal (non-reflected) form
    #[arg(long, requires = "polynomial")]
    normal: bool,
}

impl PolynomialArgs {
    /// Parameters of the selected preset, or of the custom polynomial.
    fn params(&self) -> Crc64Params {
        match self.polynomial {
            Some(poly) if self.normal => Crc64Params::custom(reflect(poly), 0, 0),
            Some(poly) => Crc64Params::custom(poly, 0, 0),
            None => self.preset.unwrap_or_default().params(),
        }
    }

    /// Reflected polynomial to generate tables for.
    fn reflected(&self) -> u64 {
        self.params().polynomial
    }
}

/// Table layout shared by `generate` and `check`.
#[derive(Args, Debug, Clone)]
struct LayoutArgs {
    /// Single flat table or nested slicing table set
    #[arg(short, long, value_enum, default_value = "sliced")]
    mode: ModeArg,

    /// Number of tables in sliced mode [default: 8]
    #[arg(long, value_parser = parse_slices)]
    slices: Option<usize>,
}

impl LayoutArgs {
    fn mode(&self) -> Result<GenerationMode, clap::Error> {
        match (self.mode, self.slices) {
            (ModeArg::Single, Some(_)) => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--slices only applies to --mode sliced",
            )),
            (ModeArg::Single, None) => Ok(GenerationMode::Single),
            (ModeArg::Sliced, slices) => Ok(GenerationMode::Sliced {
                slices: slices.unwrap_or(SLICE8),
            }),
        }
    }

    /// Layout mode, exiting with a usage error when the flags disagree.
    fn mode_or_exit(&self) -> GenerationMode {
        self.mode().unwrap_or_else(|e| e.exit())
    }
}

/// Parse a slice count, rejecting values the generator refuses.
fn parse_slices(s: &str) -> Result<usize, String> {
    let slices: usize = s.parse().map_err(|e| format!("{e}"))?;
    GenerationMode::Sliced { slices }
        .validate()
        .map_err(|e| e.to_string())?;
    Ok(slices)
}

/// Built-in polynomial preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum Preset {
    /// CRC-64/Jones (default)
    #[default]
    Jones,
    /// CRC-64/ECMA-182 (XZ)
    Ecma182,
    /// CRC-64/NVMe
    Nvme,
}

impl Preset {
    fn params(self) -> Crc64Params {
        match self {
            Self::Jones => Crc64Params::JONES,
            Self::Ecma182 => Crc64Params::ECMA_182,
            Self::Nvme => Crc64Params::NVME,
        }
    }
}

/// Table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// One 256-entry table
    Single,
    /// Nested slicing-by-N table set
    Sliced,
}

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SyntaxArg {
    /// C array literal
    C,
    /// Rust static array
    Rust,
}

impl From<SyntaxArg> for Syntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::C => Syntax::C,
            SyntaxArg::Rust => Syntax::Rust,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            polynomial,
            layout,
            name,
            columns,
            syntax,
        } => commands::cmd_generate(
            polynomial.reflected(),
            layout.mode_or_exit(),
            name,
            columns,
            syntax.into(),
        ),
        Commands::Check {
            file,
            polynomial,
            layout,
        } => commands::cmd_check(&file, polynomial.reflected(), layout.mode_or_exit()),
        Commands::Checksum {
            files,
            polynomial,
            init,
            xor_out,
            json,
        } => {
            let mut params = polynomial.params();
            if init.is_some() || xor_out.is_some() {
                params = Crc64Params::custom(
                    params.polynomial,
                    init.unwrap_or(params.init),
                    xor_out.unwrap_or(params.xor_out),
                );
            }
            commands::cmd_checksum(&files, params, json)
        }
        Commands::Presets { json } => commands::cmd_presets(json),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["crc64gen", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                polynomial,
                layout,
                name,
                columns,
                syntax,
            } => {
                assert_eq!(polynomial.reflected(), crc64gen_core::polynomial::JONES);
                assert_eq!(layout.mode().unwrap(), GenerationMode::SLICE8);
                assert_eq!(name, None);
                assert_eq!(columns, 2);
                assert_eq!(syntax, SyntaxArg::C);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_normal_polynomial_is_reflected() {
        let cli = Cli::try_parse_from([
            "crc64gen",
            "g",
            "--polynomial",
            "0x42f0e1eba9ea3693",
            "--normal",
            "--mode",
            "single",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                polynomial, layout, ..
            } => {
                assert_eq!(polynomial.reflected(), crc64gen_core::polynomial::ECMA_182);
                assert_eq!(layout.mode().unwrap(), GenerationMode::Single);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_preset_conflicts_with_polynomial() {
        let result = Cli::try_parse_from([
            "crc64gen",
            "generate",
            "--preset",
            "nvme",
            "--polynomial",
            "0x1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_normal_requires_polynomial() {
        assert!(Cli::try_parse_from(["crc64gen", "generate", "--normal"]).is_err());
    }

    #[test]
    fn test_bad_polynomial_rejected() {
        assert!(Cli::try_parse_from(["crc64gen", "generate", "-P", "0xzz"]).is_err());
    }

    fn check_layout(args: &[&str]) -> Result<GenerationMode, clap::Error> {
        let cli = Cli::try_parse_from(args.iter().copied())?;
        match cli.command {
            Commands::Check { layout, .. } => layout.mode(),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_slices_conflict_with_single_mode() {
        let err = check_layout(&["crc64gen", "check", "t.h", "--mode", "single", "--slices", "4"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        assert_eq!(
            check_layout(&["crc64gen", "check", "t.h", "--slices", "4"]).unwrap(),
            GenerationMode::Sliced { slices: 4 }
        );
    }

    #[test]
    fn test_slice_count_validated_at_parse_time() {
        for bad in ["0", "65", "18446744073709551615", "many"] {
            let err = check_layout(&["crc64gen", "check", "t.h", "--slices", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "accepted {bad}");
        }
        assert!(Cli::try_parse_from(["crc64gen", "generate", "--slices", "0"]).is_err());
    }
}
