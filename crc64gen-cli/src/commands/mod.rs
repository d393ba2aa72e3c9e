//! Command implementations for the crc64gen CLI.

pub mod check;
pub mod checksum;
pub mod completions;
pub mod generate;
pub mod presets;

pub use check::cmd_check;
pub use checksum::cmd_checksum;
pub use completions::cmd_completions;
pub use generate::cmd_generate;
pub use presets::cmd_presets;
