//! Utility functions for the CLI.

use crc64gen_core::Crc64;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Read buffer size for checksum input.
const CHUNK_SIZE: usize = 64 * 1024;

/// Install the stderr logger.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step
/// from `warn`. Logs never go to stdout, which carries generated code.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Feed everything from `reader` into `crc`, returning the byte count.
pub fn update_from_reader<R: Read>(crc: &mut Crc64, mut reader: R) -> io::Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        crc.update(&buf[..n]);
        total += n as u64;
    }

    Ok(total)
}

/// Checksum a file, or stdin when `path` is `-`.
pub fn checksum_path(crc: &mut Crc64, path: &Path) -> io::Result<u64> {
    if path == Path::new("-") {
        return update_from_reader(crc, io::stdin().lock());
    }
    let file = File::open(path)?;
    update_from_reader(crc, BufReader::new(file))
}

/// Format a 64-bit value the way the generated tables do.
pub fn hex64(value: u64) -> String {
    format!("0x{value:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crc64gen_core::Crc64Params;

    #[test]
    fn test_update_from_reader_large_input() {
        // Spans several read chunks.
        let data: Vec<u8> = (0..(3 * CHUNK_SIZE + 17)).map(|i| i as u8).collect();

        let mut crc = Crc64::new(Crc64Params::ECMA_182);
        let n = update_from_reader(&mut crc, data.as_slice()).unwrap();

        assert_eq!(n, data.len() as u64);
        assert_eq!(crc.finalize(), Crc64::compute(Crc64Params::ECMA_182, &data));
    }

    #[test]
    fn test_hex64() {
        assert_eq!(hex64(0x7ad870c830358979), "0x7ad870c830358979");
        assert_eq!(hex64(1), "0x0000000000000001");
    }
}
