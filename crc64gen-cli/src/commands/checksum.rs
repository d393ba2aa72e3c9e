//! Checksum command implementation.

use crate::utils::{checksum_path, hex64};
use crc64gen_core::{Crc64, Crc64Params};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON serializable checksum result.
#[derive(Debug, Serialize, Deserialize)]
struct ChecksumJson {
    file: String,
    algorithm: String,
    crc: String,
    bytes: u64,
}

pub fn cmd_checksum(
    files: &[PathBuf],
    params: Crc64Params,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = [PathBuf::from("-")];
    let inputs = if files.is_empty() { &stdin[..] } else { files };

    // Tables are generated once and reused for every input.
    let mut crc = Crc64::new(params);
    let mut results = Vec::with_capacity(inputs.len());

    for path in inputs {
        crc.reset();
        let bytes = checksum_path(&mut crc, path)?;
        debug!(file = %path.display(), bytes, "checksummed");
        results.push(ChecksumJson {
            file: display_name(path),
            algorithm: params.name.to_string(),
            crc: hex64(crc.value()),
            bytes,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}  {}", &result.crc[2..], result.file);
        }
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
