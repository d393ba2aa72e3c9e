//! Presets command implementation.

use crate::utils::hex64;
use crc64gen_core::Crc64Params;
use serde::{Deserialize, Serialize};

/// JSON serializable preset description.
#[derive(Debug, Serialize, Deserialize)]
struct PresetJson {
    name: String,
    normal: String,
    reflected: String,
    init: String,
    xor_out: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<String>,
    self_test: Option<bool>,
}

impl PresetJson {
    fn from_params(params: &Crc64Params) -> Self {
        Self {
            name: params.name.to_string(),
            normal: hex64(params.normal_polynomial()),
            reflected: hex64(params.polynomial),
            init: hex64(params.init),
            xor_out: hex64(params.xor_out),
            check: params.check.map(hex64),
            self_test: params.self_test(),
        }
    }
}

pub fn cmd_presets(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let presets: Vec<PresetJson> = Crc64Params::PRESETS
        .iter()
        .map(PresetJson::from_params)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>18} {:>18} {:>18} {:>18} {:>18}  Self-test",
        "Name", "Normal", "Reflected", "Init", "XorOut", "Check"
    );
    println!("{}", "-".repeat(111));
    for preset in &presets {
        let status = match preset.self_test {
            Some(true) => "ok",
            Some(false) => "FAILED",
            None => "-",
        };
        println!(
            "{:<8} {:>18} {:>18} {:>18} {:>18} {:>18}  {}",
            preset.name,
            preset.normal,
            preset.reflected,
            preset.init,
            preset.xor_out,
            preset.check.as_deref().unwrap_or("-"),
            status
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_json() {
        let json = PresetJson::from_params(&Crc64Params::ECMA_182);
        assert_eq!(json.normal, "0x42f0e1eba9ea3693");
        assert_eq!(json.reflected, "0xc96c5795d7870f42");
        assert_eq!(json.init, "0xffffffffffffffff");
        assert_eq!(json.check.as_deref(), Some("0x995dc9bbdf1939fa"));
        assert_eq!(json.self_test, Some(true));
    }
}
