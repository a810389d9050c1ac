// crates/uiqvga-cli/src/io/params_file.rs

use anyhow::{Context, Result};
use uiqvga_core::params::format as params_format;
use uiqvga_core::ParameterSet;

/// Load a .uqp file (magic, crc32 and blake3 are all checked).
pub fn load_uqp(path: &str) -> Result<ParameterSet> {
    let bytes = load_uqp_bytes(path)?;
    let p = params_format::decode(&bytes).with_context(|| format!("decode params {path}"))?;
    Ok(p)
}

pub fn load_uqp_bytes(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read params {path}"))
}

pub fn save_uqp(path: &str, p: &ParameterSet) -> Result<()> {
    let bytes = params_format::encode(p);
    std::fs::write(path, bytes).with_context(|| format!("write params {path}"))?;
    Ok(())
}
