// crates/uiqvga-cli/src/io/raw.rs

use anyhow::{Context, Result};

/// Raw dump bytes; length is checked by the core against the geometry.
pub fn read_dump(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read dump {path}"))
}

pub fn write_dump(path: &str, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write dump {path}"))
}
