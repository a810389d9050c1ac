// crates/uiqvga-cli/src/io/mod.rs

pub mod manifest;
pub mod params_file;
pub mod png;
pub mod raw;
