// crates/uiqvga-core/src/params/mod.rs

pub mod checksum;
pub mod defaults;
pub mod format;
pub mod set;
pub mod tag;

pub use set::ParameterSet;
