// crates/uiqvga-core/src/decode/mod.rs

pub mod column_align;
pub mod keystream;
pub mod pipeline;
pub mod row_phase;
