// crates/uiqvga-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid drift: step={step} with period=0")]
    InvalidDrift { step: i32 },

    #[error("column offsets: expected {expected} bands, got {actual}")]
    ColumnOffsetCount { expected: usize, actual: usize },

    #[error("image size {width}x{height} does not match canvas side {side}")]
    ImageSize { width: u32, height: u32, side: usize },

    #[error("search axis `{0}` is empty")]
    EmptyAxis(&'static str),

    #[error("search space too large: {combinations} combinations (cap {cap})")]
    SearchTooLarge { combinations: u128, cap: u64 },

    #[error("worker pool: {0}")]
    ThreadPool(String),

    #[error("param format error: {0}")]
    ParamFormat(String),

    #[error("param tag error: {0}")]
    ParamTag(String),
}
