// crates/uiqvga-core/src/search/mod.rs

pub mod driver;
pub mod space;
pub mod topn;

pub use driver::{CandidateResult, SearchConfig, SearchReport, Searcher};
pub use space::SearchSpace;
pub use topn::TopN;
