pub mod error;
pub mod validate;

pub mod canvas;
pub mod color;
pub mod decode;
pub mod params;
pub mod score;
pub mod search;

pub use crate::canvas::tiles::TileOrder;
pub use crate::canvas::{Canvas, Geometry};
pub use crate::color::{ChannelOrder, RenderedImage};
pub use crate::decode::keystream::{XorKeys, XorMode};
pub use crate::decode::row_phase::{DriftSpec, RowParity};
pub use crate::error::{DecodeError, Result};
pub use crate::params::ParameterSet;
pub use crate::score::{ScoreMetrics, ScoreWeights};
pub use crate::search::{CandidateResult, SearchConfig, SearchReport, SearchSpace, Searcher};
