// crates/uiqvga-core/src/params/defaults.rs
//
// Defaults carried over from the hand-tuned sweeps of the 480x480 UI dump:
// 3x3 tiles of 160 px, column-major tile order, constant 0xAAAA key, BGR.

use crate::canvas::tiles::TileOrder;
use crate::color::ChannelOrder;
use crate::decode::keystream::{XorKeys, XorMode};
use crate::decode::row_phase::RowParity;
use crate::score::ScoreWeights;
use crate::search::space::SearchSpace;

pub const TILE_SIZE: usize = 160;
pub const GRID: usize = 3;
pub const TOP_N: usize = 8;

/// Refuse sweeps larger than this unless the caller raises the cap.
pub const MAX_CANDIDATES: u64 = 2_000_000;

pub const XOR_KEYS: XorKeys = XorKeys::new(0xAAAA, 0x5555);

pub fn default_weights() -> ScoreWeights {
    ScoreWeights {
        seam: 2.0,
        comb: 0.5,
        edge: 0.0,
    }
}

/// Phase/drift/column sweep around the known-good base decoding:
/// s0 in -8..=8, k in -2..=2, L in {16, 32, 40}, per-band offsets in -4..=4.
pub fn default_search_space() -> SearchSpace {
    SearchSpace {
        tile_orders: vec![TileOrder::ColumnMajor],
        xor_modes: vec![XorMode::Constant],
        xor_keys: vec![XOR_KEYS],
        byte_swaps: vec![false],
        channel_orders: vec![ChannelOrder::Bgr],
        row_parities: vec![RowParity::Odd],
        base_shifts: (-8..=8).collect(),
        drift_steps: vec![-2, -1, 0, 1, 2],
        drift_periods: vec![16, 32, 40],
        column_offsets: (-4..=4).collect(),
    }
}

/// Format-discovery sweep: every XOR mode, tile order, byte order and
/// channel order with small odd-row shifts and no drift or band offsets.
pub fn format_search_space() -> SearchSpace {
    SearchSpace {
        tile_orders: vec![TileOrder::RowMajor, TileOrder::ColumnMajor, TileOrder::SerpentineRow],
        xor_modes: XorMode::ALL.to_vec(),
        xor_keys: vec![XOR_KEYS],
        byte_swaps: vec![false, true],
        channel_orders: vec![ChannelOrder::Rgb, ChannelOrder::Bgr],
        row_parities: vec![RowParity::Odd],
        base_shifts: (-2..=2).collect(),
        drift_steps: vec![0],
        drift_periods: vec![0],
        column_offsets: vec![0],
    }
}
