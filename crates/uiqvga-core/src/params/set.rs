// crates/uiqvga-core/src/params/set.rs

use crate::canvas::tiles::TileOrder;
use crate::color::ChannelOrder;
use crate::decode::keystream::{XorKeys, XorMode};
use crate::decode::row_phase::{DriftSpec, RowParity};

/// One complete decode configuration. A given ParameterSet and raw buffer
/// always render the same image.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    pub tile_order: TileOrder,
    pub xor_mode: XorMode,
    pub xor_keys: XorKeys,
    pub byte_swap: bool,
    pub channel_order: ChannelOrder,
    /// Rows that receive the phase correction (odd by convention).
    pub row_parity: RowParity,
    pub odd_row_base_shift: i32,
    pub drift: DriftSpec,
    /// One offset per tile-column band, left to right.
    pub column_offsets: Vec<i32>,
}

impl ParameterSet {
    /// Identity-ish decode for `grid` bands: row-major, no XOR key, no shifts.
    pub fn plain(grid: usize) -> Self {
        Self {
            tile_order: TileOrder::RowMajor,
            xor_mode: XorMode::Constant,
            xor_keys: XorKeys::single(0),
            byte_swap: false,
            channel_order: ChannelOrder::Rgb,
            row_parity: RowParity::Odd,
            odd_row_base_shift: 0,
            drift: DriftSpec::NONE,
            column_offsets: vec![0; grid],
        }
    }

    pub fn id_16(&self) -> [u8; 16] {
        crate::params::format::param_id_16(self)
    }

    pub fn id_hex(&self) -> String {
        crate::params::checksum::hex_id(&self.id_16())
    }
}
