// crates/uiqvga-core/src/canvas/tiles.rs
//
// Tile placement: linear on-disk tile index <-> (tile_row, tile_col).

use crate::canvas::{Canvas, Geometry};
use crate::error::{DecodeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileOrder {
    /// (0,0) (0,1) (0,2) (1,0) ...
    RowMajor,
    /// (0,0) (1,0) (2,0) (0,1) ...
    ColumnMajor,
    /// Row-major, odd tile-rows run right to left.
    SerpentineRow,
    /// Column-major, odd tile-columns run bottom to top.
    SerpentineColumn,
}

impl TileOrder {
    pub const ALL: [TileOrder; 4] = [
        TileOrder::RowMajor,
        TileOrder::ColumnMajor,
        TileOrder::SerpentineRow,
        TileOrder::SerpentineColumn,
    ];

    /// Placement of linear tile `idx` as (tile_row, tile_col).
    #[inline]
    pub fn position(self, idx: usize, grid: usize) -> (usize, usize) {
        match self {
            TileOrder::RowMajor => (idx / grid, idx % grid),
            TileOrder::ColumnMajor => (idx % grid, idx / grid),
            TileOrder::SerpentineRow => {
                let (ty, tx) = (idx / grid, idx % grid);
                if ty % 2 == 1 {
                    (ty, grid - 1 - tx)
                } else {
                    (ty, tx)
                }
            }
            TileOrder::SerpentineColumn => {
                let (ty, tx) = (idx % grid, idx / grid);
                if tx % 2 == 1 {
                    (grid - 1 - ty, tx)
                } else {
                    (ty, tx)
                }
            }
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileOrder::RowMajor => 0,
            TileOrder::ColumnMajor => 1,
            TileOrder::SerpentineRow => 2,
            TileOrder::SerpentineColumn => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.code() == code)
    }

    /// Short name used in tags and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            TileOrder::RowMajor => "row",
            TileOrder::ColumnMajor => "col",
            TileOrder::SerpentineRow => "serp",
            TileOrder::SerpentineColumn => "serpcol",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.name() == name)
    }
}

/// Placement sequence for every tile in on-disk order.
pub fn tile_positions(order: TileOrder, grid: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..grid * grid).map(move |idx| order.position(idx, grid))
}

/// Place on-disk tiles onto a canvas. Words past the geometry are ignored.
pub fn assemble(words: &[u16], geometry: Geometry, order: TileOrder) -> Result<Canvas> {
    let need = geometry.word_count();
    if words.len() < need {
        return Err(DecodeError::BufferTooSmall {
            expected: need * 2,
            actual: words.len() * 2,
        });
    }

    let t = geometry.tile_size;
    let side = geometry.side();
    let mut out = vec![0u16; need];

    for (idx, (ty, tx)) in tile_positions(order, geometry.grid).enumerate() {
        let tile = &words[idx * geometry.tile_area()..(idx + 1) * geometry.tile_area()];
        for (y, src) in tile.chunks_exact(t).enumerate() {
            let dst = (ty * t + y) * side + tx * t;
            out[dst..dst + t].copy_from_slice(src);
        }
    }

    Canvas::from_words(geometry, out)
}

/// Exact inverse of [`assemble`]: canvas back to on-disk tile sequence.
pub fn disassemble(canvas: &Canvas, order: TileOrder) -> Vec<u16> {
    let geometry = canvas.geometry();
    let t = geometry.tile_size;
    let mut out = Vec::with_capacity(geometry.word_count());

    for (ty, tx) in tile_positions(order, geometry.grid) {
        for y in 0..t {
            let row = canvas.row(ty * t + y);
            out.extend_from_slice(&row[tx * t..(tx + 1) * t]);
        }
    }
    out
}
