// crates/uiqvga-core/src/canvas/mod.rs
//
// Square word canvas assembled from a raw dump.
// Every stage returns a fresh Canvas; nothing mutates a canvas it was handed.

pub mod tiles;

use crate::error::{DecodeError, Result};

/// Fixed tile geometry supplied by the caller: `grid x grid` square tiles of
/// `tile_size x tile_size` words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub tile_size: usize,
    pub grid: usize,
}

impl Geometry {
    pub fn new(tile_size: usize, grid: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(DecodeError::InvalidGeometry("tile_size must be >= 1".into()));
        }
        if grid == 0 {
            return Err(DecodeError::InvalidGeometry("grid must be >= 1".into()));
        }
        if tile_size.checked_mul(grid).and_then(|s| s.checked_mul(s)).is_none() {
            return Err(DecodeError::InvalidGeometry(format!(
                "tile_size={tile_size} grid={grid} overflows"
            )));
        }
        Ok(Self { tile_size, grid })
    }

    /// Canvas edge length in pixels.
    #[inline]
    pub fn side(&self) -> usize {
        self.tile_size * self.grid
    }

    #[inline]
    pub fn tile_area(&self) -> usize {
        self.tile_size * self.tile_size
    }

    /// Words needed to fill the canvas.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.side() * self.side()
    }

    /// Bytes needed from the raw dump (two per word).
    #[inline]
    pub fn byte_count(&self) -> usize {
        self.word_count() * 2
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    geometry: Geometry,
    words: Vec<u16>,
}

impl Canvas {
    /// Wrap row-major words. Length must match the geometry exactly.
    pub fn from_words(geometry: Geometry, words: Vec<u16>) -> Result<Self> {
        let need = geometry.word_count();
        if words.len() != need {
            return Err(DecodeError::BufferTooSmall {
                expected: need * 2,
                actual: words.len() * 2,
            });
        }
        Ok(Self { geometry, words })
    }

    /// Canvas filled by `f(row, col)`.
    pub fn from_fn(geometry: Geometry, mut f: impl FnMut(usize, usize) -> u16) -> Self {
        let side = geometry.side();
        let mut words = Vec::with_capacity(geometry.word_count());
        for r in 0..side {
            for c in 0..side {
                words.push(f(r, c));
            }
        }
        Self { geometry, words }
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.geometry.side()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.words[row * self.side() + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[u16] {
        let side = self.side();
        &self.words[row * side..(row + 1) * side]
    }

    #[inline]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Same geometry, every word mapped through `f(row, col, word)`.
    pub fn map(&self, mut f: impl FnMut(usize, usize, u16) -> u16) -> Canvas {
        let side = self.side();
        let words = self
            .words
            .iter()
            .enumerate()
            .map(|(i, &w)| f(i / side, i % side, w))
            .collect();
        Canvas { geometry: self.geometry, words }
    }

    /// Same geometry, each row rebuilt by `f(row_index, src_row, dst_row)`.
    pub(crate) fn map_rows(&self, mut f: impl FnMut(usize, &[u16], &mut [u16])) -> Canvas {
        let side = self.side();
        let mut words = vec![0u16; self.words.len()];
        for (r, dst) in words.chunks_exact_mut(side).enumerate() {
            f(r, self.row(r), dst);
        }
        Canvas { geometry: self.geometry, words }
    }
}

/// Decode the leading `geometry.byte_count()` bytes as little-endian words.
/// Trailing bytes are ignored; a short buffer is fatal.
pub fn words_from_le_bytes(bytes: &[u8], geometry: Geometry) -> Result<Vec<u16>> {
    let need = geometry.byte_count();
    if bytes.len() < need {
        return Err(DecodeError::BufferTooSmall {
            expected: need,
            actual: bytes.len(),
        });
    }
    Ok(bytes[..need]
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect())
}

pub fn words_to_le_bytes(words: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 2);
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

/// Cyclic right rotation of `src` into `dst` by `shift` (any sign).
/// `dst[c] = src[(c - shift) mod len]`.
#[inline]
pub(crate) fn rotate_into(src: &[u16], dst: &mut [u16], shift: i64) {
    let n = src.len();
    if n == 0 {
        return;
    }
    let s = shift.rem_euclid(n as i64) as usize;
    dst[s..].copy_from_slice(&src[..n - s]);
    dst[..s].copy_from_slice(&src[n - s..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_rejects_zero() {
        assert!(Geometry::new(0, 3).is_err());
        assert!(Geometry::new(2, 0).is_err());
        let g = Geometry::new(160, 3).unwrap();
        assert_eq!(g.side(), 480);
        assert_eq!(g.byte_count(), 480 * 480 * 2);
    }

    #[test]
    fn short_buffer_is_fatal() {
        let g = Geometry::new(2, 3).unwrap();
        let err = words_from_le_bytes(&[0u8; 71], g).unwrap_err();
        match err {
            DecodeError::BufferTooSmall { expected, actual } => {
                assert_eq!(expected, 72);
                assert_eq!(actual, 71);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn words_are_little_endian_and_trailing_bytes_ignored() {
        let g = Geometry::new(1, 1).unwrap();
        let w = words_from_le_bytes(&[0x34, 0x12, 0xFF], g).unwrap();
        assert_eq!(w, vec![0x1234]);
    }

    #[test]
    fn rotate_matches_numpy_roll() {
        let src = [1u16, 2, 3, 4, 5];
        let mut dst = [0u16; 5];
        rotate_into(&src, &mut dst, 2);
        assert_eq!(dst, [4, 5, 1, 2, 3]);
        rotate_into(&src, &mut dst, -1);
        assert_eq!(dst, [2, 3, 4, 5, 1]);
        rotate_into(&src, &mut dst, 12);
        assert_eq!(dst, [4, 5, 1, 2, 3]);
    }
}
