// crates/uiqvga-core/src/decode/column_align.rs
//
// Independent cyclic shift per vertical tile-column band.

use crate::canvas::{rotate_into, Canvas};
use crate::error::{DecodeError, Result};

fn check_bands(canvas: &Canvas, offsets: &[i32]) -> Result<()> {
    let grid = canvas.geometry().grid;
    if offsets.len() != grid {
        return Err(DecodeError::ColumnOffsetCount {
            expected: grid,
            actual: offsets.len(),
        });
    }
    Ok(())
}

fn shift_bands(canvas: &Canvas, offsets: &[i32], sign: i64) -> Canvas {
    let t = canvas.geometry().tile_size;
    canvas.map_rows(|_, src, dst| {
        for (b, &off) in offsets.iter().enumerate() {
            let span = b * t..(b + 1) * t;
            rotate_into(&src[span.clone()], &mut dst[span], sign * off as i64);
        }
    })
}

/// Decode direction: rotate band `b` right by `offsets[b]` (mod tile_size).
pub fn align_columns(canvas: &Canvas, offsets: &[i32]) -> Result<Canvas> {
    check_bands(canvas, offsets)?;
    if offsets.iter().all(|&o| o == 0) {
        return Ok(canvas.clone());
    }
    Ok(shift_bands(canvas, offsets, 1))
}

/// Inverse of [`align_columns`].
pub fn misalign_columns(canvas: &Canvas, offsets: &[i32]) -> Result<Canvas> {
    check_bands(canvas, offsets)?;
    if offsets.iter().all(|&o| o == 0) {
        return Ok(canvas.clone());
    }
    Ok(shift_bands(canvas, offsets, -1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Geometry;

    #[test]
    fn bands_move_independently() {
        let g = Geometry::new(3, 2).unwrap();
        let c = Canvas::from_fn(g, |_, col| col as u16);
        let out = align_columns(&c, &[1, 0]).unwrap();
        assert_eq!(out.row(0), &[2, 0, 1, 3, 4, 5]);
        let out = align_columns(&c, &[0, -1]).unwrap();
        assert_eq!(out.row(4), &[0, 1, 2, 4, 5, 3]);
    }

    #[test]
    fn wrong_band_count_is_an_error() {
        let g = Geometry::new(2, 3).unwrap();
        let c = Canvas::from_fn(g, |_, _| 0);
        assert!(align_columns(&c, &[0, 0]).is_err());
        assert!(misalign_columns(&c, &[0, 0, 0, 0]).is_err());
    }
}
