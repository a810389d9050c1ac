// crates/uiqvga-core/src/decode/pipeline.rs
//
// Decode: assemble -> XOR -> row phase -> column bands -> RGB888.
// Scramble is the exact reverse, used to build fixtures from known canvases.

use crate::canvas::tiles::{assemble, disassemble};
use crate::canvas::{Canvas, Geometry};
use crate::color::{render_canvas, RenderedImage};
use crate::decode::column_align::{align_columns, misalign_columns};
use crate::decode::keystream::apply_keystream;
use crate::decode::row_phase::{correct_rows, misalign_rows};
use crate::error::Result;
use crate::params::ParameterSet;
use crate::validate::validate_params;

/// Stages after tile assembly. Split out so the searcher can reuse one
/// assembled canvas per tile order.
pub fn decode_assembled(assembled: &Canvas, params: &ParameterSet) -> Result<Canvas> {
    validate_params(params, assembled.geometry())?;
    let plain = apply_keystream(assembled, params.xor_mode, params.xor_keys);
    let rows = correct_rows(&plain, params.row_parity, params.odd_row_base_shift, params.drift);
    align_columns(&rows, &params.column_offsets)
}

pub fn decode_canvas(words: &[u16], geometry: Geometry, params: &ParameterSet) -> Result<Canvas> {
    validate_params(params, geometry)?;
    let assembled = assemble(words, geometry, params.tile_order)?;
    decode_assembled(&assembled, params)
}

pub fn render(words: &[u16], geometry: Geometry, params: &ParameterSet) -> Result<RenderedImage> {
    let canvas = decode_canvas(words, geometry, params)?;
    Ok(render_canvas(&canvas, params.byte_swap, params.channel_order))
}

/// Forward obfuscation: the raw on-disk word stream that `decode_canvas`
/// turns back into `canvas` under the same parameters.
pub fn scramble(canvas: &Canvas, params: &ParameterSet) -> Result<Vec<u16>> {
    validate_params(params, canvas.geometry())?;
    let cols = misalign_columns(canvas, &params.column_offsets)?;
    let rows = misalign_rows(&cols, params.row_parity, params.odd_row_base_shift, params.drift);
    let keyed = apply_keystream(&rows, params.xor_mode, params.xor_keys);
    Ok(disassemble(&keyed, params.tile_order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_params_only_assemble() {
        let g = Geometry::new(2, 2).unwrap();
        let words: Vec<u16> = (0..16).collect();
        let c = decode_canvas(&words, g, &ParameterSet::plain(2)).unwrap();
        assert_eq!(c.row(0), &[0, 1, 4, 5]);
        assert_eq!(c.row(3), &[10, 11, 14, 15]);
    }

    #[test]
    fn band_count_mismatch_fails_before_rendering() {
        let g = Geometry::new(2, 2).unwrap();
        let words = vec![0u16; 16];
        assert!(render(&words, g, &ParameterSet::plain(3)).is_err());
    }
}
