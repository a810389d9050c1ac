// crates/uiqvga-core/src/decode/row_phase.rs
//
// Per-row horizontal phase: base shift plus a stepped drift that restarts at
// every tile-row boundary. Only one row parity is shifted.

use crate::canvas::{rotate_into, Canvas};
use crate::error::{DecodeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowParity {
    Even,
    Odd,
}

impl RowParity {
    #[inline]
    pub fn matches(self, row: usize) -> bool {
        match self {
            RowParity::Even => row % 2 == 0,
            RowParity::Odd => row % 2 == 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RowParity::Even => "even",
            RowParity::Odd => "odd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "even" => Some(RowParity::Even),
            "odd" => Some(RowParity::Odd),
            _ => None,
        }
    }
}

/// Extra shift of `step` px added every `period` rows inside a tile block.
///
/// `period == 0` means "no drift" and is only valid together with `step == 0`;
/// the constructor refuses anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DriftSpec {
    step: i32,
    period: u32,
}

impl DriftSpec {
    pub const NONE: DriftSpec = DriftSpec { step: 0, period: 0 };

    pub fn new(step: i32, period: u32) -> Result<Self> {
        if period == 0 && step != 0 {
            return Err(DecodeError::InvalidDrift { step });
        }
        Ok(Self { step, period })
    }

    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Drift contribution for a row at `r_in_block` inside its tile block.
    #[inline]
    pub fn offset_at(&self, r_in_block: usize) -> i64 {
        if self.period == 0 {
            return 0;
        }
        (r_in_block as i64 / self.period as i64) * self.step as i64
    }
}

impl Default for DriftSpec {
    fn default() -> Self {
        Self::NONE
    }
}

/// Effective shift for every row of a `height`-row canvas.
pub fn row_shifts(
    height: usize,
    tile_size: usize,
    parity: RowParity,
    base_shift: i32,
    drift: DriftSpec,
) -> Vec<i64> {
    (0..height)
        .map(|r| {
            if parity.matches(r) {
                base_shift as i64 + drift.offset_at(r % tile_size)
            } else {
                0
            }
        })
        .collect()
}

fn shift_rows(canvas: &Canvas, shifts: &[i64], sign: i64) -> Canvas {
    canvas.map_rows(|r, src, dst| rotate_into(src, dst, sign * shifts[r]))
}

/// Decode direction: rotate targeted rows right by their effective shift.
pub fn correct_rows(canvas: &Canvas, parity: RowParity, base_shift: i32, drift: DriftSpec) -> Canvas {
    let g = canvas.geometry();
    let shifts = row_shifts(g.side(), g.tile_size, parity, base_shift, drift);
    shift_rows(canvas, &shifts, 1)
}

/// Inverse of [`correct_rows`].
pub fn misalign_rows(canvas: &Canvas, parity: RowParity, base_shift: i32, drift: DriftSpec) -> Canvas {
    let g = canvas.geometry();
    let shifts = row_shifts(g.side(), g.tile_size, parity, base_shift, drift);
    shift_rows(canvas, &shifts, -1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Geometry;

    #[test]
    fn zero_period_with_step_is_rejected() {
        assert!(DriftSpec::new(1, 0).is_err());
        assert!(DriftSpec::new(-2, 0).is_err());
        assert!(DriftSpec::new(0, 0).is_ok());
        assert!(DriftSpec::new(0, 7).is_ok());
    }

    #[test]
    fn drift_resets_per_tile_block() {
        let drift = DriftSpec::new(1, 2).unwrap();
        let s = row_shifts(8, 4, RowParity::Odd, 3, drift);
        // rows 1,3 in block 0 -> r_in_block 1,3 -> drift 0,1
        // rows 5,7 in block 1 -> r_in_block 1,3 -> drift 0,1
        assert_eq!(s, vec![0, 3, 0, 4, 0, 3, 0, 4]);
    }

    #[test]
    fn even_parity_targets_even_rows() {
        let s = row_shifts(4, 4, RowParity::Even, -2, DriftSpec::NONE);
        assert_eq!(s, vec![-2, 0, -2, 0]);
    }

    #[test]
    fn correct_then_misalign_is_identity() {
        let g = Geometry::new(4, 2).unwrap();
        let c = Canvas::from_fn(g, |r, col| (r * 31 + col) as u16);
        let drift = DriftSpec::new(-3, 1).unwrap();
        let fixed = correct_rows(&c, RowParity::Odd, 11, drift);
        assert_ne!(fixed, c);
        assert_eq!(misalign_rows(&fixed, RowParity::Odd, 11, drift), c);
    }
}
