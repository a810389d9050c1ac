// crates/uiqvga-core/src/search/space.rs
//
// Declarative parameter ranges and their lazy enumeration.
//
// The cartesian product is addressed by a mixed-radix index, outermost axis
// first: tile order, xor mode, keys, byte swap, channel order, row parity,
// drift period, drift step, base shift, then one column offset per band
// (band 0 outermost). Invalid drift pairs are skipped at generation time; the
// raw index doubles as the candidate's ordinal, so enumeration order is fixed.

use crate::canvas::tiles::TileOrder;
use crate::color::ChannelOrder;
use crate::decode::keystream::{XorKeys, XorMode};
use crate::decode::row_phase::{DriftSpec, RowParity};
use crate::error::{DecodeError, Result};
use crate::params::ParameterSet;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchSpace {
    pub tile_orders: Vec<TileOrder>,
    pub xor_modes: Vec<XorMode>,
    pub xor_keys: Vec<XorKeys>,
    pub byte_swaps: Vec<bool>,
    pub channel_orders: Vec<ChannelOrder>,
    pub row_parities: Vec<RowParity>,
    pub base_shifts: Vec<i32>,
    pub drift_steps: Vec<i32>,
    pub drift_periods: Vec<u32>,
    /// Values tried for every band independently.
    pub column_offsets: Vec<i32>,
}

impl SearchSpace {
    /// Smallest space containing `p`; one candidate when all offsets agree.
    pub fn single(p: &ParameterSet) -> Self {
        Self {
            tile_orders: vec![p.tile_order],
            xor_modes: vec![p.xor_mode],
            xor_keys: vec![p.xor_keys],
            byte_swaps: vec![p.byte_swap],
            channel_orders: vec![p.channel_order],
            row_parities: vec![p.row_parity],
            base_shifts: vec![p.odd_row_base_shift],
            drift_steps: vec![p.drift.step()],
            drift_periods: vec![p.drift.period()],
            column_offsets: {
                let mut v = p.column_offsets.clone();
                v.sort_unstable();
                v.dedup();
                v
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let axes: [(&'static str, usize); 10] = [
            ("tile_orders", self.tile_orders.len()),
            ("xor_modes", self.xor_modes.len()),
            ("xor_keys", self.xor_keys.len()),
            ("byte_swaps", self.byte_swaps.len()),
            ("channel_orders", self.channel_orders.len()),
            ("row_parities", self.row_parities.len()),
            ("base_shifts", self.base_shifts.len()),
            ("drift_steps", self.drift_steps.len()),
            ("drift_periods", self.drift_periods.len()),
            ("column_offsets", self.column_offsets.len()),
        ];
        for (name, len) in axes {
            if len == 0 {
                return Err(DecodeError::EmptyAxis(name));
            }
        }
        Ok(())
    }

    fn radices(&self, grid: usize) -> Vec<u128> {
        let mut r = vec![
            self.tile_orders.len() as u128,
            self.xor_modes.len() as u128,
            self.xor_keys.len() as u128,
            self.byte_swaps.len() as u128,
            self.channel_orders.len() as u128,
            self.row_parities.len() as u128,
            self.drift_periods.len() as u128,
            self.drift_steps.len() as u128,
            self.base_shifts.len() as u128,
        ];
        r.extend(std::iter::repeat(self.column_offsets.len() as u128).take(grid));
        r
    }

    /// Size of the unfiltered product, saturating at `u128::MAX`.
    pub fn raw_combinations(&self, grid: usize) -> u128 {
        self.radices(grid).into_iter().fold(1u128, |acc, n| acc.saturating_mul(n))
    }

    /// Number of candidates that survive drift filtering.
    pub fn valid_combinations(&self, grid: usize) -> u128 {
        let raw = self.raw_combinations(grid);
        let all_pairs = (self.drift_steps.len() * self.drift_periods.len()) as u128;
        if all_pairs == 0 {
            return 0;
        }
        let valid_pairs = self
            .drift_periods
            .iter()
            .flat_map(|&l| self.drift_steps.iter().map(move |&k| DriftSpec::new(k, l)))
            .filter(|d| d.is_ok())
            .count() as u128;
        (raw / all_pairs).saturating_mul(valid_pairs)
    }

    /// Candidate at mixed-radix `index`, or `None` when its drift pair is
    /// invalid or the index is past the end.
    pub fn candidate_at(&self, index: u128, grid: usize) -> Option<ParameterSet> {
        let radices = self.radices(grid);
        if radices.iter().any(|&n| n == 0) || index >= self.raw_combinations(grid) {
            return None;
        }

        let mut digits = vec![0usize; radices.len()];
        let mut rest = index;
        for (d, &n) in digits.iter_mut().zip(radices.iter()).rev() {
            *d = (rest % n) as usize;
            rest /= n;
        }

        let drift = DriftSpec::new(self.drift_steps[digits[7]], self.drift_periods[digits[6]]).ok()?;

        Some(ParameterSet {
            tile_order: self.tile_orders[digits[0]],
            xor_mode: self.xor_modes[digits[1]],
            xor_keys: self.xor_keys[digits[2]],
            byte_swap: self.byte_swaps[digits[3]],
            channel_order: self.channel_orders[digits[4]],
            row_parity: self.row_parities[digits[5]],
            odd_row_base_shift: self.base_shifts[digits[8]],
            drift,
            column_offsets: digits[9..].iter().map(|&i| self.column_offsets[i]).collect(),
        })
    }

    /// Lazy `(ordinal, params)` stream in enumeration order.
    pub fn candidates(&self, grid: usize) -> impl Iterator<Item = (u64, ParameterSet)> + '_ {
        let total = self.raw_combinations(grid).min(u64::MAX as u128) as u64;
        (0..total).filter_map(move |i| self.candidate_at(i as u128, grid).map(|p| (i, p)))
    }
}
