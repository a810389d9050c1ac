// crates/uiqvga-core/src/params/tag.rs
//
// Filename-safe textual tag, e.g.
//   col_checker-aaaa-5555_swap0_bgr_odd+3_k1_L32_cols1_-2_0
// Every field is present, so a tag fully reproduces its ParameterSet.

use std::fmt;
use std::str::FromStr;

use crate::canvas::tiles::TileOrder;
use crate::color::ChannelOrder;
use crate::decode::keystream::{XorKeys, XorMode};
use crate::decode::row_phase::{DriftSpec, RowParity};
use crate::error::DecodeError;
use crate::params::ParameterSet;

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}-{:04x}-{:04x}_swap{}_{}_{}{:+}_k{}_L{}_cols",
            self.tile_order.name(),
            self.xor_mode.name(),
            self.xor_keys.primary,
            self.xor_keys.secondary,
            u8::from(self.byte_swap),
            self.channel_order.name(),
            self.row_parity.name(),
            self.odd_row_base_shift,
            self.drift.step(),
            self.drift.period(),
        )?;
        for (i, off) in self.column_offsets.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            write!(f, "{off}")?;
        }
        Ok(())
    }
}

fn bad(tag: &str, what: &str) -> DecodeError {
    DecodeError::ParamTag(format!("{what} in `{tag}`"))
}

fn int<T: FromStr>(tag: &str, s: &str, what: &str) -> Result<T, DecodeError> {
    s.parse::<T>().map_err(|_| bad(tag, what))
}

impl FromStr for ParameterSet {
    type Err = DecodeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = tag.split('_').collect();
        if parts.len() < 8 {
            return Err(bad(tag, "too few fields"));
        }

        let tile_order = TileOrder::from_name(parts[0]).ok_or_else(|| bad(tag, "unknown tile order"))?;

        let mut xor = parts[1].split('-');
        let xor_mode = xor
            .next()
            .and_then(XorMode::from_name)
            .ok_or_else(|| bad(tag, "unknown xor mode"))?;
        let mut key = |what: &str| {
            xor.next()
                .and_then(|k| u16::from_str_radix(k, 16).ok())
                .ok_or_else(|| bad(tag, what))
        };
        let xor_keys = XorKeys::new(key("bad primary key")?, key("bad secondary key")?);

        let byte_swap = match parts[2] {
            "swap0" => false,
            "swap1" => true,
            _ => return Err(bad(tag, "bad swap field")),
        };
        let channel_order = ChannelOrder::from_name(parts[3]).ok_or_else(|| bad(tag, "unknown channel order"))?;

        let split = parts[4]
            .find(|c: char| c == '+' || c == '-')
            .ok_or_else(|| bad(tag, "missing row shift sign"))?;
        let row_parity = RowParity::from_name(&parts[4][..split]).ok_or_else(|| bad(tag, "unknown row parity"))?;
        let odd_row_base_shift: i32 = int(tag, &parts[4][split..], "bad row shift")?;

        let step: i32 = int(
            tag,
            parts[5].strip_prefix('k').ok_or_else(|| bad(tag, "missing k"))?,
            "bad drift step",
        )?;
        let period: u32 = int(
            tag,
            parts[6].strip_prefix('L').ok_or_else(|| bad(tag, "missing L"))?,
            "bad drift period",
        )?;
        let drift = DriftSpec::new(step, period).map_err(|e| DecodeError::ParamTag(e.to_string()))?;

        let first = parts[7].strip_prefix("cols").ok_or_else(|| bad(tag, "missing cols"))?;
        let mut column_offsets = vec![int(tag, first, "bad column offset")?];
        for p in &parts[8..] {
            column_offsets.push(int(tag, p, "bad column offset")?);
        }

        Ok(ParameterSet {
            tile_order,
            xor_mode,
            xor_keys,
            byte_swap,
            channel_order,
            row_parity,
            odd_row_base_shift,
            drift,
            column_offsets,
        })
    }
}
