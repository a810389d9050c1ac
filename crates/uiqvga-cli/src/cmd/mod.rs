// crates/uiqvga-cli/src/cmd/mod.rs

use clap::Args;
use uiqvga_core::params::defaults;
use uiqvga_core::{Geometry, ParameterSet, ScoreWeights};

use crate::io::params_file;

pub mod inspect;
pub mod render;
pub mod scramble;
pub mod search;

/// Canvas layout shared by every command that touches a dump.
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Tile edge in pixels
    #[arg(long, default_value_t = defaults::TILE_SIZE)]
    pub tile: usize,

    /// Tiles per side
    #[arg(long, default_value_t = defaults::GRID)]
    pub grid: usize,
}

impl GeometryArgs {
    pub fn geometry(&self) -> anyhow::Result<Geometry> {
        Ok(Geometry::new(self.tile, self.grid)?)
    }
}

/// Score weights; `search` and `render` must agree on them.
#[derive(Args, Debug, Clone)]
pub struct WeightArgs {
    #[arg(long, default_value_t = defaults::default_weights().seam)]
    pub w_seam: f64,

    #[arg(long, default_value_t = defaults::default_weights().comb)]
    pub w_comb: f64,

    #[arg(long, default_value_t = defaults::default_weights().edge)]
    pub w_edge: f64,
}

impl WeightArgs {
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            seam: self.w_seam,
            comb: self.w_comb,
            edge: self.w_edge,
        }
    }
}

/// Exactly one way of naming a ParameterSet.
#[derive(Args, Debug, Clone)]
pub struct ParamSourceArgs {
    /// Parameter tag as printed by `search`, e.g. col_const-aaaa-5555_swap0_bgr_odd+0_k0_L0_cols0_0_0
    #[arg(long, allow_hyphen_values = true, conflicts_with = "params", required_unless_present = "params")]
    pub tag: Option<String>,

    /// Parameter file (.uqp)
    #[arg(long)]
    pub params: Option<String>,
}

impl ParamSourceArgs {
    pub fn resolve(&self) -> anyhow::Result<ParameterSet> {
        match (&self.tag, &self.params) {
            (Some(tag), None) => Ok(tag.parse::<ParameterSet>()?),
            (None, Some(path)) => params_file::load_uqp(path),
            _ => anyhow::bail!("pass exactly one of --tag or --params"),
        }
    }
}

/// Comma list of integers; `a:b` expands to the inclusive range.
pub fn parse_i32_list(flag: &str, s: &str) -> anyhow::Result<Vec<i32>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let t = part.trim();
        if t.is_empty() {
            continue;
        }
        // Skip a leading sign so "-4:4" splits on the colon, not the minus.
        match t.char_indices().skip(1).find(|&(_, c)| c == ':').map(|(i, _)| i) {
            Some(i) => {
                let lo: i32 = t[..i].trim().parse().map_err(|_| anyhow::anyhow!("invalid {flag} range: {t}"))?;
                let hi: i32 = t[i + 1..].trim().parse().map_err(|_| anyhow::anyhow!("invalid {flag} range: {t}"))?;
                if lo > hi {
                    anyhow::bail!("{flag} range {t} is empty");
                }
                out.extend(lo..=hi);
            }
            None => out.push(t.parse().map_err(|_| anyhow::anyhow!("invalid {flag} entry: {t}"))?),
        }
    }
    if out.is_empty() {
        anyhow::bail!("{flag} list is empty");
    }
    Ok(out)
}

/// Comma list of names resolved through `lookup`.
pub fn parse_name_list<T>(flag: &str, s: &str, lookup: impl Fn(&str) -> Option<T>) -> anyhow::Result<Vec<T>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let t = part.trim();
        if t.is_empty() {
            continue;
        }
        out.push(lookup(t).ok_or_else(|| anyhow::anyhow!("unknown {flag} entry: {t}"))?);
    }
    if out.is_empty() {
        anyhow::bail!("{flag} list is empty");
    }
    Ok(out)
}

pub fn parse_hex_u16(flag: &str, s: &str) -> anyhow::Result<u16> {
    let t = s.trim();
    let t = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
    u16::from_str_radix(t, 16).map_err(|_| anyhow::anyhow!("invalid {flag} key: {s}"))
}
