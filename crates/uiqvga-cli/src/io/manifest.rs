// crates/uiqvga-cli/src/io/manifest.rs

use anyhow::{Context, Result};
use serde::Serialize;

/// ranking.json written next to the ranked PNGs.
#[derive(Debug, Serialize)]
pub struct Ranking {
    pub input: String,
    pub tile_size: usize,
    pub grid: usize,
    pub raw_combinations: u64,
    pub evaluated: u64,
    pub elapsed_ms: u64,
    pub weights: Weights,
    pub candidates: Vec<RankedEntry>,
}

#[derive(Debug, Serialize)]
pub struct Weights {
    pub seam: f64,
    pub comb: f64,
    pub edge: f64,
}

#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub ordinal: u64,
    pub score: f64,
    pub seam_cost: f64,
    pub comb_cost: f64,
    pub edge_cost: f64,
    pub tag: String,
    pub param_id: String,
    pub png: String,
    pub params_file: String,
}

pub fn write_ranking(path: &str, ranking: &Ranking) -> Result<()> {
    let json = serde_json::to_string_pretty(ranking).context("serialize ranking")?;
    std::fs::write(path, json).with_context(|| format!("write ranking {path}"))?;
    Ok(())
}
