// crates/uiqvga-cli/src/cmd/search.rs

use std::path::Path;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;
use uiqvga_core::params::defaults;
use uiqvga_core::{
    ChannelOrder, RowParity, SearchConfig, SearchSpace, Searcher, TileOrder, XorKeys, XorMode,
};

use crate::cmd::{parse_hex_u16, parse_i32_list, parse_name_list, GeometryArgs, WeightArgs};
use crate::io::manifest::{write_ranking, RankedEntry, Ranking, Weights};
use crate::io::{params_file, png, raw};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Preset {
    /// Phase, drift and band sweep around the known base decoding
    Default,
    /// Tile order, XOR mode, byte and channel order discovery
    Format,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Raw dump (little-endian RGB565 words)
    #[arg(long = "in")]
    pub input: String,

    /// Output directory for ranked PNGs, .uqp files and ranking.json
    #[arg(long)]
    pub out: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Starting ranges; the flags below override single axes
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Tile orders, e.g. "row,col,serp,serpcol"
    #[arg(long)]
    pub orders: Option<String>,

    /// XOR modes, e.g. "const,rowalt,colalt,checker"
    #[arg(long)]
    pub xor_modes: Option<String>,

    /// Primary XOR key (hex)
    #[arg(long)]
    pub key: Option<String>,

    /// Secondary XOR key (hex); defaults to the primary when only --key is given
    #[arg(long)]
    pub key2: Option<String>,

    /// Byte swap values, e.g. "0,1"
    #[arg(long)]
    pub swaps: Option<String>,

    /// Channel orders, e.g. "rgb,bgr"
    #[arg(long)]
    pub channels: Option<String>,

    /// Row parities to correct, e.g. "odd,even"
    #[arg(long)]
    pub parities: Option<String>,

    /// Odd-row base shifts; comma list, `a:b` is inclusive
    #[arg(long, allow_hyphen_values = true)]
    pub shifts: Option<String>,

    /// Drift steps (k)
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Option<String>,

    /// Drift periods (L); 0 disables drift
    #[arg(long)]
    pub periods: Option<String>,

    /// Values tried for every column band
    #[arg(long, allow_hyphen_values = true)]
    pub offsets: Option<String>,

    /// Candidates kept
    #[arg(long, default_value_t = defaults::TOP_N)]
    pub top: usize,

    #[command(flatten)]
    pub weights: WeightArgs,

    /// Worker threads (default: rayon global pool)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Refuse spaces with more raw combinations than this
    #[arg(long, default_value_t = defaults::MAX_CANDIDATES)]
    pub max_candidates: u64,
}

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be > 0");
    }
    if args.threads == Some(0) {
        anyhow::bail!("--threads must be > 0");
    }

    let geometry = args.geometry.geometry()?;
    let space = build_space(&args)?;
    let config = SearchConfig {
        top_n: args.top,
        weights: args.weights.weights(),
        max_candidates: args.max_candidates,
        threads: args.threads,
    };

    let bytes = raw::read_dump(&args.input)?;
    let searcher = Searcher::from_le_bytes(&bytes, geometry).with_context(|| format!("load dump {}", args.input))?;
    let report = searcher.run(&space, &config)?;

    std::fs::create_dir_all(&args.out).with_context(|| format!("create {}", args.out))?;
    let out_dir = Path::new(&args.out);

    let mut entries = Vec::with_capacity(report.ranked.len());
    for (i, cand) in report.ranked.iter().enumerate() {
        let rank = i + 1;
        let tag = cand.params.to_string();
        let stem = format!("{rank:02}_{:.4}_{tag}", cand.score);
        let png_path = out_dir.join(format!("{stem}.png")).to_string_lossy().into_owned();
        let uqp_path = out_dir.join(format!("{stem}.uqp")).to_string_lossy().into_owned();

        png::save_png(&png_path, &cand.image)?;
        params_file::save_uqp(&uqp_path, &cand.params)?;

        println!("{rank:02}  {:.4}  {tag}", cand.score);

        entries.push(RankedEntry {
            rank,
            ordinal: cand.ordinal,
            score: cand.score,
            seam_cost: cand.metrics.seam_cost,
            comb_cost: cand.metrics.comb_cost,
            edge_cost: cand.metrics.edge_cost,
            tag,
            param_id: cand.params.id_hex(),
            png: png_path,
            params_file: uqp_path,
        });
    }

    let ranking = Ranking {
        input: args.input.clone(),
        tile_size: geometry.tile_size,
        grid: geometry.grid,
        raw_combinations: u64::try_from(report.raw_combinations).unwrap_or(u64::MAX),
        evaluated: report.evaluated,
        elapsed_ms: u64::try_from(report.elapsed_ms).unwrap_or(u64::MAX),
        weights: Weights {
            seam: config.weights.seam,
            comb: config.weights.comb,
            edge: config.weights.edge,
        },
        candidates: entries,
    };
    let manifest = out_dir.join("ranking.json").to_string_lossy().into_owned();
    write_ranking(&manifest, &ranking)?;
    info!(path = %manifest, kept = ranking.candidates.len(), "wrote ranking");

    Ok(())
}

fn build_space(args: &SearchArgs) -> anyhow::Result<SearchSpace> {
    let mut space = match args.preset {
        Preset::Default => defaults::default_search_space(),
        Preset::Format => defaults::format_search_space(),
    };

    if let Some(s) = &args.orders {
        space.tile_orders = parse_name_list("--orders", s, TileOrder::from_name)?;
    }
    if let Some(s) = &args.xor_modes {
        space.xor_modes = parse_name_list("--xor-modes", s, XorMode::from_name)?;
    }
    match (&args.key, &args.key2) {
        (Some(k), Some(k2)) => space.xor_keys = vec![XorKeys::new(parse_hex_u16("--key", k)?, parse_hex_u16("--key2", k2)?)],
        (Some(k), None) => space.xor_keys = vec![XorKeys::single(parse_hex_u16("--key", k)?)],
        (None, Some(_)) => anyhow::bail!("--key2 requires --key"),
        (None, None) => {}
    }
    if let Some(s) = &args.swaps {
        space.byte_swaps = parse_name_list("--swaps", s, |t| match t {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        })?;
    }
    if let Some(s) = &args.channels {
        space.channel_orders = parse_name_list("--channels", s, ChannelOrder::from_name)?;
    }
    if let Some(s) = &args.parities {
        space.row_parities = parse_name_list("--parities", s, RowParity::from_name)?;
    }
    if let Some(s) = &args.shifts {
        space.base_shifts = parse_i32_list("--shifts", s)?;
    }
    if let Some(s) = &args.steps {
        space.drift_steps = parse_i32_list("--steps", s)?;
    }
    if let Some(s) = &args.periods {
        space.drift_periods = parse_i32_list("--periods", s)?
            .into_iter()
            .map(|v| u32::try_from(v).map_err(|_| anyhow::anyhow!("--periods entries must be >= 0 (got {v})")))
            .collect::<anyhow::Result<Vec<u32>>>()?;
    }
    if let Some(s) = &args.offsets {
        space.column_offsets = parse_i32_list("--offsets", s)?;
    }
    Ok(space)
}
