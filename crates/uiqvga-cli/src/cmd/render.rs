// crates/uiqvga-cli/src/cmd/render.rs

use anyhow::Context;
use clap::Args;
use uiqvga_core::Searcher;

use crate::cmd::{GeometryArgs, ParamSourceArgs, WeightArgs};
use crate::io::{params_file, png, raw};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Raw dump (little-endian RGB565 words)
    #[arg(long = "in")]
    pub input: String,

    /// Output PNG path
    #[arg(long)]
    pub out: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub source: ParamSourceArgs,

    #[command(flatten)]
    pub weights: WeightArgs,

    /// Also write the parameter set as .uqp
    #[arg(long)]
    pub out_params: Option<String>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let geometry = args.geometry.geometry()?;
    let params = args.source.resolve()?;

    let bytes = raw::read_dump(&args.input)?;
    let searcher = Searcher::from_le_bytes(&bytes, geometry).with_context(|| format!("load dump {}", args.input))?;
    let cand = searcher.evaluate(&params, &args.weights.weights())?;

    png::save_png(&args.out, &cand.image)?;
    if let Some(path) = &args.out_params {
        params_file::save_uqp(path, &cand.params)?;
    }

    println!("tag={}", cand.params);
    println!("param_id={}", cand.params.id_hex());
    println!(
        "seam={:.4} comb={:.4} edge={:.4} score={:.4}",
        cand.metrics.seam_cost, cand.metrics.comb_cost, cand.metrics.edge_cost, cand.score
    );
    println!("wrote {}", args.out);
    Ok(())
}
