// crates/uiqvga-cli/src/cmd/scramble.rs

use clap::Args;
use tracing::info;
use uiqvga_core::canvas::words_to_le_bytes;
use uiqvga_core::color::canvas_from_image;
use uiqvga_core::decode::pipeline::scramble;

use crate::cmd::{GeometryArgs, ParamSourceArgs};
use crate::io::{png, raw};

#[derive(Args, Debug)]
pub struct ScrambleArgs {
    /// Source PNG; must be exactly tile*grid pixels square
    #[arg(long = "in")]
    pub input: String,

    /// Raw dump to write
    #[arg(long)]
    pub out: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub source: ParamSourceArgs,
}

pub fn run(args: ScrambleArgs) -> anyhow::Result<()> {
    let geometry = args.geometry.geometry()?;
    let params = args.source.resolve()?;

    let img = png::load_png(&args.input)?;
    let canvas = canvas_from_image(&img, geometry, params.byte_swap, params.channel_order)?;
    let words = scramble(&canvas, &params)?;
    let bytes = words_to_le_bytes(&words);
    raw::write_dump(&args.out, &bytes)?;

    info!(bytes = bytes.len(), tag = %params, "scrambled");
    println!("wrote {} ({} bytes)", args.out, bytes.len());
    Ok(())
}
