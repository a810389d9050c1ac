// crates/uiqvga-cli/src/main.rs

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "uiqvga")]
#[command(about = "Raw UI-QVGA dump decoder and parameter search", long_about = None)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep a parameter space over a raw dump and write the top-N decodings
    Search(cmd::search::SearchArgs),

    /// Decode a raw dump with one explicit parameter set
    Render(cmd::render::RenderArgs),

    /// Build a raw dump from a PNG (inverse pipeline)
    Scramble(cmd::scramble::ScrambleArgs),

    /// Inspect a .uqp parameter file (tag, id, checksums)
    Inspect(cmd::inspect::InspectArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Search(args) => cmd::search::run(args),
        Commands::Render(args) => cmd::render::run(args),
        Commands::Scramble(args) => cmd::scramble::run(args),
        Commands::Inspect(args) => cmd::inspect::run(args),
    }
}
