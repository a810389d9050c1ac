// crates/uiqvga-cli/src/cmd/inspect.rs

use clap::Args;
use uiqvga_core::params::checksum;
use uiqvga_core::params::format as params_format;

use crate::io::params_file;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Parameter file (.uqp)
    #[arg(long)]
    pub params: String,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = params_file::load_uqp_bytes(&args.params)?;
    println!("file={}", args.params);
    println!("size_bytes={}", bytes.len());

    match params_format::decode(&bytes) {
        Ok(p) => {
            let stored = checksum::sealed_id(&bytes)?;
            println!("checksums=ok");
            println!("tag={p}");
            println!("param_id={}", checksum::hex_id(&stored));
            println!("column_bands={}", p.column_offsets.len());
            Ok(())
        }
        Err(e) => {
            println!("checksums=FAILED");
            anyhow::bail!("{}: {e}", args.params)
        }
    }
}
