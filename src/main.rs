use anyhow::Context;
use clap::Parser;
use emdat_processor::cli::{init_logging, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("Failed to set up logging")?;
    run(cli).context("emdat-processor failed")
}
