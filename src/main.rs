use anyhow::Result;
use clap::Parser;
use debora::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
