use clap::Parser;
use ghcn_loader::cli::{Cli, run};
use ghcn_loader::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
