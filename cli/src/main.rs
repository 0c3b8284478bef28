mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{matching, zonal};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Zonal(args) => zonal::run(&cli, args),
        Commands::Match(args) => matching::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
