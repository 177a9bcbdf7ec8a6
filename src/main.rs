use anyhow::Result;
use clap::Parser;

mod cli;
mod config;

fn main() -> Result<()> {
    cli::Cli::parse().init_tracing_subscriber()?.run()
}
