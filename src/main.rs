use std::path::PathBuf;

use clap::Parser;

mod runtime;

/// Console front end for the cadence music services.
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(version)]
pub struct Args {
    /// Config file to load instead of the resolved default
    #[arg(short, long, env = "CADENCE_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. `cadence=debug`
    #[arg(short, long)]
    log: Option<String>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runtime::run(Args::parse()).await
}
