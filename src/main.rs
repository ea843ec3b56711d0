use anyhow::Result;
use clap::Parser;

use cuecheck::{cli, config, pipeline};

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cuecheck starting");

    match args.command {
        cli::Command::Check(cmd) => pipeline::run_check(&cmd, &cfg),
        cli::Command::Export(cmd) => pipeline::run_export(&cmd, &cfg),
        cli::Command::Locate(cmd) => pipeline::run_locate(&cmd, &cfg),
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}
