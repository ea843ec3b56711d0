use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::formats::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "cuecheck")]
#[command(about = "Check, locate and export cues in WebVTT transcripts.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a VTT file and report unreadable or invalid cues
    Check(CheckCmd),
    /// Save a VTT file as plain text, timestamped text, or VTT
    Export(ExportCmd),
    /// Show which cue is active at a playback position
    Locate(LocateCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct CheckCmd {
    /// Input VTT file
    pub input: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ExportCmd {
    /// Input VTT file
    pub input: PathBuf,

    /// Output file path (defaults to a name derived from the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target format (defaults to the configured save format)
    #[arg(long, value_enum)]
    pub to: Option<ExportFormat>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Parser)]
pub struct LocateCmd {
    /// Input VTT file
    pub input: PathBuf,

    /// Playback position: a timestamp like 1:05.250 or plain seconds
    #[arg(long)]
    pub at: String,
}
