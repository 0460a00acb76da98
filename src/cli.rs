use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Crest: peak water level envelopes across hydraulic model result files.
#[derive(Parser)]
#[command(
    name = "crest",
    version,
    about = "Peak water level envelopes across hydraulic model result files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract peak levels from result files and write the envelope.
    Extract(ExtractArgs),
    /// Write the list of result files found in a directory.
    List(ListArgs),
}

/// Arguments for the `extract` subcommand.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File list: one result file per line, optionally followed by its
    /// critical-duration label.
    #[arg(short, long, conflicts_with = "input_directory")]
    pub files: Option<PathBuf>,

    /// Directory to scan for result files.
    #[arg(short, long)]
    pub input_directory: Option<PathBuf>,

    /// Also scan subdirectories of the input directory.
    #[arg(short, long)]
    pub subdir: bool,

    /// Output name without extension, optionally prefixed by a directory
    /// (e.g. `out/envelope`).
    #[arg(short, long)]
    pub output_name: Option<PathBuf>,

    /// CRS of the model coordinates (e.g. `28356` or `EPSG:28356`); enables
    /// GeoJSON output.
    #[arg(short, long)]
    pub projection: Option<String>,

    /// Do not round decimal outputs to three places.
    #[arg(short = 'r', long)]
    pub no_round_outputs: bool,

    /// Also write the timestep of each peak to `<name>_timing.csv`.
    #[arg(short = 't', long)]
    pub include_timings: bool,

    /// Free-text description recorded in the run log.
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to scan for result files.
    #[arg(short, long)]
    pub input_directory: PathBuf,

    /// Also scan subdirectories.
    #[arg(short, long)]
    pub subdir: bool,

    /// Where to write the list.
    #[arg(short, long, default_value = "input_files.txt")]
    pub output: PathBuf,
}
