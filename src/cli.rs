use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Canopy analysis-ready dataset builder.
#[derive(Parser)]
#[command(
    name = "canopy",
    version,
    about = "Analysis-ready vegetation and weather datasets for vegetation-index forecasting"
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
    /// Build the training dataset for every boundary with complete inputs.
    Build(BuildArgs),
    /// Prepare the inference batch of one boundary.
    Prepare(PrepareArgs),
}

/// Arguments for the `build` subcommand.
#[derive(clap::Args)]
pub struct BuildArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "canopy.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the train/validation seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `prepare` subcommand.
#[derive(clap::Args)]
pub struct PrepareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "canopy.toml")]
    pub config: PathBuf,

    /// Boundary to prepare.
    #[arg(short, long)]
    pub boundary: String,

    /// Weather statistics JSON written by `canopy build`.
    #[arg(long)]
    pub stats: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
