mod build_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod prepare_cmd;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::CanopyConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Build(args) => build_cmd::run(args),
        Command::Prepare(args) => prepare_cmd::run(args),
    }
}

/// Reads and parses the project TOML.
pub(crate) fn load_config(path: &Path) -> Result<CanopyConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
