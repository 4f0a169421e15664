//! CLI module graph.

pub mod check;
pub mod command;
pub mod live;
pub mod output;
pub mod snapshot;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, Commands};

/// Read and decode a JSON payload saved from an upstream API.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Dispatch a parsed command line.
pub fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Check => {
            check::execute(&cli.config, config, cli.json);
            Ok(())
        }
        Commands::Live(args) => live::execute(args, cli.json),
        Commands::Snapshot(args) => snapshot::execute(args, cli.json),
    }
}
