use anyhow::Context;
use clap::Parser;
use pitwall::adapter::inbound::cli::command::{Cli, Commands};
use pitwall::adapter::inbound::cli::{dispatch, load_config, output};
use pitwall::infrastructure::config::settings::Config;
use tracing::{debug, error};

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!(error = %e, "command failed");
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match cli.command {
        // `check` validates the file itself, so a missing file is an error.
        Commands::Check => Config::load(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?,
        _ => load_config(&cli.config)?,
    };

    config.init_logging();
    debug!(command = ?cli.command, "pitwall starting");

    dispatch(cli, &config)?;
    Ok(())
}
