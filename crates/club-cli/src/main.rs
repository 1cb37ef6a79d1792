use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use club_cli::commands::{check, run};
use club_cli::{Cli, Commands, Config};

/// Load and validate config.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // stdout carries the report, so logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Run { input, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let outcome = run::run(input, &config).await?;

            // Printed only once the whole log was replayed.
            let format = config.line_format();
            let mut stdout = io::stdout().lock();
            if *json {
                run::write_json(&mut stdout, &outcome, &format)?;
            } else {
                run::write_text(&mut stdout, &outcome, &format)?;
            }
            stdout.flush()?;
        }
        Some(Commands::Check { input }) => {
            let config = load_config(cli.config.as_deref())?;
            check::run(&mut io::stdout(), input, &config).await?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
