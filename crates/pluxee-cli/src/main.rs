//! pluxee - CLI for Pluxee benefit card balances.
//!
//! A thin wrapper over the `pluxee` library: one-shot credential checks,
//! one-shot balance reads, and a recurring poller.

mod cli;
mod commands;
mod output;
mod readings;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Validate(args) => commands::validate::run(args).await,
        Commands::Balance(args) => commands::balance::run(args).await,
        Commands::Watch(args) => commands::watch::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
