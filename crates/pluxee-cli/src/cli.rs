//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pluxee::{ClientConfig, Credentials, PluxeeClient, ProviderUrl};

use crate::commands::{balance::BalanceArgs, validate::ValidateArgs, watch::WatchArgs};

/// Pluxee benefit card balances from the command line.
#[derive(Parser, Debug)]
#[command(name = "pluxee")]
#[command(author, version = env!("PLUXEE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the username and password are accepted
    Validate(ValidateArgs),

    /// Print the current balance of every card
    Balance(BalanceArgs),

    /// Poll balances periodically
    Watch(WatchArgs),
}

/// Account and provider settings shared by every command.
#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Portal username
    #[arg(long, env = "PLUXEE_USERNAME")]
    pub username: String,

    /// Portal password
    #[arg(long, env = "PLUXEE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Provider base URL
    #[arg(long, env = "PLUXEE_BASE_URL", default_value = pluxee::config::DEFAULT_PROVIDER_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PLUXEE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl AccountArgs {
    pub fn client(&self) -> Result<PluxeeClient> {
        let provider = ProviderUrl::new(&self.base_url).context("Invalid provider URL")?;
        let config =
            ClientConfig::new(provider).with_timeout(Duration::from_secs(self.timeout_secs));

        Ok(PluxeeClient::with_config(
            Credentials::new(&self.username, &self.password),
            config,
        ))
    }
}
