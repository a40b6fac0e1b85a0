//! Balance command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: BalanceArgs) -> Result<()> {
    let client = args.account.client()?;

    let snapshot = client
        .get_balance()
        .await
        .context("Failed to fetch balance")?;

    output::snapshot(&snapshot, args.json)
}
