//! Watch command implementation.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use crate::cli::AccountArgs;
use crate::output;
use crate::readings::Readings;

/// Polling cadence of the host integration.
const DEFAULT_INTERVAL_SECS: u64 = 3600;

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Seconds between polls
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,

    /// Print each poll as a JSON line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WatchArgs) -> Result<()> {
    let client = args.account.client()?;
    let mut readings = Readings::new(client.username());
    let interval = Duration::from_secs(args.interval_secs.max(1));

    info!(interval_secs = interval.as_secs(), "Starting poller");

    loop {
        let outcome = client.get_balance().await;
        if let Err(e) = &outcome {
            warn!(error = %e, kind = ?e.kind(), "Poll failed");
        }
        readings.apply(&outcome);
        output::readings(&readings, args.json)?;

        if args.once {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping poller");
                return Ok(());
            }
            () = tokio::time::sleep(interval) => {}
        }
    }
}
