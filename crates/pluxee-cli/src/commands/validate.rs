//! Validate command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use pluxee::AuthError;

use crate::cli::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

/// One login attempt. Passes or fails as a whole, but the message tells a
/// rejected password apart from a provider that could not be reached.
pub async fn run(args: ValidateArgs) -> Result<()> {
    let client = args.account.client()?;

    eprintln!("{}", "Checking credentials...".dimmed());

    match client.validate_credentials().await {
        Ok(true) => {
            output::success(&format!("Credentials are valid for {}", client.username()));
            Ok(())
        }
        Ok(false) => {
            output::failure("Wrong username or password");
            bail!("authentication failed")
        }
        Err(AuthError::Unreachable(e)) => {
            output::failure(&format!("Could not reach the provider: {e}"));
            bail!("authentication failed")
        }
        Err(e) => {
            output::failure(&format!("Unexpected answer from the provider: {e}"));
            bail!("authentication failed")
        }
    }
}
