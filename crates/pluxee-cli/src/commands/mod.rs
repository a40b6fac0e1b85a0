//! Subcommand implementations.

pub mod balance;
pub mod validate;
pub mod watch;
