//! Balance model and response decoding.

mod parser;
mod snapshot;

pub use parser::parse_balance;
pub use snapshot::{BalanceSnapshot, BenefitCategory};
