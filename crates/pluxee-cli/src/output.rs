//! Terminal rendering of balances and readings.
//!
//! Results go to stdout, either as one JSON document per call or as
//! `label: value` lines. Status messages go to stderr unless they report
//! success.

use anyhow::Result;
use colored::Colorize;
use pluxee::{BalanceSnapshot, BenefitCategory};

use crate::readings::Readings;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn failure(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print one snapshot: every card, then the fetch time.
pub fn snapshot(snapshot: &BalanceSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    for category in BenefitCategory::ALL {
        line(category.label(), &euros(snapshot.amount(category)));
    }
    line("Fetched", &snapshot.fetched_at().to_rfc3339());
    Ok(())
}

/// Print the poller's readings, one JSON line per poll in JSON mode.
pub fn readings(readings: &Readings, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(readings)?);
        return Ok(());
    }

    for reading in readings.iter() {
        let value = match (reading.value, reading.available) {
            (Some(value), true) => euros(value),
            (Some(value), false) => format!("{} {}", euros(value), "(unavailable)".yellow()),
            (None, _) => "unavailable".yellow().to_string(),
        };
        line(&reading.id, &value);
    }
    println!();
    Ok(())
}

fn line(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

fn euros(amount: f64) -> String {
    format!("{amount:.2} EUR")
}
