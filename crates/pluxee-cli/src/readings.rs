//! Per-card readings kept by the poller.
//!
//! Each card keeps its last known amount. A failed poll marks every card
//! unavailable until the next successful one, but the last amount is kept.

use chrono::{DateTime, Utc};
use pluxee::{BalanceSnapshot, BenefitCategory, ClientError};
use serde::Serialize;

/// The latest reading for one card.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub id: String,
    pub category: BenefitCategory,
    pub name: &'static str,
    pub value: Option<f64>,
    pub available: bool,
    pub updated: Option<DateTime<Utc>>,
}

/// Readings for every card of one account.
#[derive(Debug, Clone, Serialize)]
pub struct Readings {
    readings: Vec<Reading>,
}

impl Readings {
    pub fn new(username: &str) -> Self {
        let readings = BenefitCategory::ALL
            .iter()
            .map(|&category| Reading {
                id: reading_id(username, category),
                category,
                name: category.label(),
                value: None,
                available: false,
                updated: None,
            })
            .collect();

        Self { readings }
    }

    /// Fold one poll outcome into the readings.
    pub fn apply(&mut self, outcome: &Result<BalanceSnapshot, ClientError>) {
        for reading in &mut self.readings {
            match outcome {
                Ok(snapshot) => {
                    reading.value = Some(snapshot.amount(reading.category));
                    reading.available = true;
                    reading.updated = Some(snapshot.fetched_at());
                }
                Err(_) => reading.available = false,
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }
}

/// Stable identifier of a card reading. The username is lowercased so the
/// same account always maps to the same id.
pub fn reading_id(username: &str, category: BenefitCategory) -> String {
    let suffix = match category {
        BenefitCategory::Lunch => "LUNCH",
        BenefitCategory::Eco => "ECOPASS",
        BenefitCategory::Gift => "GIFT",
        BenefitCategory::Conso => "CONSO",
    };
    format!("pluxee-{username}-{suffix}").to_lowercase()
}
