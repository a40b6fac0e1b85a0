//! Point-in-time balance reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A benefit card tracked by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitCategory {
    Lunch,
    Eco,
    Gift,
    Conso,
}

impl BenefitCategory {
    pub const ALL: [BenefitCategory; 4] = [
        BenefitCategory::Lunch,
        BenefitCategory::Eco,
        BenefitCategory::Gift,
        BenefitCategory::Conso,
    ];

    /// Field name in the provider payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitCategory::Lunch => "lunch",
            BenefitCategory::Eco => "eco",
            BenefitCategory::Gift => "gift",
            BenefitCategory::Conso => "conso",
        }
    }

    /// Human-readable card name.
    pub fn label(&self) -> &'static str {
        match self {
            BenefitCategory::Lunch => "Lunch Pass",
            BenefitCategory::Eco => "Eco Pass",
            BenefitCategory::Gift => "Gift Pass",
            BenefitCategory::Conso => "Conso Pass",
        }
    }
}

impl std::fmt::Display for BenefitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Balances of all benefit cards at one point in time.
///
/// Every fetch produces a new snapshot; a snapshot is never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    lunch_pass: f64,
    eco_pass: f64,
    gift_pass: f64,
    conso_pass: f64,
    fetched_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    pub fn new(
        lunch_pass: f64,
        eco_pass: f64,
        gift_pass: f64,
        conso_pass: f64,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lunch_pass,
            eco_pass,
            gift_pass,
            conso_pass,
            fetched_at,
        }
    }

    pub fn lunch_pass(&self) -> f64 {
        self.lunch_pass
    }

    pub fn eco_pass(&self) -> f64 {
        self.eco_pass
    }

    pub fn gift_pass(&self) -> f64 {
        self.gift_pass
    }

    pub fn conso_pass(&self) -> f64 {
        self.conso_pass
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn amount(&self, category: BenefitCategory) -> f64 {
        match category {
            BenefitCategory::Lunch => self.lunch_pass,
            BenefitCategory::Eco => self.eco_pass,
            BenefitCategory::Gift => self.gift_pass,
            BenefitCategory::Conso => self.conso_pass,
        }
    }

    /// True if both snapshots hold the same amounts, whatever their fetch time.
    pub fn same_amounts(&self, other: &BalanceSnapshot) -> bool {
        BenefitCategory::ALL
            .iter()
            .all(|&c| self.amount(c) == other.amount(c))
    }
}
