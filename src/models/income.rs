//! Income source model
//!
//! An income source is a recurring pay event (salary, side job) whose amount
//! is stored normalized to the user's pay cycle. The zero-based invariant
//! says every active source's amount is fully assigned across envelope
//! allocations at commit time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::IncomeSourceId;
use super::money::Money;

/// A recurring source of income, normalized to the pay cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: IncomeSourceId,
    pub name: String,
    /// Amount per pay cycle
    pub amount: Money,
    /// The frequency the amount was originally declared at
    #[serde(default)]
    pub declared_frequency: Frequency,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl IncomeSource {
    /// Create a new active income source
    ///
    /// `amount` must already be normalized to the user's pay cycle;
    /// `declared_frequency` records what the user originally entered.
    pub fn new(name: impl Into<String>, amount: Money, declared_frequency: Frequency) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeSourceId::new(),
            name: name.into(),
            amount,
            declared_frequency,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.name.trim().is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/cycle)", self.name, self.amount)
    }
}

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income source name cannot be empty"),
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}
