//! Debt item model
//!
//! A debt belongs to one envelope and moves through a two-state lifecycle:
//! active (balance > 0, `paid_off_at` unset) to paid (balance == 0,
//! `paid_off_at` set exactly once). A paid debt is terminal; a later balance
//! increase is modeled as a new debt item, never by reopening an old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{DebtId, EnvelopeId};
use super::money::Money;

/// A single debt tracked for snowball payoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtItem {
    pub id: DebtId,
    pub envelope_id: EnvelopeId,
    pub name: String,
    pub starting_balance: Money,
    /// Non-increasing outside of new-charge events (which create new debts)
    pub current_balance: Money,
    /// APR as a fraction (0.24 = 24%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_payment: Option<Money>,
    /// Set exactly once, when the balance reaches zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_off_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DebtItem {
    /// Declare a new debt with its opening balance
    pub fn new(envelope_id: EnvelopeId, name: impl Into<String>, balance: Money) -> Self {
        let now = Utc::now();
        Self {
            id: DebtId::new(),
            envelope_id,
            name: name.into(),
            starting_balance: balance,
            current_balance: balance,
            interest_rate: None,
            minimum_payment: None,
            paid_off_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Debt still carries a balance and accepts payments
    pub fn is_active(&self) -> bool {
        self.paid_off_at.is_none() && self.current_balance.is_positive()
    }

    /// Mark the debt paid off
    ///
    /// The timestamp is set exactly once; marking an already-paid debt is an
    /// error so the lifecycle stays one-way.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) -> Result<(), DebtValidationError> {
        if self.paid_off_at.is_some() {
            return Err(DebtValidationError::AlreadyPaidOff);
        }
        self.paid_off_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.name.trim().is_empty() {
            return Err(DebtValidationError::EmptyName);
        }
        if self.starting_balance.is_negative() || self.current_balance.is_negative() {
            return Err(DebtValidationError::NegativeBalance);
        }
        if self.current_balance > self.starting_balance {
            return Err(DebtValidationError::BalanceAboveStarting);
        }
        if let Some(rate) = self.interest_rate {
            if !(0.0..=10.0).contains(&rate) {
                return Err(DebtValidationError::InvalidInterestRate(rate));
            }
        }
        if let Some(minimum) = self.minimum_payment {
            if minimum.is_negative() {
                return Err(DebtValidationError::NegativeMinimumPayment);
            }
        }
        Ok(())
    }
}

impl fmt::Display for DebtItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.current_balance)
    }
}

/// Validation errors for debts
#[derive(Debug, Clone, PartialEq)]
pub enum DebtValidationError {
    EmptyName,
    NegativeBalance,
    BalanceAboveStarting,
    InvalidInterestRate(f64),
    NegativeMinimumPayment,
    AlreadyPaidOff,
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Debt name cannot be empty"),
            Self::NegativeBalance => write!(f, "Debt balance cannot be negative"),
            Self::BalanceAboveStarting => {
                write!(f, "Current balance cannot exceed starting balance")
            }
            Self::InvalidInterestRate(rate) => {
                write!(f, "Interest rate must be a fraction between 0 and 10: {}", rate)
            }
            Self::NegativeMinimumPayment => write!(f, "Minimum payment cannot be negative"),
            Self::AlreadyPaidOff => write!(f, "Debt is already paid off"),
        }
    }
}

impl std::error::Error for DebtValidationError {}
