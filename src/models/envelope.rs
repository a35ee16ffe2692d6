//! Envelope model
//!
//! An envelope is a named, target-funded pool of money. Scheduled envelopes
//! carry a frequency and optionally a due date; goal, spending and
//! tracking-only envelopes are exempt from the zero-based balance
//! requirement. Each envelope records how much of its per-cycle contribution
//! comes from each income source.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::frequency::Frequency;
use super::ids::{EnvelopeId, IncomeSourceId};
use super::money::Money;

/// Spending priority tier, used to group envelopes on payday
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Essential,
    #[default]
    Important,
    Discretionary,
}

impl Priority {
    pub const fn all() -> [Priority; 3] {
        [Self::Essential, Self::Important, Self::Discretionary]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Essential => "essential",
            Self::Important => "important",
            Self::Discretionary => "discretionary",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Priority {
    type Err = EnvelopeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "important" => Ok(Self::Important),
            "discretionary" => Ok(Self::Discretionary),
            other => Err(EnvelopeValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// A named, target-funded pool of money within the budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub id: EnvelopeId,
    pub name: String,
    /// Amount the envelope should hold per funding cycle
    pub target_amount: Money,
    /// Live balance
    #[serde(default)]
    pub current_amount: Money,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_goal: bool,
    #[serde(default)]
    pub is_spending: bool,
    #[serde(default)]
    pub is_tracking_only: bool,
    /// How much of this envelope's per-cycle contribution each income
    /// source funds
    #[serde(default)]
    pub income_allocations: HashMap<IncomeSourceId, Money>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Envelope {
    /// Create a new envelope with a target and frequency
    pub fn new(name: impl Into<String>, target_amount: Money, frequency: Frequency) -> Self {
        let now = Utc::now();
        Self {
            id: EnvelopeId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            frequency,
            due_date: None,
            priority: Priority::default(),
            is_goal: false,
            is_spending: false,
            is_tracking_only: false,
            income_allocations: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Exempt envelopes are not held to the zero-based balance requirement
    pub fn is_exempt(&self) -> bool {
        self.is_goal || self.is_spending || self.is_tracking_only
    }

    /// Envelope is over-spent (negative live balance)
    pub fn is_overspent(&self) -> bool {
        self.current_amount.is_negative()
    }

    /// Envelope holds surplus that a rebalance may draw from
    pub fn has_surplus(&self) -> bool {
        self.current_amount.is_positive() && self.target_amount.is_positive()
    }

    /// Sum of all income-source allocations for this envelope
    pub fn allocation_total(&self) -> Money {
        self.income_allocations.values().copied().sum()
    }

    /// Set the allocation cell for one income source
    ///
    /// A zero amount removes the cell entirely.
    pub fn set_allocation(&mut self, source_id: IncomeSourceId, amount: Money) {
        if amount.is_zero() {
            self.income_allocations.remove(&source_id);
        } else {
            self.income_allocations.insert(source_id, amount);
        }
        self.updated_at = Utc::now();
    }

    /// Drop all allocation cells
    pub fn clear_allocations(&mut self) {
        self.income_allocations.clear();
        self.updated_at = Utc::now();
    }

    pub fn set_balance(&mut self, amount: Money) {
        self.current_amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
        self.updated_at = Utc::now();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), EnvelopeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptyName);
        }
        if self.target_amount.is_negative() {
            return Err(EnvelopeValidationError::NegativeTarget);
        }
        if self.income_allocations.values().any(|a| a.is_negative()) {
            return Err(EnvelopeValidationError::NegativeAllocation);
        }
        Ok(())
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.target_amount, self.frequency)
    }
}

/// Validation errors for envelopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeValidationError {
    EmptyName,
    NegativeTarget,
    NegativeAllocation,
    InvalidPriority(String),
}

impl fmt::Display for EnvelopeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Envelope name cannot be empty"),
            Self::NegativeTarget => write!(f, "Envelope target cannot be negative"),
            Self::NegativeAllocation => write!(f, "Income allocations cannot be negative"),
            Self::InvalidPriority(s) => write!(f, "Invalid priority: {}", s),
        }
    }
}

impl std::error::Error for EnvelopeValidationError {}
