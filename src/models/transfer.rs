//! Inter-envelope transfer records
//!
//! A transfer is the immutable audit record of money moved between two
//! envelopes, created by an executed rebalance or a manual move. Records are
//! append-only and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EnvelopeId, TransferId};
use super::money::Money;

/// Money moved from one envelope to another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub from_id: EnvelopeId,
    pub to_id: EnvelopeId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transfer {
    pub fn new(
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: Money,
        note: Option<String>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            from_id,
            to_id,
            amount,
            occurred_at: Utc::now(),
            note,
        }
    }

    pub fn validate(&self) -> Result<(), TransferValidationError> {
        if self.from_id == self.to_id {
            return Err(TransferValidationError::SameEnvelope);
        }
        if !self.amount.is_positive() {
            return Err(TransferValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from_id, self.to_id, self.amount)
    }
}

/// Validation errors for transfers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    SameEnvelope,
    NonPositiveAmount,
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameEnvelope => write!(f, "Cannot transfer within the same envelope"),
            Self::NonPositiveAmount => write!(f, "Transfer amount must be positive"),
        }
    }
}

impl std::error::Error for TransferValidationError {}
