//! Payoff projection records
//!
//! A projection is a snapshot of the assumptions (balance, APR, payment) a
//! payoff schedule was computed from, plus its headline results. When the
//! assumptions change a new record supersedes the old one; prior records are
//! flipped inactive, never mutated or deleted, so projection history stays
//! auditable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DebtId, ProjectionId};
use super::money::Money;

/// Snapshot of one payoff projection for a debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffProjection {
    pub id: ProjectionId,
    pub debt_id: DebtId,
    pub starting_balance: Money,
    pub current_balance: Money,
    /// APR as a fraction
    pub apr: f64,
    pub minimum_payment: Money,
    #[serde(default)]
    pub extra_payment: Money,
    pub months_to_payoff: u32,
    pub total_interest: Money,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl PayoffProjection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        debt_id: DebtId,
        starting_balance: Money,
        current_balance: Money,
        apr: f64,
        minimum_payment: Money,
        extra_payment: Money,
        months_to_payoff: u32,
        total_interest: Money,
    ) -> Self {
        Self {
            id: ProjectionId::new(),
            debt_id,
            starting_balance,
            current_balance,
            apr,
            minimum_payment,
            extra_payment,
            months_to_payoff,
            total_interest,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Total monthly payment the projection assumed
    pub fn monthly_payment(&self) -> Money {
        self.minimum_payment + self.extra_payment
    }

    /// Flip this record inactive (it has been superseded)
    pub fn supersede(&mut self) {
        self.is_active = false;
    }
}
