//! Debt snowball payment application
//!
//! Applies one payment across the active debts smallest-balance-first,
//! rolling the freed-up remainder from each paid-off debt into the next.
//! Ordering is the contract here: ascending current balance, ties broken by
//! id, stable across runs. Paid-off debts sort to the end and are never
//! touched again.

use chrono::{DateTime, Utc};

use crate::error::{PayplanError, PayplanResult};
use crate::models::{DebtId, DebtItem, Money};

/// Out-of-band events produced by payment application
///
/// Returned to the caller for notification concerns; the engine itself
/// never triggers side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtEvent {
    DebtPaidOff { debt_id: DebtId, name: String },
    AllDebtsCleared,
}

/// Result of applying a snowball payment
#[derive(Debug, Clone)]
pub struct SnowballOutcome {
    /// All debts, re-sorted in snowball order with paid-off debts last
    pub debts: Vec<DebtItem>,
    /// Debts that reached zero during this application
    pub newly_paid: Vec<DebtId>,
    /// Portion of the payment that reduced balances
    pub payment_applied: Money,
    /// Residual when the payment exceeded total outstanding debt
    pub remaining_payment: Money,
    pub events: Vec<DebtEvent>,
}

/// Sort debts into snowball order: active ascending by balance (ties by
/// id), paid-off debts at the end
pub fn snowball_order(debts: &mut [DebtItem]) {
    debts.sort_by(|a, b| {
        match (a.is_active(), b.is_active()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a
                .current_balance
                .cmp(&b.current_balance)
                .then(a.id.cmp(&b.id)),
        }
    });
}

/// Apply a payment across the debt set smallest-balance-first
///
/// Fails with `InvalidPaymentAmount` when the payment is not positive.
/// Inputs are never mutated; the outcome carries the updated snapshot.
pub fn apply_snowball_payment(
    debts: &[DebtItem],
    payment: Money,
    now: DateTime<Utc>,
) -> PayplanResult<SnowballOutcome> {
    if !payment.is_positive() {
        return Err(PayplanError::InvalidPaymentAmount(payment));
    }

    let mut updated: Vec<DebtItem> = debts.to_vec();
    snowball_order(&mut updated);

    let mut remaining = payment;
    let mut applied_total = Money::zero();
    let mut newly_paid = Vec::new();
    let mut events = Vec::new();

    for debt in updated.iter_mut().filter(|d| d.is_active()) {
        if !remaining.is_positive() {
            break;
        }
        let applied = remaining.min(debt.current_balance);
        debt.current_balance -= applied;
        debt.updated_at = now;
        remaining -= applied;
        applied_total += applied;

        if debt.current_balance.is_zero() {
            debt.mark_paid(now)
                .map_err(|e| PayplanError::Validation(e.to_string()))?;
            newly_paid.push(debt.id);
            events.push(DebtEvent::DebtPaidOff {
                debt_id: debt.id,
                name: debt.name.clone(),
            });
        }
    }

    if !updated.iter().any(|d| d.is_active()) && !newly_paid.is_empty() {
        events.push(DebtEvent::AllDebtsCleared);
    }

    snowball_order(&mut updated);

    Ok(SnowballOutcome {
        debts: updated,
        newly_paid,
        payment_applied: applied_total,
        remaining_payment: remaining,
        events,
    })
}
