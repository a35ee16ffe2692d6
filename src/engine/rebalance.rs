//! Envelope rebalancing
//!
//! Plans a set of inter-envelope transfers that eliminates negative
//! balances by drawing from surplus envelopes: worst deficit first, largest
//! surplus first, both orderings tie-broken by id so plans are
//! deterministic. The full plan is produced before anything executes, so
//! callers can apply it as one atomic batch or abort entirely.

use crate::models::{Envelope, EnvelopeId, Money};

/// One planned movement of money between envelopes
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlannedTransfer {
    pub from_id: EnvelopeId,
    pub from_name: String,
    pub to_id: EnvelopeId,
    pub to_name: String,
    pub amount: Money,
}

/// A complete rebalance plan
#[derive(Debug, Clone)]
pub struct RebalancePlan {
    pub transfers: Vec<PlannedTransfer>,
    /// Surplus covers every deficit
    pub can_balance: bool,
    /// Total deficit magnitude
    pub total_overspent: Money,
    pub total_surplus: Money,
}

impl RebalancePlan {
    /// Net balance delta per envelope if the plan executes
    pub fn balance_deltas(&self) -> Vec<(EnvelopeId, Money)> {
        let mut deltas: Vec<(EnvelopeId, Money)> = Vec::new();
        let mut add = |id: EnvelopeId, amount: Money| {
            if let Some(entry) = deltas.iter_mut().find(|(eid, _)| *eid == id) {
                entry.1 += amount;
            } else {
                deltas.push((id, amount));
            }
        };
        for transfer in &self.transfers {
            add(transfer.from_id, -transfer.amount);
            add(transfer.to_id, transfer.amount);
        }
        deltas
    }
}

/// Plan transfers that pull over-spent envelopes back to zero
///
/// Partitions the snapshot internally: deficits are envelopes with negative
/// balances; donors are envelopes holding a positive balance against a
/// positive target. Insufficient surplus is reported as `can_balance =
/// false`, never as an error, and the plan still clears as much deficit as
/// the surplus covers.
pub fn plan_rebalance(envelopes: &[Envelope]) -> RebalancePlan {
    let mut deficits: Vec<(&Envelope, Money)> = envelopes
        .iter()
        .filter(|e| e.is_overspent())
        .map(|e| (e, e.current_amount.abs()))
        .collect();
    // Fix the worst problem first
    deficits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));

    let mut donors: Vec<(&Envelope, Money)> = envelopes
        .iter()
        .filter(|e| e.has_surplus())
        .map(|e| (e, e.current_amount))
        .collect();
    donors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));

    let total_overspent: Money = deficits.iter().map(|(_, d)| *d).sum();
    let total_surplus: Money = donors.iter().map(|(_, s)| *s).sum();

    let mut transfers = Vec::new();
    let mut donor_idx = 0;
    for (deficit_env, deficit) in &deficits {
        let mut needed = *deficit;
        while needed.is_positive() && donor_idx < donors.len() {
            let (donor_env, available) = &mut donors[donor_idx];
            let amount = needed.min(*available);
            if amount.is_positive() {
                transfers.push(PlannedTransfer {
                    from_id: donor_env.id,
                    from_name: donor_env.name.clone(),
                    to_id: deficit_env.id,
                    to_name: deficit_env.name.clone(),
                    amount,
                });
                needed -= amount;
                *available -= amount;
            }
            if available.is_zero() {
                donor_idx += 1;
            }
        }
        if donor_idx >= donors.len() && needed.is_positive() {
            break;
        }
    }

    RebalancePlan {
        transfers,
        can_balance: total_surplus >= total_overspent,
        total_overspent,
        total_surplus,
    }
}
