//! Rebalance service
//!
//! Planning is read-only; execution applies the plan's balance deltas as a
//! single atomic batch and records one immutable transfer per planned
//! movement. A batch that fails validation leaves balances untouched and
//! records nothing.

use crate::audit::EntityType;
use crate::engine::{plan_rebalance, RebalancePlan};
use crate::error::PayplanResult;
use crate::models::Transfer;
use crate::storage::Storage;

/// Service for envelope rebalancing
pub struct RebalanceService<'a> {
    storage: &'a Storage,
}

impl<'a> RebalanceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Plan transfers over a fresh snapshot without executing them
    pub fn plan(&self) -> PayplanResult<RebalancePlan> {
        let envelopes = self.storage.envelopes.get_all()?;
        Ok(plan_rebalance(&envelopes))
    }

    /// Plan and execute as one atomic batch
    ///
    /// A plan with insufficient surplus still executes, clearing as much
    /// deficit as the surplus covers; `can_balance` in the returned plan
    /// tells the caller which case occurred.
    pub fn execute(&self) -> PayplanResult<(RebalancePlan, Vec<Transfer>)> {
        let plan = self.plan()?;
        if plan.transfers.is_empty() {
            return Ok((plan, Vec::new()));
        }

        // All balance deltas land in one atomic write, or none do
        self.storage
            .envelopes
            .apply_balance_deltas(&plan.balance_deltas())?;

        let transfers: Vec<Transfer> = plan
            .transfers
            .iter()
            .map(|t| {
                Transfer::new(
                    t.from_id,
                    t.to_id,
                    t.amount,
                    Some(format!("rebalance: {} -> {}", t.from_name, t.to_name)),
                )
            })
            .collect();
        self.storage.transfers.append_batch(transfers.clone())?;
        self.storage.transfers.save()?;

        self.storage.log_batch(
            EntityType::Transfer,
            "rebalance",
            format!(
                "executed {} transfers covering {} of {} overspent",
                transfers.len(),
                plan.total_overspent.min(plan.total_surplus),
                plan.total_overspent
            ),
        )?;

        Ok((plan, transfers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayplanPaths;
    use crate::models::{Envelope, Frequency, Money};
    use tempfile::TempDir;

    fn setup(temp_dir: &TempDir) -> Storage {
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::new(paths).unwrap()
    }

    fn envelope(name: &str, balance_cents: i64) -> Envelope {
        let mut env = Envelope::new(name, Money::from_cents(10000), Frequency::Monthly);
        env.set_balance(Money::from_cents(balance_cents));
        env
    }

    #[test]
    fn test_execute_clears_deficits() {
        let temp_dir = TempDir::new().unwrap();
        let storage = setup(&temp_dir);

        let overspent = envelope("Groceries", -1500);
        let donor = envelope("Fun", 5000);
        let (overspent_id, donor_id) = (overspent.id, donor.id);
        storage.envelopes.upsert(overspent).unwrap();
        storage.envelopes.upsert(donor).unwrap();
        storage.save_all().unwrap();

        let service = RebalanceService::new(&storage);
        let (plan, transfers) = service.execute().unwrap();

        assert!(plan.can_balance);
        assert_eq!(transfers.len(), 1);

        let overspent = storage.envelopes.get(overspent_id).unwrap().unwrap();
        let donor = storage.envelopes.get(donor_id).unwrap().unwrap();
        assert!(overspent.current_amount.is_zero());
        assert_eq!(donor.current_amount.cents(), 3500);
    }

    #[test]
    fn test_execute_records_transfers() {
        let temp_dir = TempDir::new().unwrap();
        let storage = setup(&temp_dir);

        storage.envelopes.upsert(envelope("Groceries", -1500)).unwrap();
        storage.envelopes.upsert(envelope("Fun", 5000)).unwrap();
        storage.save_all().unwrap();

        let service = RebalanceService::new(&storage);
        service.execute().unwrap();

        let recorded = storage.transfers.get_all().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount.cents(), 1500);
        assert!(recorded[0].note.as_deref().unwrap().contains("rebalance"));
    }

    #[test]
    fn test_partial_execution_with_insufficient_surplus() {
        let temp_dir = TempDir::new().unwrap();
        let storage = setup(&temp_dir);

        let overspent = envelope("Groceries", -5000);
        let donor = envelope("Fun", 2000);
        let overspent_id = overspent.id;
        storage.envelopes.upsert(overspent).unwrap();
        storage.envelopes.upsert(donor).unwrap();
        storage.save_all().unwrap();

        let service = RebalanceService::new(&storage);
        let (plan, transfers) = service.execute().unwrap();

        assert!(!plan.can_balance);
        assert_eq!(transfers.len(), 1);
        let overspent = storage.envelopes.get(overspent_id).unwrap().unwrap();
        assert_eq!(overspent.current_amount.cents(), -3000);
    }

    #[test]
    fn test_nothing_to_do_executes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = setup(&temp_dir);

        storage.envelopes.upsert(envelope("Fine", 500)).unwrap();
        storage.save_all().unwrap();

        let service = RebalanceService::new(&storage);
        let (plan, transfers) = service.execute().unwrap();

        assert!(plan.can_balance);
        assert!(transfers.is_empty());
        assert!(storage.transfers.get_all().unwrap().is_empty());
    }
}
