//! Income allocation service
//!
//! Orchestrates the allocation engine over storage: loads fresh envelope and
//! income snapshots, applies edits or auto-distribution, and persists the
//! updated envelopes. Committing a budget enforces the zero-based invariant
//! first and is all-or-nothing.

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::engine::{
    allocate_income, auto_distribute, source_totals, validate_commit, AllocationEdit,
    AllocationOutcome,
};
use crate::error::{PayplanError, PayplanResult};
use crate::models::{EnvelopeId, IncomeSourceId, Money};
use crate::storage::Storage;

/// Service for managing income allocations
pub struct AllocationService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> AllocationService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Set one (envelope, income source) allocation cell
    pub fn set_allocation(
        &self,
        envelope_id: EnvelopeId,
        source_id: IncomeSourceId,
        amount: Money,
    ) -> PayplanResult<AllocationOutcome> {
        let envelopes = self.storage.envelopes.get_all()?;
        let sources = self.storage.incomes.get_all()?;

        let edit = AllocationEdit {
            envelope_id,
            source_id,
            amount,
        };
        let outcome = allocate_income(&envelopes, &sources, &[edit], self.settings.tolerance())?;

        let updated = outcome
            .envelopes
            .iter()
            .find(|e| e.id == envelope_id)
            .cloned()
            .ok_or_else(|| PayplanError::envelope_not_found(envelope_id.to_string()))?;
        let name = updated.name.clone();
        self.storage.envelopes.upsert(updated.clone())?;
        self.storage.envelopes.save()?;

        self.storage.log_update(
            EntityType::Envelope,
            envelope_id.to_string(),
            Some(name),
            &updated,
            format!("allocation cell {} -> {}", source_id, amount),
        )?;

        Ok(outcome)
    }

    /// Divide every envelope's per-cycle contribution evenly across active
    /// sources
    pub fn auto_distribute(&self) -> PayplanResult<AllocationOutcome> {
        let envelopes = self.storage.envelopes.get_all()?;
        let sources = self.storage.incomes.get_all()?;

        let updated = auto_distribute(&envelopes, &sources, self.settings.pay_cycle)?;
        self.storage.envelopes.upsert_batch(updated.clone())?;
        self.storage.envelopes.save()?;

        self.storage.log_batch(
            EntityType::Budget,
            "auto-distribute",
            format!("redistributed allocations across {} envelopes", updated.len()),
        )?;

        let per_source_totals = source_totals(&updated, &sources);
        let balanced = per_source_totals
            .iter()
            .all(|t| t.remaining.within_tolerance(Money::zero(), self.settings.tolerance()));

        Ok(AllocationOutcome {
            envelopes: updated,
            per_source_totals,
            balanced,
        })
    }

    /// Current allocation state without changing anything
    pub fn status(&self) -> PayplanResult<AllocationOutcome> {
        let envelopes = self.storage.envelopes.get_all()?;
        let sources = self.storage.incomes.get_all()?;
        allocate_income(&envelopes, &sources, &[], self.settings.tolerance())
    }

    /// Finalize the budget, enforcing the zero-based invariant
    ///
    /// With exactly one active income source manual allocation is skipped:
    /// every envelope's full contribution routes to it before validation.
    /// Fails with `UnbalancedAllocation` when any source's remainder
    /// exceeds the tolerance; nothing is persisted on failure.
    pub fn commit_budget(&self) -> PayplanResult<AllocationOutcome> {
        let envelopes = self.storage.envelopes.get_all()?;
        let sources = self.storage.incomes.get_all()?;

        let active_count = sources.iter().filter(|s| s.active).count();
        let envelopes = if active_count == 1 {
            auto_distribute(&envelopes, &sources, self.settings.pay_cycle)?
        } else {
            envelopes
        };

        validate_commit(&envelopes, &sources, self.settings.tolerance())?;

        self.storage.envelopes.upsert_batch(envelopes.clone())?;
        self.storage.envelopes.save()?;

        self.storage.log_batch(
            EntityType::Budget,
            "commit",
            format!(
                "budget committed: {} envelopes against {} active sources",
                envelopes.len(),
                active_count
            ),
        )?;

        let per_source_totals = source_totals(&envelopes, &sources);
        Ok(AllocationOutcome {
            envelopes,
            per_source_totals,
            balanced: true,
        })
    }
}
