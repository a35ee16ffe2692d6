//! Income allocation across envelopes
//!
//! Maintains the zero-based budgeting invariant: every active income
//! source's amount is fully assigned across envelope allocations, and no
//! dollar is assigned twice. The engine applies explicit edits one cell at a
//! time and reports imbalance; it never silently corrects other cells. The
//! auto-distribute mode divides each envelope's per-cycle contribution
//! evenly across active sources.

use std::collections::HashMap;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{Envelope, EnvelopeId, IncomeSource, IncomeSourceId, Money, PayCycle};

use super::pay_cycle::pay_cycle_amount;

/// One explicit change to an (envelope, income source) allocation cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEdit {
    pub envelope_id: EnvelopeId,
    pub source_id: IncomeSourceId,
    pub amount: Money,
}

/// Per-source totals for display: how much of each source is spoken for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTotal {
    pub source_id: IncomeSourceId,
    pub name: String,
    pub amount: Money,
    pub allocated: Money,
    pub remaining: Money,
}

/// Result of applying allocation edits to a snapshot
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// The updated envelope snapshot (inputs are never mutated)
    pub envelopes: Vec<Envelope>,
    pub per_source_totals: Vec<SourceTotal>,
    /// Every active source balances within tolerance
    pub balanced: bool,
}

/// Apply explicit allocation edits and recompute per-source totals
///
/// Edits referencing unknown envelopes or sources fail with `NotFound`;
/// negative amounts fail validation. Imbalance is reported through
/// `balanced`, never corrected.
pub fn allocate_income(
    envelopes: &[Envelope],
    sources: &[IncomeSource],
    edits: &[AllocationEdit],
    tolerance: Money,
) -> PayplanResult<AllocationOutcome> {
    let mut updated: Vec<Envelope> = envelopes.to_vec();

    for edit in edits {
        if edit.amount.is_negative() {
            return Err(PayplanError::Validation(format!(
                "Allocation amount cannot be negative: {}",
                edit.amount
            )));
        }
        if !sources.iter().any(|s| s.id == edit.source_id) {
            return Err(PayplanError::income_source_not_found(
                edit.source_id.to_string(),
            ));
        }
        let envelope = updated
            .iter_mut()
            .find(|e| e.id == edit.envelope_id)
            .ok_or_else(|| PayplanError::envelope_not_found(edit.envelope_id.to_string()))?;
        envelope.set_allocation(edit.source_id, edit.amount);
    }

    let per_source_totals = source_totals(&updated, sources);
    let balanced = per_source_totals
        .iter()
        .all(|t| t.remaining.within_tolerance(Money::zero(), tolerance));

    Ok(AllocationOutcome {
        envelopes: updated,
        per_source_totals,
        balanced,
    })
}

/// Recompute each active source's allocated total and remainder
pub fn source_totals(envelopes: &[Envelope], sources: &[IncomeSource]) -> Vec<SourceTotal> {
    let mut allocated: HashMap<IncomeSourceId, Money> = HashMap::new();
    for envelope in envelopes {
        for (source_id, amount) in &envelope.income_allocations {
            *allocated.entry(*source_id).or_default() += *amount;
        }
    }

    let mut active: Vec<&IncomeSource> = sources.iter().filter(|s| s.active).collect();
    active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    active
        .into_iter()
        .map(|source| {
            let allocated = allocated.get(&source.id).copied().unwrap_or_default();
            SourceTotal {
                source_id: source.id,
                name: source.name.clone(),
                amount: source.amount,
                allocated,
                remaining: source.amount - allocated,
            }
        })
        .collect()
}

/// Divide every non-exempt envelope's per-cycle contribution evenly across
/// the active income sources
///
/// Remainder cents go to the earliest-created active source so the division
/// is deterministic. With a single active source this routes each envelope's
/// full contribution to it. Exempt envelopes have their cells cleared; they
/// are funded ad hoc, not from the budget.
pub fn auto_distribute(
    envelopes: &[Envelope],
    sources: &[IncomeSource],
    pay_cycle: PayCycle,
) -> PayplanResult<Vec<Envelope>> {
    let mut active: Vec<&IncomeSource> = sources.iter().filter(|s| s.active).collect();
    if active.is_empty() {
        return Err(PayplanError::Validation(
            "No active income sources to distribute across".into(),
        ));
    }
    active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let mut updated: Vec<Envelope> = envelopes.to_vec();
    for envelope in &mut updated {
        envelope.clear_allocations();
        if envelope.is_exempt() {
            continue;
        }

        let per_cycle = pay_cycle_amount(envelope, pay_cycle)?;
        let (share, remainder) = per_cycle.split_even(active.len() as i64);
        for (i, source) in active.iter().enumerate() {
            let amount = if i == 0 { share + remainder } else { share };
            envelope.set_allocation(source.id, amount);
        }
    }

    Ok(updated)
}

/// Enforce the zero-based invariant at commit time
///
/// Fails with `UnbalancedAllocation` naming the first source whose
/// remainder exceeds the tolerance; imbalance before commit is fine.
pub fn validate_commit(
    envelopes: &[Envelope],
    sources: &[IncomeSource],
    tolerance: Money,
) -> PayplanResult<()> {
    for total in source_totals(envelopes, sources) {
        if !total.remaining.within_tolerance(Money::zero(), tolerance) {
            return Err(PayplanError::UnbalancedAllocation {
                source_name: total.name,
                remaining: total.remaining,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn envelope(name: &str, target_cents: i64) -> Envelope {
        Envelope::new(name, Money::from_cents(target_cents), Frequency::Monthly)
    }

    fn source(name: &str, amount_cents: i64) -> IncomeSource {
        IncomeSource::new(name, Money::from_cents(amount_cents), Frequency::Monthly)
    }

    fn tolerance() -> Money {
        Money::from_cents(1)
    }

    #[test]
    fn test_single_edit_updates_one_cell() {
        let envelopes = vec![envelope("Rent", 120000), envelope("Groceries", 60000)];
        let sources = vec![source("Salary", 180000)];
        let edit = AllocationEdit {
            envelope_id: envelopes[0].id,
            source_id: sources[0].id,
            amount: Money::from_cents(120000),
        };

        let outcome = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap();

        let rent = &outcome.envelopes[0];
        assert_eq!(rent.allocation_total().cents(), 120000);
        // The other envelope is untouched - no auto-balancing
        assert!(outcome.envelopes[1].income_allocations.is_empty());
        assert!(!outcome.balanced);
        assert_eq!(outcome.per_source_totals[0].remaining.cents(), 60000);
    }

    #[test]
    fn test_balanced_after_full_assignment() {
        let envelopes = vec![envelope("Rent", 120000), envelope("Groceries", 60000)];
        let sources = vec![source("Salary", 180000)];
        let edits = [
            AllocationEdit {
                envelope_id: envelopes[0].id,
                source_id: sources[0].id,
                amount: Money::from_cents(120000),
            },
            AllocationEdit {
                envelope_id: envelopes[1].id,
                source_id: sources[0].id,
                amount: Money::from_cents(60000),
            },
        ];

        let outcome = allocate_income(&envelopes, &sources, &edits, tolerance()).unwrap();
        assert!(outcome.balanced);
        assert!(outcome.per_source_totals[0].remaining.is_zero());
    }

    #[test]
    fn test_zero_based_invariant_after_balanced_allocation() {
        let envelopes = vec![envelope("Rent", 100000), envelope("Power", 30000)];
        let sources = vec![source("Salary", 90000), source("Side job", 40000)];
        let edits = [
            AllocationEdit {
                envelope_id: envelopes[0].id,
                source_id: sources[0].id,
                amount: Money::from_cents(90000),
            },
            AllocationEdit {
                envelope_id: envelopes[0].id,
                source_id: sources[1].id,
                amount: Money::from_cents(10000),
            },
            AllocationEdit {
                envelope_id: envelopes[1].id,
                source_id: sources[1].id,
                amount: Money::from_cents(30000),
            },
        ];

        let outcome = allocate_income(&envelopes, &sources, &edits, tolerance()).unwrap();
        assert!(outcome.balanced);

        // Every source's amount is fully assigned across envelopes
        for total in &outcome.per_source_totals {
            let summed: Money = outcome
                .envelopes
                .iter()
                .filter_map(|e| e.income_allocations.get(&total.source_id))
                .copied()
                .sum();
            assert_eq!(summed, total.amount);
        }
    }

    #[test]
    fn test_unknown_envelope_rejected() {
        let envelopes = vec![envelope("Rent", 120000)];
        let sources = vec![source("Salary", 120000)];
        let edit = AllocationEdit {
            envelope_id: EnvelopeId::new(),
            source_id: sources[0].id,
            amount: Money::from_cents(100),
        };

        let err = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_source_rejected() {
        let envelopes = vec![envelope("Rent", 120000)];
        let sources = vec![source("Salary", 120000)];
        let edit = AllocationEdit {
            envelope_id: envelopes[0].id,
            source_id: IncomeSourceId::new(),
            amount: Money::from_cents(100),
        };

        let err = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let envelopes = vec![envelope("Rent", 120000)];
        let sources = vec![source("Salary", 120000)];
        let edit = AllocationEdit {
            envelope_id: envelopes[0].id,
            source_id: sources[0].id,
            amount: Money::from_cents(-1),
        };

        let err = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_auto_distribute_two_sources() {
        let envelopes = vec![envelope("Rent", 100000)];
        let sources = vec![source("Salary", 90000), source("Side job", 40000)];

        let updated = auto_distribute(&envelopes, &sources, PayCycle::Monthly).unwrap();
        let rent = &updated[0];
        assert_eq!(rent.allocation_total().cents(), 100000);
        assert_eq!(rent.income_allocations[&sources[0].id].cents(), 50000);
        assert_eq!(rent.income_allocations[&sources[1].id].cents(), 50000);
    }

    #[test]
    fn test_auto_distribute_remainder_to_first_source() {
        let envelopes = vec![envelope("Rent", 100001)];
        let sources = vec![source("Salary", 90000), source("Side job", 40000)];

        let updated = auto_distribute(&envelopes, &sources, PayCycle::Monthly).unwrap();
        let rent = &updated[0];
        // 100001 / 2 = 50000 r 1; earliest-created source takes the remainder
        assert_eq!(rent.income_allocations[&sources[0].id].cents(), 50001);
        assert_eq!(rent.income_allocations[&sources[1].id].cents(), 50000);
        assert_eq!(rent.allocation_total().cents(), 100001);
    }

    #[test]
    fn test_auto_distribute_single_source_takes_all() {
        let envelopes = vec![envelope("Rent", 120000), envelope("Groceries", 60000)];
        let sources = vec![source("Salary", 180000)];

        let updated = auto_distribute(&envelopes, &sources, PayCycle::Monthly).unwrap();
        for env in &updated {
            assert_eq!(env.income_allocations.len(), 1);
            assert_eq!(env.allocation_total(), env.target_amount);
        }
        assert!(validate_commit(&updated, &sources, tolerance()).is_ok());
    }

    #[test]
    fn test_auto_distribute_skips_inactive_sources() {
        let envelopes = vec![envelope("Rent", 100000)];
        let mut retired = source("Old job", 50000);
        retired.deactivate();
        let sources = vec![source("Salary", 100000), retired];

        let updated = auto_distribute(&envelopes, &sources, PayCycle::Monthly).unwrap();
        assert_eq!(updated[0].income_allocations.len(), 1);
    }

    #[test]
    fn test_auto_distribute_clears_exempt_envelopes() {
        let mut goal = envelope("Holiday", 50000);
        goal.is_goal = true;
        goal.set_allocation(IncomeSourceId::new(), Money::from_cents(1000));
        let sources = vec![source("Salary", 100000)];

        let updated = auto_distribute(&[goal], &sources, PayCycle::Monthly).unwrap();
        assert!(updated[0].income_allocations.is_empty());
    }

    #[test]
    fn test_auto_distribute_no_active_sources_fails() {
        let envelopes = vec![envelope("Rent", 100000)];
        let mut retired = source("Old job", 50000);
        retired.deactivate();

        let err = auto_distribute(&envelopes, &[retired], PayCycle::Monthly).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_commit_reports_unbalanced_source() {
        let envelopes = vec![envelope("Rent", 120000)];
        let sources = vec![source("Salary", 180000)];
        let edit = AllocationEdit {
            envelope_id: envelopes[0].id,
            source_id: sources[0].id,
            amount: Money::from_cents(120000),
        };

        let outcome = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap();
        let err = validate_commit(&outcome.envelopes, &sources, tolerance()).unwrap_err();
        match err {
            PayplanError::UnbalancedAllocation { source_name, remaining } => {
                assert_eq!(source_name, "Salary");
                assert_eq!(remaining.cents(), 60000);
            }
            other => panic!("Expected UnbalancedAllocation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_commit_tolerates_one_cent() {
        let envelopes = vec![envelope("Rent", 119999)];
        let sources = vec![source("Salary", 120000)];
        let edit = AllocationEdit {
            envelope_id: envelopes[0].id,
            source_id: sources[0].id,
            amount: Money::from_cents(119999),
        };

        let outcome = allocate_income(&envelopes, &sources, &[edit], tolerance()).unwrap();
        assert!(validate_commit(&outcome.envelopes, &sources, tolerance()).is_ok());
    }

    #[test]
    fn test_inactive_sources_excluded_from_totals() {
        let envelopes = vec![envelope("Rent", 100000)];
        let mut retired = source("Old job", 50000);
        retired.deactivate();
        let sources = vec![source("Salary", 100000), retired];

        let totals = source_totals(&envelopes, &sources);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "Salary");
    }
}
