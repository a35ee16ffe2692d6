//! Payday allocation
//!
//! Splits one incoming pay event into the regular (already-budgeted)
//! allocations and a surplus or shortfall, grades every envelope's savings
//! progress against where its funding schedule says it should be, and ranks
//! suggestions for any surplus.

use chrono::NaiveDate;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{Envelope, EnvelopeId, Money, PayCycle, Priority};

use super::opening_balance::calculate_opening_balance;
use super::pay_cycle::pay_cycle_amount;

/// How a pay event compares to the regular budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurplusStatus {
    Available,
    Shortfall,
    Exact,
}

/// An envelope's savings progress against its schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapStatus {
    Ahead,
    OnTrack,
    Behind,
}

/// Per-priority-tier share of the regular budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSummary {
    pub priority: Priority,
    pub total: Money,
    pub envelope_count: usize,
}

/// One envelope's schedule health at this pay event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHealth {
    pub envelope_id: EnvelopeId,
    pub name: String,
    /// Expected balance at this point in the funding schedule
    pub should_have_saved: Money,
    pub current_amount: Money,
    /// current - expected; negative means behind
    pub gap: Money,
    pub status: GapStatus,
}

/// A ranked disposition for surplus money
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Catch a behind envelope up to its schedule
    TopUp {
        envelope_id: EnvelopeId,
        name: String,
        amount: Money,
    },
    /// Nothing is behind and no goal exists yet
    StartGoal { amount: Money },
    /// Nothing is behind; park the rest
    HoldAsBuffer { amount: Money },
}

/// Full result of a payday computation
#[derive(Debug, Clone)]
pub struct PaydayAllocation {
    pub pay_amount: Money,
    /// Sum of all regular per-cycle allocations
    pub total_regular: Money,
    pub surplus: Money,
    pub surplus_status: SurplusStatus,
    pub tiers: Vec<TierSummary>,
    pub envelope_health: Vec<EnvelopeHealth>,
    pub behind_count: usize,
    /// Total magnitude of all behind envelopes' gaps
    pub total_gap: Money,
    pub suggestions: Vec<Suggestion>,
}

/// Compute the allocation of one pay event across the envelope set
///
/// Pure over the snapshot; suggestion ranking is deterministic: behind
/// envelopes ordered largest gap first, ties broken by creation time then
/// id.
pub fn compute_payday_allocation(
    pay_amount: Money,
    envelopes: &[Envelope],
    pay_cycle: PayCycle,
    as_of: NaiveDate,
    tolerance: Money,
) -> PayplanResult<PaydayAllocation> {
    if !pay_amount.is_positive() {
        return Err(PayplanError::InvalidPaymentAmount(pay_amount));
    }

    // Tier totals over the regular (non-exempt) budget
    let mut tiers: Vec<TierSummary> = Priority::all()
        .into_iter()
        .map(|priority| TierSummary {
            priority,
            total: Money::zero(),
            envelope_count: 0,
        })
        .collect();

    let mut total_regular = Money::zero();
    for envelope in envelopes.iter().filter(|e| !e.is_exempt()) {
        let per_cycle = pay_cycle_amount(envelope, pay_cycle)?;
        total_regular += per_cycle;
        if let Some(tier) = tiers.iter_mut().find(|t| t.priority == envelope.priority) {
            tier.total += per_cycle;
            tier.envelope_count += 1;
        }
    }

    let surplus = pay_amount - total_regular;
    let surplus_status = if surplus > tolerance {
        SurplusStatus::Available
    } else if surplus < -tolerance {
        SurplusStatus::Shortfall
    } else {
        SurplusStatus::Exact
    };

    // Schedule health per funded envelope; an envelope without a due date
    // has no schedule position to be behind on
    let mut envelope_health = Vec::new();
    for envelope in envelopes
        .iter()
        .filter(|e| !e.is_exempt() && e.target_amount.is_positive() && e.due_date.is_some())
    {
        let per_cycle = pay_cycle_amount(envelope, pay_cycle)?;
        let opening = calculate_opening_balance(
            envelope.target_amount,
            envelope.frequency,
            envelope.due_date,
            per_cycle,
            pay_cycle,
            as_of,
        );
        let should_have_saved = opening.opening_balance_needed;
        let gap = envelope.current_amount - should_have_saved;
        let status = if gap > tolerance {
            GapStatus::Ahead
        } else if gap < -tolerance {
            GapStatus::Behind
        } else {
            GapStatus::OnTrack
        };
        envelope_health.push(EnvelopeHealth {
            envelope_id: envelope.id,
            name: envelope.name.clone(),
            should_have_saved,
            current_amount: envelope.current_amount,
            gap,
            status,
        });
    }

    let behind_count = envelope_health
        .iter()
        .filter(|h| h.status == GapStatus::Behind)
        .count();
    let total_gap = envelope_health
        .iter()
        .filter(|h| h.status == GapStatus::Behind)
        .map(|h| h.gap.abs())
        .sum();

    let suggestions = if surplus_status == SurplusStatus::Available {
        rank_suggestions(surplus, envelopes, &envelope_health)
    } else {
        Vec::new()
    };

    Ok(PaydayAllocation {
        pay_amount,
        total_regular,
        surplus,
        surplus_status,
        tiers,
        envelope_health,
        behind_count,
        total_gap,
        suggestions,
    })
}

/// Rank surplus dispositions: top-ups first (largest gap wins), then a new
/// goal or a buffer for whatever is left
fn rank_suggestions(
    surplus: Money,
    envelopes: &[Envelope],
    health: &[EnvelopeHealth],
) -> Vec<Suggestion> {
    let mut behind: Vec<&EnvelopeHealth> = health
        .iter()
        .filter(|h| h.status == GapStatus::Behind)
        .collect();
    behind.sort_by(|a, b| {
        b.gap.abs().cmp(&a.gap.abs()).then_with(|| {
            let created = |id: EnvelopeId| {
                envelopes
                    .iter()
                    .find(|e| e.id == id)
                    .map(|e| e.created_at)
            };
            created(a.envelope_id)
                .cmp(&created(b.envelope_id))
                .then(a.envelope_id.cmp(&b.envelope_id))
        })
    });

    let mut suggestions = Vec::new();
    let mut remaining = surplus;
    for h in behind {
        if !remaining.is_positive() {
            break;
        }
        let amount = remaining.min(h.gap.abs());
        suggestions.push(Suggestion::TopUp {
            envelope_id: h.envelope_id,
            name: h.name.clone(),
            amount,
        });
        remaining -= amount;
    }

    if remaining.is_positive() {
        let has_goal = envelopes.iter().any(|e| e.is_goal);
        if has_goal {
            suggestions.push(Suggestion::HoldAsBuffer { amount: remaining });
        } else {
            suggestions.push(Suggestion::StartGoal { amount: remaining });
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn envelope(name: &str, target_cents: i64, priority: Priority) -> Envelope {
        let mut env = Envelope::new(name, Money::from_cents(target_cents), Frequency::Monthly);
        env.priority = priority;
        env
    }

    fn tolerance() -> Money {
        Money::from_cents(1)
    }

    fn as_of() -> NaiveDate {
        date(2025, 1, 1)
    }

    #[test]
    fn test_rejects_non_positive_pay() {
        let err = compute_payday_allocation(
            Money::zero(),
            &[],
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap_err();
        assert!(matches!(err, PayplanError::InvalidPaymentAmount(_)));
    }

    #[test]
    fn test_exact_budget() {
        let envelopes = vec![
            envelope("Rent", 120000, Priority::Essential),
            envelope("Fun", 20000, Priority::Discretionary),
        ];

        let result = compute_payday_allocation(
            Money::from_cents(140000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.total_regular.cents(), 140000);
        assert!(result.surplus.is_zero());
        assert_eq!(result.surplus_status, SurplusStatus::Exact);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_tier_partitioning() {
        let envelopes = vec![
            envelope("Rent", 120000, Priority::Essential),
            envelope("Power", 15000, Priority::Essential),
            envelope("Clothes", 10000, Priority::Important),
            envelope("Fun", 20000, Priority::Discretionary),
        ];

        let result = compute_payday_allocation(
            Money::from_cents(200000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        let essential = &result.tiers[0];
        assert_eq!(essential.priority, Priority::Essential);
        assert_eq!(essential.total.cents(), 135000);
        assert_eq!(essential.envelope_count, 2);

        let important = &result.tiers[1];
        assert_eq!(important.total.cents(), 10000);

        let discretionary = &result.tiers[2];
        assert_eq!(discretionary.total.cents(), 20000);
    }

    #[test]
    fn test_shortfall_status() {
        let envelopes = vec![envelope("Rent", 120000, Priority::Essential)];

        let result = compute_payday_allocation(
            Money::from_cents(100000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.surplus.cents(), -20000);
        assert_eq!(result.surplus_status, SurplusStatus::Shortfall);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_exempt_envelopes_excluded_from_regular() {
        let mut goal = envelope("Holiday", 50000, Priority::Discretionary);
        goal.is_goal = true;
        let envelopes = vec![envelope("Rent", 120000, Priority::Essential), goal];

        let result = compute_payday_allocation(
            Money::from_cents(120000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.total_regular.cents(), 120000);
        assert_eq!(result.surplus_status, SurplusStatus::Exact);
    }

    #[test]
    fn test_behind_envelope_health() {
        // Due immediately with nothing saved: behind by the full target
        let mut bill = envelope("Insurance", 60000, Priority::Essential);
        bill.due_date = Some(date(2025, 1, 10));

        let result = compute_payday_allocation(
            Money::from_cents(100000),
            &[bill],
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.behind_count, 1);
        let health = &result.envelope_health[0];
        assert_eq!(health.status, GapStatus::Behind);
        assert_eq!(health.should_have_saved.cents(), 60000);
        assert_eq!(health.gap.cents(), -60000);
        assert_eq!(result.total_gap.cents(), 60000);
    }

    #[test]
    fn test_ahead_envelope_health() {
        let mut bill = envelope("Insurance", 60000, Priority::Essential);
        bill.due_date = Some(date(2025, 1, 10));
        bill.set_balance(Money::from_cents(70000));

        let result = compute_payday_allocation(
            Money::from_cents(100000),
            &[bill],
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.behind_count, 0);
        assert_eq!(result.envelope_health[0].status, GapStatus::Ahead);
    }

    #[test]
    fn test_surplus_tops_up_behind_envelopes_largest_gap_first() {
        let mut big_gap = envelope("Insurance", 50000, Priority::Essential);
        big_gap.due_date = Some(date(2025, 1, 5));
        let mut small_gap = envelope("Rego", 20000, Priority::Essential);
        small_gap.due_date = Some(date(2025, 1, 5));
        let envelopes = vec![small_gap.clone(), big_gap.clone()];

        // Regular budget is 70000; pay 100000 leaves 30000 surplus
        let result = compute_payday_allocation(
            Money::from_cents(100000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.surplus.cents(), 30000);

        // Largest gap (Insurance, 50000 behind) ranks first and absorbs the
        // whole surplus; nothing is left for Rego
        assert_eq!(result.suggestions.len(), 1);
        match &result.suggestions[0] {
            Suggestion::TopUp { name, amount, .. } => {
                assert_eq!(name, "Insurance");
                assert_eq!(amount.cents(), 30000);
            }
            other => panic!("Expected TopUp, got {:?}", other),
        }
    }

    #[test]
    fn test_topup_capped_at_gap_then_buffer() {
        let mut bill = envelope("Rego", 20000, Priority::Essential);
        bill.due_date = Some(date(2025, 1, 5));
        let mut goal = envelope("Holiday", 100000, Priority::Discretionary);
        goal.is_goal = true;
        let envelopes = vec![bill, goal];

        // Regular = 20000, pay = 100000, surplus = 80000, gap = 20000
        let result = compute_payday_allocation(
            Money::from_cents(100000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.suggestions.len(), 2);
        match &result.suggestions[0] {
            Suggestion::TopUp { amount, .. } => assert_eq!(amount.cents(), 20000),
            other => panic!("Expected TopUp, got {:?}", other),
        }
        // A goal envelope exists, so the rest is held as buffer
        match &result.suggestions[1] {
            Suggestion::HoldAsBuffer { amount } => assert_eq!(amount.cents(), 60000),
            other => panic!("Expected HoldAsBuffer, got {:?}", other),
        }
    }

    #[test]
    fn test_surplus_with_nothing_behind_proposes_goal() {
        let envelopes = vec![envelope("Rent", 100000, Priority::Essential)];

        let result = compute_payday_allocation(
            Money::from_cents(130000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        assert_eq!(result.suggestions.len(), 1);
        match &result.suggestions[0] {
            Suggestion::StartGoal { amount } => assert_eq!(amount.cents(), 30000),
            other => panic!("Expected StartGoal, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_gaps_tie_break_by_creation_order() {
        // Two envelopes equally behind: the earlier-created one ranks first
        let mut first = envelope("First", 30000, Priority::Essential);
        first.due_date = Some(date(2025, 1, 5));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let mut second = envelope("Second", 30000, Priority::Essential);
        second.due_date = Some(date(2025, 1, 5));

        // Present them in reverse order to prove sorting is not input order
        let envelopes = vec![second, first];

        let result = compute_payday_allocation(
            Money::from_cents(70000),
            &envelopes,
            PayCycle::Monthly,
            as_of(),
            tolerance(),
        )
        .unwrap();

        match &result.suggestions[0] {
            Suggestion::TopUp { name, .. } => assert_eq!(name, "First"),
            other => panic!("Expected TopUp, got {:?}", other),
        }
    }
}
