//! Opening balance requirements
//!
//! Answers "how much must already be sitting in this envelope today so it
//! reaches its target exactly on schedule?" given the target, due date and
//! the planned per-cycle contribution.

use chrono::NaiveDate;

use crate::models::{Frequency, Money, PayCycle};

/// Due dates this far out are still inside the planning horizon for the
/// under-funded warning.
const WARNING_HORIZON_DAYS: i64 = 365;

/// Result of an opening-balance calculation
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningBalance {
    /// What must already be in the envelope today
    pub opening_balance_needed: Money,
    /// Whole pay cycles remaining before the due date
    pub cycles_until_due: u32,
    /// What the planned contributions will add before the due date
    pub projected_accumulation: Money,
    /// Contributions alone reach the target
    pub is_fully_funded: bool,
    /// Set when a positive target has no contribution behind it
    pub warning: Option<String>,
}

/// Compute the opening balance an envelope needs today
///
/// A due date in the past (or absent) counts as already due: zero cycles
/// remain and the full target must be on hand. The warning flags a bill that
/// is due within the planning horizon but has no per-cycle contribution
/// funding it; it never blocks the calculation.
pub fn calculate_opening_balance(
    target_amount: Money,
    frequency: Frequency,
    due_date: Option<NaiveDate>,
    per_cycle_allocation: Money,
    pay_cycle: PayCycle,
    as_of: NaiveDate,
) -> OpeningBalance {
    let cycles_until_due = due_date
        .map(|due| pay_cycle.cycles_between(as_of, due))
        .unwrap_or(0);

    let projected_accumulation = per_cycle_allocation.times(cycles_until_due as i64);
    let opening_balance_needed = (target_amount - projected_accumulation).max(Money::zero());
    let is_fully_funded = projected_accumulation >= target_amount;

    let due_in_horizon = due_date
        .map(|due| (due - as_of).num_days() <= WARNING_HORIZON_DAYS)
        .unwrap_or(false);
    let warning = if per_cycle_allocation.is_zero()
        && target_amount.is_positive()
        && frequency != Frequency::None
        && due_in_horizon
    {
        Some(format!(
            "No contribution is funding a {} target due within the planning horizon",
            target_amount
        ))
    } else {
        None
    };

    OpeningBalance {
        opening_balance_needed,
        cycles_until_due,
        projected_accumulation,
        is_fully_funded,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_cycles_out() {
        // target=1200, monthly pay cycle, due 3 cycles away, contributing 300
        let result = calculate_opening_balance(
            Money::from_cents(120000),
            Frequency::Monthly,
            Some(date(2025, 4, 1)),
            Money::from_cents(30000),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert_eq!(result.cycles_until_due, 3);
        assert_eq!(result.projected_accumulation.cents(), 90000);
        assert_eq!(result.opening_balance_needed.cents(), 30000);
        assert!(!result.is_fully_funded);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_fully_funded() {
        let result = calculate_opening_balance(
            Money::from_cents(90000),
            Frequency::Monthly,
            Some(date(2025, 4, 1)),
            Money::from_cents(30000),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert!(result.is_fully_funded);
        assert!(result.opening_balance_needed.is_zero());
    }

    #[test]
    fn test_past_due_date_means_zero_cycles() {
        let result = calculate_opening_balance(
            Money::from_cents(50000),
            Frequency::Monthly,
            Some(date(2024, 12, 1)),
            Money::from_cents(10000),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert_eq!(result.cycles_until_due, 0);
        assert!(result.projected_accumulation.is_zero());
        assert_eq!(result.opening_balance_needed.cents(), 50000);
    }

    #[test]
    fn test_absent_due_date_means_already_due() {
        let result = calculate_opening_balance(
            Money::from_cents(50000),
            Frequency::Monthly,
            None,
            Money::from_cents(10000),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert_eq!(result.cycles_until_due, 0);
        assert_eq!(result.opening_balance_needed.cents(), 50000);
        // No due date, no horizon warning
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_warning_for_unfunded_bill() {
        let result = calculate_opening_balance(
            Money::from_cents(50000),
            Frequency::Monthly,
            Some(date(2025, 3, 1)),
            Money::zero(),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert!(result.warning.is_some());
        // Still a computed result, not an error
        assert_eq!(result.opening_balance_needed.cents(), 50000);
    }

    #[test]
    fn test_no_warning_outside_horizon() {
        let result = calculate_opening_balance(
            Money::from_cents(50000),
            Frequency::Monthly,
            Some(date(2027, 1, 1)),
            Money::zero(),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert!(result.warning.is_none());
    }

    #[test]
    fn test_no_warning_for_unscheduled_envelope() {
        let result = calculate_opening_balance(
            Money::from_cents(50000),
            Frequency::None,
            Some(date(2025, 3, 1)),
            Money::zero(),
            PayCycle::Monthly,
            date(2025, 1, 1),
        );

        assert!(result.warning.is_none());
    }

    #[test]
    fn test_weekly_pay_cycle() {
        // Due 28 days out = 4 weekly cycles
        let result = calculate_opening_balance(
            Money::from_cents(20000),
            Frequency::Monthly,
            Some(date(2025, 1, 29)),
            Money::from_cents(4000),
            PayCycle::Weekly,
            date(2025, 1, 1),
        );

        assert_eq!(result.cycles_until_due, 4);
        assert_eq!(result.projected_accumulation.cents(), 16000);
        assert_eq!(result.opening_balance_needed.cents(), 4000);
    }
}
