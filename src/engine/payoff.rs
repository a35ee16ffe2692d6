//! Payoff projection
//!
//! Projects the month-by-month amortization of a debt under a fixed monthly
//! payment: interest accrues at apr/12 on the running balance, the rest of
//! the payment retires principal. A payment that cannot beat the first
//! month's interest would never pay the debt off and fails fast; a
//! projection that runs past the iteration cap fails rather than looping.

use crate::error::{PayplanError, PayplanResult};
use crate::models::Money;

/// Iteration cap: 100 years of months
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// One month of the amortization curve
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduleMonth {
    /// 1-based month number
    pub month: u32,
    pub interest: Money,
    pub principal: Money,
    /// Balance after this month's payment
    pub balance: Money,
}

/// A complete payoff projection
#[derive(Debug, Clone)]
pub struct PayoffSchedule {
    pub months_to_payoff: u32,
    pub total_interest_paid: Money,
    pub schedule: Vec<ScheduleMonth>,
}

/// Project the amortization curve for a debt
///
/// `apr` is a fraction (0.24 = 24%). A zero or negative balance is already
/// paid off and projects to an empty schedule.
pub fn project_payoff(
    balance: Money,
    apr: f64,
    monthly_payment: Money,
) -> PayplanResult<PayoffSchedule> {
    if !(0.0..=10.0).contains(&apr) {
        return Err(PayplanError::Validation(format!(
            "APR must be a fraction between 0 and 10, got {}",
            apr
        )));
    }
    if monthly_payment.is_negative() {
        return Err(PayplanError::Validation(format!(
            "Monthly payment cannot be negative: {}",
            monthly_payment
        )));
    }

    if !balance.is_positive() {
        return Ok(PayoffSchedule {
            months_to_payoff: 0,
            total_interest_paid: Money::zero(),
            schedule: Vec::new(),
        });
    }

    let periodic_rate = apr / 12.0;
    let mut remaining = balance;
    let mut total_interest = Money::zero();
    let mut schedule = Vec::new();

    for month in 1..=MAX_PROJECTION_MONTHS {
        let interest = remaining.mul_round(periodic_rate);
        let principal = monthly_payment - interest;
        if !principal.is_positive() {
            return Err(PayplanError::PaymentTooLow {
                payment: monthly_payment,
                interest,
            });
        }

        // Final month: never retire more principal than is owed
        let principal = principal.min(remaining);
        remaining -= principal;
        total_interest += interest;
        schedule.push(ScheduleMonth {
            month,
            interest,
            principal,
            balance: remaining,
        });

        if remaining.is_zero() {
            return Ok(PayoffSchedule {
                months_to_payoff: month,
                total_interest_paid: total_interest,
                schedule,
            });
        }
    }

    Err(PayplanError::ProjectionDivergent {
        months: MAX_PROJECTION_MONTHS,
    })
}
