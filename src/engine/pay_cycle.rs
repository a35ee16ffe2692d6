//! Pay-cycle amount normalization
//!
//! Converts an amount declared at one frequency into its equivalent at
//! another via annualization factors (weekly x52, fortnightly x26, monthly
//! x12, quarterly x4, annual x1). Pure functions; rounding to whole cents
//! happens once, at the conversion.

use crate::error::{PayplanError, PayplanResult};
use crate::models::{Envelope, Frequency, Money, PayCycle};

/// Convert `amount` from one frequency to another
///
/// Fails with `InvalidFrequency` when either side carries no schedule.
pub fn normalize_amount(amount: Money, from: Frequency, to: Frequency) -> PayplanResult<Money> {
    let from_factor = from
        .annual_factor()
        .ok_or_else(|| PayplanError::InvalidFrequency(from.to_string()))?;
    let to_factor = to
        .annual_factor()
        .ok_or_else(|| PayplanError::InvalidFrequency(to.to_string()))?;

    if from == to {
        return Ok(amount);
    }

    Ok(amount.mul_round(from_factor as f64 / to_factor as f64))
}

/// An envelope's contribution per pay cycle
///
/// Unscheduled envelopes (`Frequency::None`) declare their target directly
/// per pay cycle; scheduled envelopes are normalized from their own
/// frequency.
pub fn pay_cycle_amount(envelope: &Envelope, pay_cycle: PayCycle) -> PayplanResult<Money> {
    match envelope.frequency {
        Frequency::None => Ok(envelope.target_amount),
        freq => normalize_amount(envelope.target_amount, freq, pay_cycle.frequency()),
    }
}
