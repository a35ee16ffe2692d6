//! Debt service
//!
//! Orchestrates the snowball engine and payoff projections over storage.
//! Payment application re-reads persisted debts immediately before
//! computing, persists the engine's updated snapshot as one atomic batch,
//! and refreshes the payoff projection of every surviving debt that carries
//! rate and payment assumptions.

use chrono::Utc;

use crate::audit::EntityType;
use crate::engine::{apply_snowball_payment, project_payoff, PayoffSchedule, SnowballOutcome};
use crate::error::{PayplanError, PayplanResult};
use crate::models::{DebtId, DebtItem, EnvelopeId, Money, PayoffProjection};
use crate::storage::Storage;

/// Service for debt management and snowball payments
pub struct DebtService<'a> {
    storage: &'a Storage,
}

impl<'a> DebtService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Declare a new debt under an envelope
    pub fn add_debt(
        &self,
        envelope_id: EnvelopeId,
        name: impl Into<String>,
        balance: Money,
        interest_rate: Option<f64>,
        minimum_payment: Option<Money>,
    ) -> PayplanResult<DebtItem> {
        if self.storage.envelopes.get(envelope_id)?.is_none() {
            return Err(PayplanError::envelope_not_found(envelope_id.to_string()));
        }

        let mut debt = DebtItem::new(envelope_id, name, balance);
        debt.interest_rate = interest_rate;
        debt.minimum_payment = minimum_payment;
        debt.validate()
            .map_err(|e| PayplanError::Validation(e.to_string()))?;

        self.storage.debts.upsert(debt.clone())?;
        self.storage.debts.save()?;

        self.storage.log_create(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.name.clone()),
            &debt,
        )?;

        Ok(debt)
    }

    /// All debts in snowball order
    pub fn list(&self) -> PayplanResult<Vec<DebtItem>> {
        self.storage.debts.get_all()
    }

    /// Apply a payment across all debts smallest-balance-first
    ///
    /// Balances are re-read from disk before the plan is computed so two
    /// racing payment calls each see the other's persisted result rather
    /// than double-applying over a stale snapshot.
    pub fn apply_payment(&self, payment: Money) -> PayplanResult<SnowballOutcome> {
        self.storage.debts.load()?;
        let debts = self.storage.debts.get_all()?;

        let outcome = apply_snowball_payment(&debts, payment, Utc::now())?;

        self.storage.debts.replace_batch(&outcome.debts)?;

        self.storage.log_batch(
            EntityType::Debt,
            "snowball-payment",
            format!(
                "applied {} across {} debts ({} paid off, {} residual)",
                outcome.payment_applied,
                debts.iter().filter(|d| d.is_active()).count(),
                outcome.newly_paid.len(),
                outcome.remaining_payment
            ),
        )?;

        // Payment changed the balances, so prior projections are stale
        for debt in outcome.debts.iter().filter(|d| d.is_active()) {
            if let (Some(apr), Some(minimum)) = (debt.interest_rate, debt.minimum_payment) {
                let extra = self
                    .storage
                    .projections
                    .active_for_debt(debt.id)?
                    .map(|p| p.extra_payment)
                    .unwrap_or_default();
                // A stale projection may now be infeasible (payment below
                // interest); skip it rather than fail the payment
                if let Ok((projection, _)) = self.build_projection(debt, apr, minimum, extra) {
                    self.storage.projections.supersede_and_insert(projection)?;
                }
            }
        }

        Ok(outcome)
    }

    /// Project the payoff curve for one debt
    ///
    /// Requires the debt to carry an interest rate and minimum payment;
    /// `extra` rides on top of the minimum. The projection is stored as the
    /// debt's new active record.
    pub fn project(&self, debt_id: DebtId, extra: Money) -> PayplanResult<(PayoffProjection, PayoffSchedule)> {
        let debt = self
            .storage
            .debts
            .get(debt_id)?
            .ok_or_else(|| PayplanError::debt_not_found(debt_id.to_string()))?;

        let apr = debt.interest_rate.ok_or_else(|| {
            PayplanError::Validation(format!("Debt '{}' has no interest rate", debt.name))
        })?;
        let minimum = debt.minimum_payment.ok_or_else(|| {
            PayplanError::Validation(format!("Debt '{}' has no minimum payment", debt.name))
        })?;

        let (projection, schedule) = self.build_projection(&debt, apr, minimum, extra)?;
        self.storage
            .projections
            .supersede_and_insert(projection.clone())?;

        self.storage.log_create(
            EntityType::Projection,
            projection.id.to_string(),
            Some(debt.name.clone()),
            &projection,
        )?;

        Ok((projection, schedule))
    }

    fn build_projection(
        &self,
        debt: &DebtItem,
        apr: f64,
        minimum: Money,
        extra: Money,
    ) -> PayplanResult<(PayoffProjection, PayoffSchedule)> {
        let schedule = project_payoff(debt.current_balance, apr, minimum + extra)?;
        let projection = PayoffProjection::new(
            debt.id,
            debt.starting_balance,
            debt.current_balance,
            apr,
            minimum,
            extra,
            schedule.months_to_payoff,
            schedule.total_interest_paid,
        );
        Ok((projection, schedule))
    }
}
