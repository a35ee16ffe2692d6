//! Payday service
//!
//! Read-only: loads a fresh envelope snapshot and hands it to the payday
//! allocator. Acting on the suggestions is a separate, explicit user step.

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::engine::{compute_payday_allocation, PaydayAllocation};
use crate::error::PayplanResult;
use crate::models::Money;
use crate::storage::Storage;

/// Service for payday computations
pub struct PaydayService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> PaydayService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Compute how one pay event lands across the envelope set
    pub fn compute(&self, pay_amount: Money, as_of: NaiveDate) -> PayplanResult<PaydayAllocation> {
        let envelopes = self.storage.envelopes.get_all()?;
        compute_payday_allocation(
            pay_amount,
            &envelopes,
            self.settings.pay_cycle,
            as_of,
            self.settings.tolerance(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayplanPaths;
    use crate::engine::SurplusStatus;
    use crate::models::{Envelope, Frequency};
    use tempfile::TempDir;

    #[test]
    fn test_compute_over_stored_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let settings = Settings::default();

        storage
            .envelopes
            .upsert(Envelope::new(
                "Rent",
                Money::from_cents(120000),
                Frequency::Monthly,
            ))
            .unwrap();

        let service = PaydayService::new(&storage, &settings);
        let result = service
            .compute(
                Money::from_cents(150000),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .unwrap();

        assert_eq!(result.total_regular.cents(), 120000);
        assert_eq!(result.surplus.cents(), 30000);
        assert_eq!(result.surplus_status, SurplusStatus::Available);
    }
}
