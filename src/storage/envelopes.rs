//! Envelope repository
//!
//! Persists envelopes to JSON. Balance mutations that span several
//! envelopes (a rebalance batch) go through `apply_balance_deltas`, which
//! validates the whole batch, stages it in memory and lands on disk in one
//! atomic write - partial application is impossible.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{Envelope, EnvelopeId, Money};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    envelopes: Vec<Envelope>,
}

/// Repository for envelopes
#[derive(Debug)]
pub struct EnvelopeRepository {
    path: PathBuf,
    envelopes: RwLock<HashMap<EnvelopeId, Envelope>>,
}

impl EnvelopeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            envelopes: RwLock::new(HashMap::new()),
        }
    }

    /// Load envelopes from disk
    pub fn load(&self) -> PayplanResult<()> {
        let file_data: EnvelopeData = read_json(&self.path)?;

        let mut envelopes = self
            .envelopes
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        envelopes.clear();
        for envelope in file_data.envelopes {
            envelopes.insert(envelope.id, envelope);
        }

        Ok(())
    }

    /// Save envelopes to disk (one atomic write)
    pub fn save(&self) -> PayplanResult<()> {
        let envelopes = self
            .envelopes
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = envelopes.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &EnvelopeData { envelopes: list })
    }

    pub fn get(&self, id: EnvelopeId) -> PayplanResult<Option<Envelope>> {
        let envelopes = self
            .envelopes
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(envelopes.get(&id).cloned())
    }

    /// Find an envelope by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> PayplanResult<Option<Envelope>> {
        let envelopes = self
            .envelopes
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(envelopes
            .values()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Snapshot of all envelopes in creation order
    pub fn get_all(&self) -> PayplanResult<Vec<Envelope>> {
        let envelopes = self
            .envelopes
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = envelopes.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    pub fn upsert(&self, envelope: Envelope) -> PayplanResult<()> {
        let mut envelopes = self
            .envelopes
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        envelopes.insert(envelope.id, envelope);
        Ok(())
    }

    /// Replace several envelopes at once (callers follow with one save)
    pub fn upsert_batch(&self, batch: Vec<Envelope>) -> PayplanResult<()> {
        let mut envelopes = self
            .envelopes
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        for envelope in batch {
            envelopes.insert(envelope.id, envelope);
        }
        Ok(())
    }

    /// Apply a named set of balance deltas as one all-or-nothing unit
    ///
    /// Every delta's envelope is validated before anything mutates; the
    /// batch then lands on disk through a single atomic write. An unknown
    /// id fails the whole batch with nothing changed.
    pub fn apply_balance_deltas(&self, deltas: &[(EnvelopeId, Money)]) -> PayplanResult<()> {
        let mut envelopes = self
            .envelopes
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for (id, _) in deltas {
            if !envelopes.contains_key(id) {
                return Err(PayplanError::envelope_not_found(id.to_string()));
            }
        }

        for (id, delta) in deltas {
            if let Some(envelope) = envelopes.get_mut(id) {
                envelope.set_balance(envelope.current_amount + *delta);
            }
        }

        drop(envelopes);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> EnvelopeRepository {
        EnvelopeRepository::new(temp_dir.path().join("envelopes.json"))
    }

    fn envelope(name: &str, balance_cents: i64) -> Envelope {
        let mut env = Envelope::new(name, Money::from_cents(10000), Frequency::Monthly);
        env.set_balance(Money::from_cents(balance_cents));
        env
    }

    #[test]
    fn test_upsert_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let env = envelope("Rent", 0);
        let id = env.id;
        repo.upsert(env).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Rent");
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.upsert(envelope("Groceries", 0)).unwrap();

        assert!(repo.find_by_name("groceries").unwrap().is_some());
        assert!(repo.find_by_name("GROCERIES").unwrap().is_some());
        assert!(repo.find_by_name("fuel").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("envelopes.json");

        let id = {
            let repo = EnvelopeRepository::new(path.clone());
            let env = envelope("Rent", 5000);
            let id = env.id;
            repo.upsert(env).unwrap();
            repo.save().unwrap();
            id
        };

        let repo = EnvelopeRepository::new(path);
        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.current_amount.cents(), 5000);
    }

    #[test]
    fn test_apply_balance_deltas() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let from = envelope("Fun", 5000);
        let to = envelope("Groceries", -1500);
        let (from_id, to_id) = (from.id, to.id);
        repo.upsert(from).unwrap();
        repo.upsert(to).unwrap();

        repo.apply_balance_deltas(&[
            (from_id, Money::from_cents(-1500)),
            (to_id, Money::from_cents(1500)),
        ])
        .unwrap();

        assert_eq!(repo.get(from_id).unwrap().unwrap().current_amount.cents(), 3500);
        assert_eq!(repo.get(to_id).unwrap().unwrap().current_amount.cents(), 0);
    }

    #[test]
    fn test_delta_batch_with_unknown_id_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let env = envelope("Fun", 5000);
        let id = env.id;
        repo.upsert(env).unwrap();
        repo.save().unwrap();

        let err = repo
            .apply_balance_deltas(&[
                (id, Money::from_cents(-1500)),
                (EnvelopeId::new(), Money::from_cents(1500)),
            ])
            .unwrap_err();
        assert!(err.is_not_found());

        // The known envelope is untouched, in memory and on disk
        assert_eq!(repo.get(id).unwrap().unwrap().current_amount.cents(), 5000);
        let reloaded = EnvelopeRepository::new(temp_dir.path().join("envelopes.json"));
        reloaded.load().unwrap();
        assert_eq!(
            reloaded.get(id).unwrap().unwrap().current_amount.cents(),
            5000
        );
    }

    #[test]
    fn test_get_all_in_creation_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.upsert(envelope("First", 0)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        repo.upsert(envelope("Second", 0)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "First");
        assert_eq!(all[1].name, "Second");
    }
}
