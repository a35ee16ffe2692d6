//! Debt repository
//!
//! A snowball payment touches several debts at once; `replace_batch` stages
//! the engine's updated snapshot and lands it in one atomic write so the
//! persisted state can never show half a payment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::engine::snowball_order;
use crate::error::{PayplanError, PayplanResult};
use crate::models::{DebtId, DebtItem};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DebtData {
    #[serde(default)]
    debts: Vec<DebtItem>,
}

/// Repository for debt items
#[derive(Debug)]
pub struct DebtRepository {
    path: PathBuf,
    debts: RwLock<HashMap<DebtId, DebtItem>>,
}

impl DebtRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            debts: RwLock::new(HashMap::new()),
        }
    }

    /// Load debts from disk
    pub fn load(&self) -> PayplanResult<()> {
        let file_data: DebtData = read_json(&self.path)?;

        let mut debts = self
            .debts
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        debts.clear();
        for debt in file_data.debts {
            debts.insert(debt.id, debt);
        }

        Ok(())
    }

    /// Save debts to disk
    pub fn save(&self) -> PayplanResult<()> {
        let debts = self
            .debts
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = debts.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &DebtData { debts: list })
    }

    pub fn get(&self, id: DebtId) -> PayplanResult<Option<DebtItem>> {
        let debts = self
            .debts
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(debts.get(&id).cloned())
    }

    /// Find a debt by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> PayplanResult<Option<DebtItem>> {
        let debts = self
            .debts
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(debts
            .values()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Snapshot of all debts in snowball order (paid-off last)
    pub fn get_all(&self) -> PayplanResult<Vec<DebtItem>> {
        let debts = self
            .debts
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = debts.values().cloned().collect();
        snowball_order(&mut list);
        Ok(list)
    }

    pub fn upsert(&self, debt: DebtItem) -> PayplanResult<()> {
        let mut debts = self
            .debts
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        debts.insert(debt.id, debt);
        Ok(())
    }

    /// Persist an engine-updated debt snapshot as one all-or-nothing unit
    ///
    /// Every debt in the batch must already exist; an unknown id fails the
    /// whole batch before anything mutates.
    pub fn replace_batch(&self, batch: &[DebtItem]) -> PayplanResult<()> {
        let mut debts = self
            .debts
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for debt in batch {
            if !debts.contains_key(&debt.id) {
                return Err(PayplanError::debt_not_found(debt.id.to_string()));
            }
        }

        for debt in batch {
            debts.insert(debt.id, debt.clone());
        }

        drop(debts);
        self.save()
    }
}
