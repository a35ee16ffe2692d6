//! Transfer repository
//!
//! Transfers are immutable audit records: the repository appends and reads,
//! nothing else.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PayplanError, PayplanResult};
use crate::models::Transfer;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransferData {
    #[serde(default)]
    transfers: Vec<Transfer>,
}

/// Append-only repository for transfers
#[derive(Debug)]
pub struct TransferRepository {
    path: PathBuf,
    transfers: RwLock<Vec<Transfer>>,
}

impl TransferRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transfers: RwLock::new(Vec::new()),
        }
    }

    /// Load transfers from disk
    pub fn load(&self) -> PayplanResult<()> {
        let file_data: TransferData = read_json(&self.path)?;

        let mut transfers = self
            .transfers
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *transfers = file_data.transfers;

        Ok(())
    }

    /// Save transfers to disk
    pub fn save(&self) -> PayplanResult<()> {
        let transfers = self
            .transfers
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(
            &self.path,
            &TransferData {
                transfers: transfers.clone(),
            },
        )
    }

    /// Append a batch of transfers (callers follow with save)
    pub fn append_batch(&self, batch: Vec<Transfer>) -> PayplanResult<()> {
        let mut transfers = self
            .transfers
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        transfers.extend(batch);
        Ok(())
    }

    /// All transfers in chronological order
    pub fn get_all(&self) -> PayplanResult<Vec<Transfer>> {
        let transfers = self
            .transfers
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list = transfers.clone();
        list.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));
        Ok(list)
    }
}
