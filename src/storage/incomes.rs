//! Income source repository

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{IncomeSource, IncomeSourceId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    sources: Vec<IncomeSource>,
}

/// Repository for income sources
#[derive(Debug)]
pub struct IncomeRepository {
    path: PathBuf,
    sources: RwLock<HashMap<IncomeSourceId, IncomeSource>>,
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            sources: RwLock::new(HashMap::new()),
        }
    }

    /// Load sources from disk
    pub fn load(&self) -> PayplanResult<()> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut sources = self
            .sources
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        sources.clear();
        for source in file_data.sources {
            sources.insert(source.id, source);
        }

        Ok(())
    }

    /// Save sources to disk
    pub fn save(&self) -> PayplanResult<()> {
        let sources = self
            .sources
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &IncomeData { sources: list })
    }

    pub fn get(&self, id: IncomeSourceId) -> PayplanResult<Option<IncomeSource>> {
        let sources = self
            .sources
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(sources.get(&id).cloned())
    }

    /// Find a source by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> PayplanResult<Option<IncomeSource>> {
        let sources = self
            .sources
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(sources
            .values()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// All sources in creation order
    pub fn get_all(&self) -> PayplanResult<Vec<IncomeSource>> {
        let sources = self
            .sources
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// All active sources in creation order
    pub fn get_active(&self) -> PayplanResult<Vec<IncomeSource>> {
        Ok(self.get_all()?.into_iter().filter(|s| s.active).collect())
    }

    pub fn upsert(&self, source: IncomeSource) -> PayplanResult<()> {
        let mut sources = self
            .sources
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        sources.insert(source.id, source);
        Ok(())
    }
}
