//! Payoff projection repository
//!
//! Enforces the one-active-projection-per-debt rule: inserting a new
//! projection flips any prior active record for the same debt to inactive.
//! History is kept, never deleted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{DebtId, PayoffProjection, ProjectionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProjectionData {
    #[serde(default)]
    projections: Vec<PayoffProjection>,
}

/// Repository for payoff projections
#[derive(Debug)]
pub struct ProjectionRepository {
    path: PathBuf,
    projections: RwLock<HashMap<ProjectionId, PayoffProjection>>,
}

impl ProjectionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            projections: RwLock::new(HashMap::new()),
        }
    }

    /// Load projections from disk
    pub fn load(&self) -> PayplanResult<()> {
        let file_data: ProjectionData = read_json(&self.path)?;

        let mut projections = self
            .projections
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        projections.clear();
        for projection in file_data.projections {
            projections.insert(projection.id, projection);
        }

        Ok(())
    }

    /// Save projections to disk
    pub fn save(&self) -> PayplanResult<()> {
        let projections = self
            .projections
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = projections.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &ProjectionData { projections: list })
    }

    /// The active projection for a debt, if any
    pub fn active_for_debt(&self, debt_id: DebtId) -> PayplanResult<Option<PayoffProjection>> {
        let projections = self
            .projections
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(projections
            .values()
            .find(|p| p.debt_id == debt_id && p.is_active)
            .cloned())
    }

    /// All projections for a debt, newest first
    pub fn history_for_debt(&self, debt_id: DebtId) -> PayplanResult<Vec<PayoffProjection>> {
        let projections = self
            .projections
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = projections
            .values()
            .filter(|p| p.debt_id == debt_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// All projections, oldest first
    pub fn get_all(&self) -> PayplanResult<Vec<PayoffProjection>> {
        let projections = self
            .projections
            .read()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = projections.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// Insert a new active projection, superseding any prior active record
    /// for the same debt
    pub fn supersede_and_insert(&self, projection: PayoffProjection) -> PayplanResult<()> {
        let mut projections = self
            .projections
            .write()
            .map_err(|e| PayplanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for existing in projections.values_mut() {
            if existing.debt_id == projection.debt_id && existing.is_active {
                existing.supersede();
            }
        }
        projections.insert(projection.id, projection);

        drop(projections);
        self.save()
    }
}
