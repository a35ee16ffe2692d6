//! Storage layer for payplan
//!
//! JSON file storage with atomic writes. One repository per entity; the
//! `Storage` coordinator owns them all plus the audit logger. Engines never
//! see this module - services read snapshots out of it, run the engine, and
//! persist the results back through batch operations.

pub mod debts;
pub mod envelopes;
pub mod file_io;
pub mod incomes;
pub mod init;
pub mod projections;
pub mod transfers;

pub use debts::DebtRepository;
pub use envelopes::EnvelopeRepository;
pub use file_io::{read_json, write_json_atomic};
pub use incomes::IncomeRepository;
pub use init::initialize_storage;
pub use projections::ProjectionRepository;
pub use transfers::TransferRepository;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PayplanPaths;
use crate::error::PayplanError;
use serde::Serialize;

/// Main storage coordinator that provides access to all repositories
#[derive(Debug)]
pub struct Storage {
    paths: PayplanPaths,
    pub envelopes: EnvelopeRepository,
    pub incomes: IncomeRepository,
    pub debts: DebtRepository,
    pub transfers: TransferRepository,
    pub projections: ProjectionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PayplanPaths) -> Result<Self, PayplanError> {
        paths.ensure_directories()?;

        Ok(Self {
            envelopes: EnvelopeRepository::new(paths.envelopes_file()),
            incomes: IncomeRepository::new(paths.incomes_file()),
            debts: DebtRepository::new(paths.debts_file()),
            transfers: TransferRepository::new(paths.transfers_file()),
            projections: ProjectionRepository::new(paths.projections_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PayplanPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PayplanError> {
        self.envelopes.load()?;
        self.incomes.load()?;
        self.debts.load()?;
        self.transfers.load()?;
        self.projections.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PayplanError> {
        self.envelopes.save()?;
        self.incomes.save()?;
        self.debts.save()?;
        self.transfers.save()?;
        self.projections.save()?;
        Ok(())
    }

    /// Audit an entity creation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PayplanError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Audit an entity update
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
        summary: impl Into<String>,
    ) -> Result<(), PayplanError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            entity,
            summary,
        ))
    }

    /// Audit a batch mutation applied as one unit
    pub fn log_batch(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<(), PayplanError> {
        self.audit
            .log(&AuditEntry::batch(entity_type, entity_id, summary))
    }

    /// Read the audit trail, oldest first
    pub fn audit_trail(&self) -> Result<Vec<AuditEntry>, PayplanError> {
        self.audit.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_audit_through_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_batch(EntityType::Budget, "commit", "budget committed")
            .unwrap();

        let trail = storage.audit_trail().unwrap();
        assert_eq!(trail.len(), 1);
    }
}
