//! JSON export functionality
//!
//! Machine-readable full database export, versioned for forward
//! compatibility.

use std::io::Write;

use serde::Serialize;

use crate::error::{PayplanError, PayplanResult};
use crate::models::{DebtItem, Envelope, IncomeSource, PayoffProjection, Transfer};
use crate::storage::Storage;

/// Schema version written into every export
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Complete budget export
#[derive(Debug, Serialize)]
pub struct FullExport {
    pub schema_version: u32,
    pub exported_at: chrono::DateTime<chrono::Utc>,
    pub envelopes: Vec<Envelope>,
    pub income_sources: Vec<IncomeSource>,
    pub debts: Vec<DebtItem>,
    pub transfers: Vec<Transfer>,
    pub projections: Vec<PayoffProjection>,
}

impl FullExport {
    /// Snapshot the full budget from storage
    pub fn from_storage(storage: &Storage) -> PayplanResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now(),
            envelopes: storage.envelopes.get_all()?,
            income_sources: storage.incomes.get_all()?,
            debts: storage.debts.get_all()?,
            transfers: storage.transfers.get_all()?,
            projections: storage.projections.get_all()?,
        })
    }
}

/// Export the full budget as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> PayplanResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}
