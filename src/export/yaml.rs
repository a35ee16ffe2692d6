//! YAML export functionality
//!
//! Human-readable full database export; same shape as the JSON export.

use std::io::Write;

use crate::error::{PayplanError, PayplanResult};
use crate::storage::Storage;

use super::json::FullExport;

/// Export the full budget as YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> PayplanResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_yaml::to_writer(writer, &export).map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}
