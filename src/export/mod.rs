//! Export module for payplan
//!
//! Complete data export in multiple formats:
//! - CSV: spreadsheet-compatible per-entity tables and schedules
//! - JSON: machine-readable full database export
//! - YAML: human-readable full database export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_debts_csv, export_envelopes_csv, export_schedule_csv, export_transfers_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
