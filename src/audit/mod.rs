//! Append-only audit logging
//!
//! Every mutating operation (entity create/update, budget commit, payment
//! application, rebalance execution) writes one JSON-line entry.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
