//! Service layer for payplan
//!
//! Services bridge the pure engine and the storage layer: load a fresh
//! snapshot, run the engine, persist the result (batched and atomic where
//! a mutation spans entities), and audit-log what happened.

pub mod allocation;
pub mod debt;
pub mod payday;
pub mod rebalance;

pub use allocation::AllocationService;
pub use debt::DebtService;
pub use payday::PaydayService;
pub use rebalance::RebalanceService;
