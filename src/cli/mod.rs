//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. One subcommand
//! enum and handler per feature area.

pub mod allocate;
pub mod debt;
pub mod envelope;
pub mod export;
pub mod income;
pub mod payday;
pub mod rebalance;

pub use allocate::{handle_allocate_command, AllocateCommands};
pub use debt::{handle_debt_command, DebtCommands};
pub use envelope::{handle_envelope_command, EnvelopeCommands};
pub use export::{handle_export_command, ExportCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use payday::handle_payday_command;
pub use rebalance::{handle_rebalance_command, RebalanceCommands};
