//! Display formatting for terminal output
//!
//! Table rendering for list views; detail views print plain blocks from
//! the CLI handlers.

pub mod debt;
pub mod envelope;

pub use debt::{format_debt_list, format_schedule};
pub use envelope::{format_envelope_list, format_source_totals};
