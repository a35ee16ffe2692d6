//! Core data models for payplan
//!
//! This module contains the data structures of the budgeting domain:
//! envelopes, income sources, debts, payoff projections and transfers.

pub mod debt;
pub mod envelope;
pub mod frequency;
pub mod ids;
pub mod income;
pub mod money;
pub mod projection;
pub mod transfer;

pub use debt::DebtItem;
pub use envelope::{Envelope, Priority};
pub use frequency::{Frequency, PayCycle};
pub use ids::{DebtId, EnvelopeId, IncomeSourceId, ProjectionId, TransferId};
pub use income::IncomeSource;
pub use money::Money;
pub use projection::PayoffProjection;
pub use transfer::Transfer;
