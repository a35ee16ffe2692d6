//! Custom error types for payplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Engine validation failures get their own
//! variants so callers can match on them; partial-success outcomes (a residual
//! payment, an infeasible rebalance) are returned as data, never as errors.

use thiserror::Error;

use crate::models::Money;

/// The main error type for payplan operations
#[derive(Error, Debug)]
pub enum PayplanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and engine inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A frequency with no annualization factor was used in a conversion
    #[error("Invalid frequency for conversion: {0}")]
    InvalidFrequency(String),

    /// A payment amount that is zero or negative
    #[error("Invalid payment amount: {0} (must be positive)")]
    InvalidPaymentAmount(Money),

    /// An income source whose allocations do not sum to its amount at commit
    #[error("Unbalanced allocation for income source '{source_name}': {remaining} unassigned")]
    UnbalancedAllocation { source_name: String, remaining: Money },

    /// An amortization payment that does not cover the first month's interest
    #[error("Payment too low: {payment} does not cover monthly interest of {interest}")]
    PaymentTooLow { payment: Money, interest: Money },

    /// An amortization projection that exceeded the iteration cap
    #[error("Payoff projection did not converge within {months} months")]
    ProjectionDivergent { months: u32 },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PayplanError {
    /// Create a "not found" error for envelopes
    pub fn envelope_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Envelope",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income sources
    pub fn income_source_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income source",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for debts
    pub fn debt_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Debt",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including the engine-specific kinds)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidFrequency(_)
                | Self::InvalidPaymentAmount(_)
                | Self::UnbalancedAllocation { .. }
                | Self::PaymentTooLow { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PayplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PayplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for payplan operations
pub type PayplanResult<T> = Result<T, PayplanError>;
