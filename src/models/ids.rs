//! Strongly-typed ID wrappers for all entity types
//!
//! Newtype wrappers prevent accidentally mixing up IDs from different entity
//! types at compile time. IDs are ordered so that engine components can use
//! them as a stable, deterministic tie-break when sorting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Try to parse the full UUID
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                // Try stripping common prefixes
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(EnvelopeId, "env-");
define_id!(IncomeSourceId, "src-");
define_id!(DebtId, "debt-");
define_id!(TransferId, "tfr-");
define_id!(ProjectionId, "proj-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_id_creation() {
        let id = EnvelopeId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = DebtId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("debt-"));
        assert_eq!(display.len(), 13); // "debt-" + 8 chars
    }

    #[test]
    fn test_id_equality() {
        let id1 = EnvelopeId::new();
        let id2 = id1;
        assert_eq!(id1, id2);

        let id3 = EnvelopeId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_ordering_is_total() {
        let mut ids = vec![DebtId::new(), DebtId::new(), DebtId::new()];
        ids.sort();
        assert!(ids[0] <= ids[1] && ids[1] <= ids[2]);
    }

    #[test]
    fn test_id_serialization() {
        let id = IncomeSourceId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: IncomeSourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = EnvelopeId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_from_str_strips_prefix() {
        let id = TransferId::new();
        let full = id.as_uuid().to_string();
        let parsed: TransferId = full.parse().unwrap();
        assert_eq!(id, parsed);
    }
}
