//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(PortfolioId, "Unique identifier for a portfolio.");
define_id!(UserId, "Identity of the user that owns a portfolio.");
define_id!(
    HoldingId,
    "Unique identifier for a stock or option holding row."
);
define_id!(RolloverId, "Unique identifier for a rollover ledger entry.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_id_new_and_display() {
        let id = PortfolioId::new("pf-123");
        assert_eq!(id.as_str(), "pf-123");
        assert_eq!(format!("{id}"), "pf-123");
    }

    #[test]
    fn holding_id_generate_is_unique() {
        let id1 = HoldingId::generate();
        let id2 = HoldingId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn user_id_from_string() {
        let id: UserId = "user-1".into();
        assert_eq!(id.as_str(), "user-1");

        let id: UserId = String::from("user-2").into();
        assert_eq!(id.as_str(), "user-2");
    }

    #[test]
    fn rollover_id_serde_is_transparent() {
        let id = RolloverId::new("roll-9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"roll-9\"");
    }
}
