//! Newtype IDs for type-safe identifiers.
//!
//! Keeps pizza type ids and order ids from being swapped for one another or
//! for free-form strings such as names.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Catalog identifier of a pizza type (e.g. `"pepperoni"`).
    PizzaId
);
define_id!(
    /// Backend identifier of a placed order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = PizzaId::new("pepperoni");
        assert_eq!(id.as_str(), "pepperoni");
    }

    #[test]
    fn test_id_from_str() {
        let id: OrderId = "42".into();
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = PizzaId::new("veggie");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""veggie""#);

        let parsed: PizzaId = serde_json::from_str(r#""hawaiian""#).unwrap();
        assert_eq!(parsed, PizzaId::new("hawaiian"));
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(PizzaId::new("same"), PizzaId::new("same"));
        assert_ne!(PizzaId::new("same"), PizzaId::new("different"));
    }
}
