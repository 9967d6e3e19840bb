//! # Customer
//!
//! Identity data used for shipment confirmation lines. Immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A customer placing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    first_name: String,
    last_name: String,
}

impl Customer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Customer {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"{first} {last}"`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let customer = Customer::new("John", "Doe");
        assert_eq!(customer.first_name(), "John");
        assert_eq!(customer.last_name(), "Doe");
        assert_eq!(customer.full_name(), "John Doe");
        assert_eq!(customer.to_string(), "John Doe");
    }
}
