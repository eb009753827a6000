//! Request principal
//!
//! Identifies who is performing an operation. Administrator-initiated
//! actions (promo setup, comped orders) are exempt from per-user promo
//! limits and are never recorded in the usage ledger, so the exemption is
//! a pattern match instead of a sentinel user id comparison.

use serde::{Deserialize, Serialize};

/// The acting party behind a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Principal {
    /// A regular customer, identified by user id
    Customer(String),
    /// An administrator acting on behalf of the platform
    Administrator,
}

impl Principal {
    /// Customer user id, if any
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Principal::Customer(id) => Some(id),
            Principal::Administrator => None,
        }
    }

    /// Whether this principal bypasses per-user promo limits
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_user_id() {
        let p = Principal::Customer("user:alice".to_string());
        assert_eq!(p.user_id(), Some("user:alice"));
        assert!(!p.is_admin());
    }

    #[test]
    fn test_administrator() {
        let p = Principal::Administrator;
        assert_eq!(p.user_id(), None);
        assert!(p.is_admin());
    }

    #[test]
    fn test_serialize() {
        let p = Principal::Customer("user:alice".to_string());
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("CUSTOMER"));

        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
