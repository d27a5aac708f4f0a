//! # Domain Identity Newtypes
//!
//! Newtype wrappers for every identifier in the rental domain. These
//! prevent identifier confusion — a [`CylinderId`] cannot be passed where
//! an [`OutletId`] is expected, and a transfer can never be filed against
//! a customer id.
//!
//! Identifiers are UUIDv4 underneath. The `Display` form carries an entity
//! prefix (`lease:…`, `cyl:…`) so log lines and error messages identify
//! the namespace without extra context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaseId(pub Uuid);

/// Unique identifier for a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

/// Unique identifier for a gas cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CylinderId(pub Uuid);

/// Unique identifier for an outlet (branch location).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutletId(pub Uuid);

/// Unique identifier for a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub Uuid);

/// Unique identifier for a cylinder transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(pub Uuid);

macro_rules! impl_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

impl_id!(LeaseId, "lease");
impl_id!(CustomerId, "customer");
impl_id!(CylinderId, "cyl");
impl_id!(OutletId, "outlet");
impl_id!(StaffId, "staff");
impl_id!(TransferId, "transfer");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(LeaseId::new(), LeaseId::new());
        assert_ne!(CylinderId::new(), CylinderId::new());
    }

    #[test]
    fn test_display_carries_namespace_prefix() {
        let id = CylinderId::new();
        assert!(id.to_string().starts_with("cyl:"));
        let id = OutletId::new();
        assert!(id.to_string().starts_with("outlet:"));
        let id = TransferId::new();
        assert!(id.to_string().starts_with("transfer:"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = LeaseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: LeaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
