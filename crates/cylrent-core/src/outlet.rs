//! Outlet reference data.

use serde::{Deserialize, Serialize};

use crate::identity::OutletId;

/// A branch location. Read-only reference data to the domain engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlet {
    /// Unique outlet identifier.
    pub id: OutletId,
    /// Display name (e.g. `"North Depot"`).
    pub name: String,
    /// Street address or locality description.
    pub location: String,
}
