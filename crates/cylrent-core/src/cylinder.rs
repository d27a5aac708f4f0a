//! # Cylinder Snapshot
//!
//! The caller-supplied read of a gas cylinder: identity, physical class,
//! operational status, current custody, and fill level. The domain
//! engines treat it as an immutable snapshot — eligibility gates and
//! transfer commands read it, the caller's store mutates the real record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{CylinderId, OutletId};
use crate::temporal::Timestamp;

/// The operational status of a cylinder.
///
/// `available` is the only status from which a cylinder can be leased or
/// transferred; every other status parks it at its current outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CylinderStatus {
    /// In stock at an outlet, ready to lease or transfer.
    Available,
    /// Out with a customer under an active lease.
    Leased,
    /// At a refill station being recharged.
    Refilling,
    /// Undergoing scheduled maintenance.
    Maintenance,
    /// Damaged and awaiting assessment or repair.
    Damaged,
    /// Permanently removed from service.
    Retired,
}

impl CylinderStatus {
    /// Whether the cylinder can enter a lease or transfer workflow.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for CylinderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "AVAILABLE",
            Self::Leased => "LEASED",
            Self::Refilling => "REFILLING",
            Self::Maintenance => "MAINTENANCE",
            Self::Damaged => "DAMAGED",
            Self::Retired => "RETIRED",
        };
        f.write_str(s)
    }
}

/// Snapshot record malformation.
#[derive(Error, Debug)]
pub enum CylinderSnapshotError {
    /// Recorded gas volume exceeds the cylinder's capacity.
    #[error("cylinder {cylinder_id} reports {current_l}L of gas but holds at most {max_l}L")]
    VolumeExceedsCapacity {
        /// The malformed cylinder.
        cylinder_id: CylinderId,
        /// Recorded current volume, litres.
        current_l: u32,
        /// Recorded capacity, litres.
        max_l: u32,
    },
}

/// A gas cylinder as read from the caller's store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cylinder {
    /// Unique cylinder identifier.
    pub id: CylinderId,
    /// Human-readable asset tag (e.g. `CYL-00142`).
    pub code: String,
    /// QR payload printed on the cylinder, if labelled.
    pub qr_code: Option<String>,
    /// Capacity class label (e.g. `"13kg"`, `"45kg"`).
    pub capacity_class: String,
    /// Current operational status.
    pub status: CylinderStatus,
    /// The outlet currently holding custody. A cylinder has exactly one
    /// current outlet at any time.
    pub current_outlet_id: OutletId,
    /// Current gas volume, litres.
    pub current_gas_volume: u32,
    /// Maximum gas volume, litres.
    pub max_gas_volume: u32,
    /// When the cylinder was last inspected, if ever.
    pub last_inspection_date: Option<Timestamp>,
}

impl Cylinder {
    /// Whether the cylinder can enter a lease or transfer workflow.
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Validate the snapshot's internal consistency.
    pub fn check_invariants(&self) -> Result<(), CylinderSnapshotError> {
        if self.current_gas_volume > self.max_gas_volume {
            return Err(CylinderSnapshotError::VolumeExceedsCapacity {
                cylinder_id: self.id,
                current_l: self.current_gas_volume,
                max_l: self.max_gas_volume,
            });
        }
        Ok(())
    }
}
