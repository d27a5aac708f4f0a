//! # Transfer Eligibility Gate
//!
//! The status check deciding whether a cylinder may enter a transfer
//! workflow. Only `available` passes. Leased and damaged cylinders get
//! their own rejections — staff see those two constantly and the message
//! must say which it is — while refilling, maintenance, and retired
//! cylinders share a status-carrying rejection.
//!
//! Eligibility is checked at **selection time** against the supplied
//! snapshot. It is not re-checked by the core at commit time; a store
//! that wants protection against a concurrent workflow winning the
//! cylinder re-validates inside
//! [`crate::commit::TransferStore::apply_transfer`].

use cylrent_core::{Cylinder, CylinderStatus, OutletId};

use crate::error::TransferError;

/// Gate a cylinder for transfer.
///
/// # Errors
///
/// - [`TransferError::CylinderLeased`] — out with a customer.
/// - [`TransferError::CylinderDamaged`] — marked damaged.
/// - [`TransferError::CylinderUnavailable`] — any other non-available
///   status (refilling, maintenance, retired).
pub fn ensure_transferable(cylinder: &Cylinder) -> Result<(), TransferError> {
    match cylinder.status {
        CylinderStatus::Available => Ok(()),
        CylinderStatus::Leased => Err(TransferError::CylinderLeased {
            cylinder_id: cylinder.id,
        }),
        CylinderStatus::Damaged => Err(TransferError::CylinderDamaged {
            cylinder_id: cylinder.id,
        }),
        status => Err(TransferError::CylinderUnavailable {
            cylinder_id: cylinder.id,
            status,
        }),
    }
}

/// The pool a bulk selection may draw from: cylinders currently at
/// `source` with status `available`, in input order.
pub fn bulk_candidates(source: OutletId, cylinders: &[Cylinder]) -> Vec<&Cylinder> {
    cylinders
        .iter()
        .filter(|c| c.current_outlet_id == source && c.is_available())
        .collect()
}
