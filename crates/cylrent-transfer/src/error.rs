//! # Transfer Workflow Errors
//!
//! Every rejection the transfer workflow can raise before anything is
//! persisted. All variants are locally recoverable: the wizard state is
//! left untouched and the caller may correct the input and retry.
//!
//! Failures *during* commit are a different animal — they come from the
//! caller's store and are reported per command in the
//! [`crate::commit::CommitReport`], never as a `TransferError`.

use thiserror::Error;

use cylrent_core::{CylinderId, CylinderStatus, OutletId};

use crate::wizard::{TransferMode, WizardStep};

/// Rejections raised by the transfer wizard and eligibility gate.
#[derive(Error, Debug)]
pub enum TransferError {
    /// No transfer mode has been chosen yet.
    #[error("choose single or bulk transfer first")]
    ModeNotChosen,

    /// The operation belongs to the other transfer mode.
    #[error("operation requires {expected} transfer mode")]
    WrongMode {
        /// The mode the operation is valid in.
        expected: TransferMode,
    },

    /// The operation belongs to a different wizard step.
    #[error("step {found} cannot do this; expected step {expected}")]
    WrongStep {
        /// The step the operation is valid in.
        expected: WizardStep,
        /// The wizard's current step.
        found: WizardStep,
    },

    /// The wizard has already committed or been cancelled.
    #[error("transfer workflow is closed ({step})")]
    WorkflowClosed {
        /// The terminal step.
        step: WizardStep,
    },

    /// Forward from review happens through commit, not advance.
    #[error("review is complete; commit the transfer to proceed")]
    AwaitingCommit,

    /// A leased cylinder cannot be transferred.
    #[error("cannot transfer cylinder {cylinder_id}: it is out on lease")]
    CylinderLeased {
        /// The ineligible cylinder.
        cylinder_id: CylinderId,
    },

    /// A damaged cylinder cannot be transferred.
    #[error("cannot transfer cylinder {cylinder_id}: it is marked damaged")]
    CylinderDamaged {
        /// The ineligible cylinder.
        cylinder_id: CylinderId,
    },

    /// Any other non-available status blocks the transfer.
    #[error("cannot transfer cylinder {cylinder_id}: status is {status}")]
    CylinderUnavailable {
        /// The ineligible cylinder.
        cylinder_id: CylinderId,
        /// Its current status.
        status: CylinderStatus,
    },

    /// Single mode: no cylinder has been resolved yet.
    #[error("no cylinder selected")]
    NoCylinderSelected,

    /// Bulk mode: the source outlet has not been chosen.
    #[error("select a source outlet first")]
    MissingSourceOutlet,

    /// Bulk mode: the cylinder sits at a different outlet.
    #[error("cylinder {cylinder_id} is not at the selected source outlet {source_outlet_id}")]
    NotAtSourceOutlet {
        /// The rejected cylinder.
        cylinder_id: CylinderId,
        /// The chosen source outlet.
        source_outlet_id: OutletId,
    },

    /// Bulk mode: the cylinder is already in the selection.
    #[error("cylinder {cylinder_id} is already selected")]
    DuplicateCylinder {
        /// The duplicated cylinder.
        cylinder_id: CylinderId,
    },

    /// Bulk mode: at least one cylinder must be selected.
    #[error("select at least one cylinder")]
    EmptySelection,

    /// The destination outlet has not been chosen.
    #[error("select a destination outlet")]
    MissingDestination,

    /// Destination must differ from the source outlet.
    #[error("destination outlet {outlet_id} is the same as the source")]
    SameOutlet {
        /// The outlet appearing on both sides.
        outlet_id: OutletId,
    },

    /// The transfer reason has not been chosen.
    #[error("select a transfer reason")]
    MissingReason,

    /// Reason `other` demands a custom description.
    #[error("a custom reason is required when the reason is \"other\"")]
    MissingCustomReason,
}
