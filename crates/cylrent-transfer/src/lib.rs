//! # cylrent-transfer — Cylinder Transfer Orchestration
//!
//! Validates and drives cylinder transfers between outlets:
//!
//! - **Eligibility** (`eligibility.rs`): the status gate deciding whether
//!   a cylinder may enter a transfer, with distinct rejections for leased
//!   and damaged cylinders, and the available-at-source pool for bulk
//!   selection.
//!
//! - **Wizard** (`wizard.rs`): the guarded step sequence
//!   `SelectMode → SelectCylinders → SelectDestination → Review`, with a
//!   single and a bulk branch converging before commit. One guard per
//!   step; backward steps always allowed; no step skippable.
//!
//! - **Records** (`record.rs`): the validated [`TransferCommand`]
//!   instructions and immutable [`TransferRecord`] audit rows, with the
//!   destination-differs-from-source invariant enforced at construction.
//!
//! - **Commit** (`commit.rs`): the sequential, deliberately non-atomic
//!   execution loop over the caller's [`TransferStore`], producing a
//!   per-command [`CommitReport`] in which partial failure is an
//!   inspectable outcome, not an exception.
//!
//! ## Design
//!
//! The crate computes over caller-supplied snapshots and owns no
//! storage. Eligibility is checked at selection time; the commit seam is
//! where a store re-validates against concurrent workflows.

pub mod commit;
pub mod eligibility;
pub mod error;
pub mod record;
pub mod wizard;

// ─── Eligibility re-exports ─────────────────────────────────────────

pub use eligibility::{bulk_candidates, ensure_transferable};

// ─── Record re-exports ──────────────────────────────────────────────

pub use record::{TransferCommand, TransferReason, TransferRecord};

// ─── Wizard re-exports ──────────────────────────────────────────────

pub use wizard::{ReviewCylinder, TransferMode, TransferReview, TransferWizard, WizardStep};

// ─── Commit re-exports ──────────────────────────────────────────────

pub use commit::{execute_sequential, CommitError, CommitOutcome, CommitReport, TransferStore};

// ─── Error re-exports ───────────────────────────────────────────────

pub use error::TransferError;
