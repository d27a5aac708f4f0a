//! # cylrent-lease — Lease Lifecycle and Return Settlement
//!
//! Implements the lease side of the CylRent domain core:
//!
//! - **Lease record** (`lease.rs`): the stored lease snapshot with its
//!   two persisted statuses (`active`, `returned`) and the invariants
//!   tying the return fields to the returned state.
//!
//! - **Status resolution** (`status.rs`): the derived
//!   `Active`/`Overdue`/`Returned` status, computed from the record and an
//!   explicit reference clock on every read. `Overdue` is never stored —
//!   there is no background job flipping statuses, and no stale-status
//!   window.
//!
//! - **Settlement** (`settlement.rs`): the return-time refund computation.
//!   Assessment produces a [`SettlementQuote`] (condition factor, late
//!   fee, cap, zero floor); an operator decision — optionally overriding
//!   the refund within `[0, deposit]` — finalizes it into a
//!   [`ReturnCommit`] instruction the caller applies to storage.
//!
//! ## Design
//!
//! Everything here is a pure computation over caller-supplied records.
//! Reading a lease, persisting the return, and flipping the cylinder back
//! to `available` are the caller's side of the contract; this crate only
//! decides.

pub mod lease;
pub mod settlement;
pub mod status;

// ─── Lease re-exports ───────────────────────────────────────────────

pub use lease::{Lease, LeaseRawStatus, LeaseRecordError};

// ─── Status re-exports ──────────────────────────────────────────────

pub use status::{resolve, LeaseStatus};

// ─── Settlement re-exports ──────────────────────────────────────────

pub use settlement::{
    assess, ReturnCommit, ReturnCondition, ReturnDecision, SettlementError, SettlementQuote,
    LATE_FEE_PER_DAY,
};
