//! # Derived Lease Status
//!
//! Resolves the effective status of a lease — `Active`, `Overdue`, or
//! `Returned` — from the stored record and an explicit reference clock.
//!
//! ## Derived, Never Stored
//!
//! `Overdue` is recomputed on every read. Persisting it would require a
//! background job to flip stored statuses as deadlines pass, and any gap
//! in that job would show stale statuses. Instead, only `active` and
//! `returned` are stored, and every consumer resolves through this
//! module. A consumer that reads `raw_status` directly will under-report
//! overdue leases.
//!
//! The clock is a parameter, never an ambient `now()` — the same record
//! resolves identically for the same reference time.

use serde::{Deserialize, Serialize};

use cylrent_core::Timestamp;

use crate::lease::{Lease, LeaseRawStatus};

/// The effective status of a lease at a reference time.
///
/// This is a read model: it is computed by [`resolve`] and returned to
/// callers for display and filtering, never written back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    /// Lease is open and within its deadline (or has none).
    Active,
    /// Lease is open and past its agreed return deadline.
    Overdue,
    /// Lease is settled (terminal).
    Returned,
}

impl LeaseStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Returned)
    }

    /// Whether the lease is still open (active or overdue).
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Overdue => "OVERDUE",
            Self::Returned => "RETURNED",
        };
        f.write_str(s)
    }
}

/// Resolve the effective status of a lease at `now`.
///
/// Rules, evaluated in order:
///
/// 1. A returned lease is `Returned`, regardless of its dates. Terminal.
/// 2. A lease with no `expected_return_date` is `Active` — open-ended
///    leases cannot become overdue.
/// 3. Past the deadline (`now > expected_return_date`) it is `Overdue`.
/// 4. Otherwise it is `Active`.
///
/// Total over well-formed records; no side effects.
pub fn resolve(lease: &Lease, now: Timestamp) -> LeaseStatus {
    if lease.raw_status == LeaseRawStatus::Returned {
        return LeaseStatus::Returned;
    }
    match lease.expected_return_date {
        None => LeaseStatus::Active,
        Some(deadline) if now > deadline => LeaseStatus::Overdue,
        Some(_) => LeaseStatus::Active,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
