//! # Lease Record
//!
//! The stored lease snapshot and its integrity rules.
//!
//! A lease is created `active` with no return fields, and is mutated
//! exactly once — at return time, by the caller applying a
//! [`crate::settlement::ReturnCommit`] — into the terminal `returned`
//! state. Only those two statuses are ever persisted; the third
//! user-facing status (`overdue`) is derived on read by
//! [`crate::status::resolve`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cylrent_core::{Amount, CustomerId, CylinderId, LeaseId, OutletId, StaffId, Timestamp};

use crate::settlement::ReturnCondition;
use crate::status::{resolve, LeaseStatus};

// ─── Stored Status ───────────────────────────────────────────────────

/// The persisted lease status. Exactly two values are ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseRawStatus {
    /// Cylinder is out with the customer.
    Active,
    /// Cylinder has come back; the lease is settled and terminal.
    Returned,
}

impl std::fmt::Display for LeaseRawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Returned => "RETURNED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Integrity violations in a stored lease record.
#[derive(Error, Debug)]
pub enum LeaseRecordError {
    /// Return fields present on a lease that is still active.
    #[error("lease {lease_id} is active but carries return fields")]
    ReturnFieldsOnActiveLease {
        /// The malformed lease.
        lease_id: LeaseId,
    },

    /// A returned lease is missing its return fields.
    #[error("lease {lease_id} is returned but missing {field}")]
    MissingReturnField {
        /// The malformed lease.
        lease_id: LeaseId,
        /// The absent field.
        field: &'static str,
    },

    /// Recorded refund exceeds the deposit that bounds it.
    #[error("lease {lease_id} records refund {refund} above deposit {deposit}")]
    RefundExceedsDeposit {
        /// The malformed lease.
        lease_id: LeaseId,
        /// Recorded refund.
        refund: Amount,
        /// Deposit bound.
        deposit: Amount,
    },

    /// A monetary field is negative.
    #[error("lease {lease_id} has negative {field}")]
    NegativeAmount {
        /// The malformed lease.
        lease_id: LeaseId,
        /// The offending field.
        field: &'static str,
    },
}

// ─── Lease ───────────────────────────────────────────────────────────

/// A lease as read from the caller's store.
///
/// At most one lease may be `active` per cylinder at a time; that
/// exclusivity is enforced by the store, not by this snapshot type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    /// Unique lease identifier.
    pub id: LeaseId,
    /// The customer holding the cylinder.
    pub customer_id: CustomerId,
    /// The leased cylinder.
    pub cylinder_id: CylinderId,
    /// The outlet that issued the lease.
    pub outlet_id: OutletId,
    /// The staff member who issued the lease.
    pub staff_id: StaffId,
    /// When the lease began.
    pub lease_date: Timestamp,
    /// Agreed return deadline. Absent for open-ended leases, which can
    /// never become overdue.
    pub expected_return_date: Option<Timestamp>,
    /// When the cylinder actually came back. Set iff returned.
    pub actual_return_date: Option<Timestamp>,
    /// Rental charge.
    pub lease_amount: Amount,
    /// Deposit held against the cylinder; the refund is bounded by it.
    pub deposit_amount: Amount,
    /// Refund paid out at return. Set iff returned.
    pub refund_amount: Option<Amount>,
    /// The persisted status.
    pub raw_status: LeaseRawStatus,
    /// Assessed condition of the returned cylinder. Set only on return.
    pub return_condition: Option<ReturnCondition>,
    /// The staff member who processed the return.
    pub return_staff_id: Option<StaffId>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl Lease {
    /// Open a new lease: `active`, no return fields.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        customer_id: CustomerId,
        cylinder_id: CylinderId,
        outlet_id: OutletId,
        staff_id: StaffId,
        lease_date: Timestamp,
        expected_return_date: Option<Timestamp>,
        lease_amount: Amount,
        deposit_amount: Amount,
    ) -> Self {
        Self {
            id: LeaseId::new(),
            customer_id,
            cylinder_id,
            outlet_id,
            staff_id,
            lease_date,
            expected_return_date,
            actual_return_date: None,
            lease_amount,
            deposit_amount,
            refund_amount: None,
            raw_status: LeaseRawStatus::Active,
            return_condition: None,
            return_staff_id: None,
            notes: None,
        }
    }

    /// Whether the stored status is terminal.
    pub fn is_returned(&self) -> bool {
        self.raw_status == LeaseRawStatus::Returned
    }

    /// The effective status at the given reference time.
    ///
    /// Convenience for [`crate::status::resolve`].
    pub fn status_at(&self, now: Timestamp) -> LeaseStatus {
        resolve(self, now)
    }

    /// Validate the record's integrity rules.
    ///
    /// - return fields (`actual_return_date`, `refund_amount`) are set
    ///   iff `raw_status = returned`, and `return_condition` only then;
    /// - `refund_amount <= deposit_amount`;
    /// - no monetary field is negative.
    pub fn check_invariants(&self) -> Result<(), LeaseRecordError> {
        if self.lease_amount.is_negative() {
            return Err(LeaseRecordError::NegativeAmount {
                lease_id: self.id,
                field: "lease_amount",
            });
        }
        if self.deposit_amount.is_negative() {
            return Err(LeaseRecordError::NegativeAmount {
                lease_id: self.id,
                field: "deposit_amount",
            });
        }

        match self.raw_status {
            LeaseRawStatus::Active => {
                if self.actual_return_date.is_some()
                    || self.refund_amount.is_some()
                    || self.return_condition.is_some()
                {
                    return Err(LeaseRecordError::ReturnFieldsOnActiveLease {
                        lease_id: self.id,
                    });
                }
            }
            LeaseRawStatus::Returned => {
                if self.actual_return_date.is_none() {
                    return Err(LeaseRecordError::MissingReturnField {
                        lease_id: self.id,
                        field: "actual_return_date",
                    });
                }
                let refund = self.refund_amount.ok_or(LeaseRecordError::MissingReturnField {
                    lease_id: self.id,
                    field: "refund_amount",
                })?;
                if refund.is_negative() {
                    return Err(LeaseRecordError::NegativeAmount {
                        lease_id: self.id,
                        field: "refund_amount",
                    });
                }
                if refund > self.deposit_amount {
                    return Err(LeaseRecordError::RefundExceedsDeposit {
                        lease_id: self.id,
                        refund,
                        deposit: self.deposit_amount,
                    });
                }
            }
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
