//! # Return Settlement
//!
//! Computes the refund due when a leased cylinder comes back.
//!
//! ## Flow
//!
//! ```text
//! assess(lease, condition, now) ──▶ SettlementQuote (the computed default)
//!                                        │
//!                                        ▼
//!                    finalize(ReturnDecision { override?, notes })
//!                                        │
//!                                        ▼
//!                                  ReturnCommit ──▶ applied by the caller
//! ```
//!
//! ## Refund Rule
//!
//! 1. Condition factor: good 100%, needs-inspection 75%, damaged 50% of
//!    the deposit.
//! 2. If the return is late, a per-day fee accrues
//!    ([`LATE_FEE_PER_DAY`]), capped at half the condition-adjusted base;
//!    days are counted with a ceiling (one second late is one day).
//! 3. The refund is the base minus the fee, floored at zero — the result
//!    always lies in `[0, deposit]`.
//!
//! The quote is a **default**, not a binding result: an operator may
//! override the refund anywhere in `[0, deposit]` at decision time.
//!
//! ## Clock Capture
//!
//! The reference clock is fixed when assessment begins and carried in the
//! quote; finalization does not re-read time. A return assessed at 11:59
//! and confirmed at 12:01 settles against the 11:59 clock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cylrent_core::{Amount, LeaseId, Timestamp};

use crate::lease::Lease;
use crate::status::{resolve, LeaseStatus};

/// Late fee accrued per day past the agreed return date.
pub const LATE_FEE_PER_DAY: Amount = Amount::from_minor(5_000); // 50.00

/// The late fee never exceeds this share of the condition-adjusted base.
const LATE_FEE_CAP_PERCENT: u32 = 50;

// ─── Return Condition ────────────────────────────────────────────────

/// Assessed physical state of a returned cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCondition {
    /// No visible damage; full deposit base.
    Good,
    /// Visible damage; half the deposit base.
    Damaged,
    /// Uncertain state pending inspection; three quarters of the base.
    NeedsInspection,
}

impl ReturnCondition {
    /// Share of the deposit forming the refund base, in percent.
    pub fn refund_percent(&self) -> u32 {
        match self {
            Self::Good => 100,
            Self::Damaged => 50,
            Self::NeedsInspection => 75,
        }
    }

    /// Whether a settlement in this condition requires damage notes.
    pub fn requires_damage_notes(&self) -> bool {
        !matches!(self, Self::Good)
    }
}

impl std::fmt::Display for ReturnCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "GOOD",
            Self::Damaged => "DAMAGED",
            Self::NeedsInspection => "NEEDS_INSPECTION",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ReturnCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "damaged" => Ok(Self::Damaged),
            "needs_inspection" => Ok(Self::NeedsInspection),
            other => Err(format!(
                "unknown return condition {other:?} (expected good, damaged, or needs_inspection)"
            )),
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Rejections raised while settling a return.
#[derive(Error, Debug)]
pub enum SettlementError {
    /// The lease is already settled; a second return cannot be assessed.
    #[error("lease {lease_id} is already returned and cannot be settled again")]
    AlreadyReturned {
        /// The terminal lease.
        lease_id: LeaseId,
    },

    /// Operator override outside the permitted window.
    #[error("refund override {offered} is outside [0.00, {deposit}]")]
    OverrideOutOfRange {
        /// The rejected override.
        offered: Amount,
        /// The deposit bounding the window.
        deposit: Amount,
    },

    /// Damage notes are mandatory for any condition other than good.
    #[error("damage notes are required when the return condition is {condition}")]
    MissingDamageNotes {
        /// The condition requiring notes.
        condition: ReturnCondition,
    },
}

// ─── Quote ───────────────────────────────────────────────────────────

/// The computed settlement default for one return, before the operator's
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementQuote {
    /// The lease being settled.
    pub lease_id: LeaseId,
    /// Deposit held; bounds every refund, computed or overridden.
    pub deposit: Amount,
    /// Assessed cylinder condition.
    pub condition: ReturnCondition,
    /// The reference clock captured when assessment began.
    pub assessed_at: Timestamp,
    /// Whole or partial days past the deadline at `assessed_at`.
    pub days_late: i64,
    /// Deposit after the condition factor.
    pub base_refund: Amount,
    /// Late fee deducted (already capped).
    pub late_fee: Amount,
    /// The computed refund default, in `[0, deposit]`.
    pub refund: Amount,
}

/// The operator's decision applied to a quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnDecision {
    /// Replace the computed refund. Must lie in `[0, deposit]`.
    pub refund_override: Option<Amount>,
    /// Description of the damage; required unless the condition is good.
    pub damage_notes: Option<String>,
    /// Free-form return notes.
    pub notes: Option<String>,
}

/// The commit instruction the caller applies to storage: set the lease
/// `returned` with these fields, and set the cylinder `available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnCommit {
    /// The lease to close.
    pub lease_id: LeaseId,
    /// Final refund to pay out.
    pub refund_amount: Amount,
    /// Assessed condition to record.
    pub condition: ReturnCondition,
    /// Damage description, when the condition demanded one.
    pub damage_notes: Option<String>,
    /// Free-form return notes.
    pub notes: Option<String>,
    /// Becomes the lease's `actual_return_date`.
    pub returned_at: Timestamp,
}

// ─── Assessment ──────────────────────────────────────────────────────

/// Assess a return and compute the refund default.
///
/// # Errors
///
/// [`SettlementError::AlreadyReturned`] when the lease does not resolve
/// to an open status at `now`. No other failure: the computation itself
/// is total.
pub fn assess(
    lease: &Lease,
    condition: ReturnCondition,
    now: Timestamp,
) -> Result<SettlementQuote, SettlementError> {
    match resolve(lease, now) {
        LeaseStatus::Returned => {
            return Err(SettlementError::AlreadyReturned { lease_id: lease.id })
        }
        LeaseStatus::Active | LeaseStatus::Overdue => {}
    }

    let deposit = lease.deposit_amount;
    let base_refund = deposit.percent(condition.refund_percent());

    let days_late = lease
        .expected_return_date
        .map(|deadline| now.ceil_days_since(deadline))
        .unwrap_or(0);

    let late_fee = if days_late > 0 {
        let cap = base_refund.percent(LATE_FEE_CAP_PERCENT);
        // An accrual too large for i64 is far beyond the cap anyway.
        let accrued = LATE_FEE_PER_DAY.checked_mul(days_late).unwrap_or(cap);
        accrued.min(cap)
    } else {
        Amount::ZERO
    };

    let refund = base_refund.deduct(late_fee).min(deposit).max(Amount::ZERO);

    Ok(SettlementQuote {
        lease_id: lease.id,
        deposit,
        condition,
        assessed_at: now,
        days_late,
        base_refund,
        late_fee,
        refund,
    })
}

impl SettlementQuote {
    /// Apply the operator's decision and produce the commit instruction.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::OverrideOutOfRange`] when the override falls
    ///   outside `[0, deposit]`.
    /// - [`SettlementError::MissingDamageNotes`] when the condition
    ///   demands notes and none (or only blanks) were supplied.
    pub fn finalize(&self, decision: ReturnDecision) -> Result<ReturnCommit, SettlementError> {
        if self.condition.requires_damage_notes() {
            let has_notes = decision
                .damage_notes
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty());
            if !has_notes {
                return Err(SettlementError::MissingDamageNotes {
                    condition: self.condition,
                });
            }
        }

        let refund_amount = match decision.refund_override {
            Some(offered) => {
                if offered.is_negative() || offered > self.deposit {
                    return Err(SettlementError::OverrideOutOfRange {
                        offered,
                        deposit: self.deposit,
                    });
                }
                offered
            }
            None => self.refund,
        };

        Ok(ReturnCommit {
            lease_id: self.lease_id,
            refund_amount,
            condition: self.condition,
            damage_notes: decision.damage_notes,
            notes: decision.notes,
            returned_at: self.assessed_at,
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use cylrent_core::{CustomerId, CylinderId, OutletId, StaffId};
    use proptest::prelude::*;

    fn any_condition() -> impl Strategy<Value = ReturnCondition> {
        prop_oneof![
            Just(ReturnCondition::Good),
            Just(ReturnCondition::Damaged),
            Just(ReturnCondition::NeedsInspection),
        ]
    }

    proptest! {
        /// For any deposit, condition, and lateness, the computed refund
        /// stays within [0, deposit] and the fee within half the base.
        #[test]
        fn refund_always_bounded(
            deposit_minor in 0i64..10_000_000_000i64,
            condition in any_condition(),
            deadline_secs in 0i64..4_000_000_000i64,
            late_secs in 0i64..400_000_000i64,
        ) {
            let deadline = Timestamp::from_epoch_secs(deadline_secs).unwrap();
            let now = Timestamp::from_epoch_secs(deadline_secs + late_secs).unwrap();
            let lease = Lease::open(
                CustomerId::new(),
                CylinderId::new(),
                OutletId::new(),
                StaffId::new(),
                deadline,
                Some(deadline),
                Amount::ZERO,
                Amount::from_minor(deposit_minor),
            );

            let quote = assess(&lease, condition, now).unwrap();
            prop_assert!(quote.refund >= Amount::ZERO);
            prop_assert!(quote.refund <= lease.deposit_amount);
            prop_assert!(quote.late_fee <= quote.base_refund.percent(50));
        }
    }
}
