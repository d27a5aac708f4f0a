//! # Transfer Commit — Sequential, Non-Atomic
//!
//! Executes the wizard's validated commands against the caller's store.
//!
//! ## Partial-Failure Semantics
//!
//! A bulk transfer of N cylinders issues N independent commands,
//! **in selection order, one at a time**. There is no retry and no
//! rollback: when command *k* fails, commands `1..k-1` stay committed and
//! commands `k+1..N` are never attempted. The result is an explicit
//! per-command outcome list — [`CommitReport`] — not an exception cut
//! short mid-loop. Callers report partial success from it.
//!
//! ## The Store Seam
//!
//! Eligibility was checked against snapshots at selection time and is
//! not re-checked here; two concurrent workflows can race for the same
//! cylinder. [`TransferStore::apply_transfer`] is where a store
//! serializes that race — typically a conditional update that rejects
//! with [`CommitError::StatusConflict`] when the cylinder is no longer
//! available.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cylrent_core::{CylinderId, CylinderStatus, OutletId};

use crate::record::TransferRecord;

// ─── Store Seam ──────────────────────────────────────────────────────

/// The caller's persistence seam for committed transfers.
///
/// An implementation persists the record and relocates the cylinder to
/// `record.destination_outlet_id` as one storage-level operation.
pub trait TransferStore {
    /// Apply one committed transfer.
    fn apply_transfer(&mut self, record: &TransferRecord) -> Result<(), CommitError>;
}

/// Failure applying one transfer command. Raised by the store, reported
/// per command, never escalated to a batch-level error.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CommitError {
    /// The cylinder's status changed since selection; a concurrent
    /// workflow or return got there first.
    #[error("cylinder {cylinder_id} is no longer available: status is {status}")]
    StatusConflict {
        /// The contested cylinder.
        cylinder_id: CylinderId,
        /// Its status at apply time.
        status: CylinderStatus,
    },

    /// The store rejected the write.
    #[error("store rejected the transfer: {reason}")]
    Rejected {
        /// Store-side diagnostic.
        reason: String,
    },

    /// The store could not be reached.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Store-side diagnostic.
        reason: String,
    },
}

// ─── Outcomes ────────────────────────────────────────────────────────

/// What happened to one command in the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommitOutcome {
    /// Applied; the record stands.
    Committed(TransferRecord),
    /// The store refused or failed; the sequence stopped here.
    Failed {
        /// The cylinder whose command failed.
        cylinder_id: CylinderId,
        /// The store's error.
        error: CommitError,
    },
    /// After an earlier failure; never issued.
    NotAttempted {
        /// The cylinder whose command was skipped.
        cylinder_id: CylinderId,
    },
}

impl CommitOutcome {
    /// Whether this command was applied.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Per-command outcomes of one commit, in command order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitReport {
    /// One outcome per command, in the order they were (or would have
    /// been) issued.
    pub outcomes: Vec<CommitOutcome>,
}

impl CommitReport {
    /// The records that were applied, in order.
    pub fn committed(&self) -> Vec<&TransferRecord> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CommitOutcome::Committed(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    /// The failure that stopped the sequence, if any.
    pub fn failure(&self) -> Option<(CylinderId, &CommitError)> {
        self.outcomes.iter().find_map(|o| match o {
            CommitOutcome::Failed { cylinder_id, error } => Some((*cylinder_id, error)),
            _ => None,
        })
    }

    /// Number of applied commands.
    pub fn committed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_committed()).count()
    }

    /// Whether every command was applied.
    pub fn is_complete(&self) -> bool {
        self.committed_count() == self.outcomes.len()
    }

    /// Whether some — but not all — commands were applied.
    pub fn is_partial(&self) -> bool {
        let committed = self.committed_count();
        committed > 0 && committed < self.outcomes.len()
    }

    /// The custody moves the caller must apply: one
    /// `(cylinder, destination)` pair per committed record.
    pub fn relocations(&self) -> Vec<(CylinderId, OutletId)> {
        self.committed()
            .iter()
            .map(|r| (r.cylinder_id, r.destination_outlet_id))
            .collect()
    }
}

// ─── Execution ───────────────────────────────────────────────────────

/// Apply records in order, stopping at the first failure.
///
/// Every record gets exactly one outcome. Prior successes are never
/// rolled back; records after a failure are marked not attempted.
pub fn execute_sequential<S: TransferStore>(
    store: &mut S,
    records: Vec<TransferRecord>,
) -> CommitReport {
    let mut outcomes = Vec::with_capacity(records.len());
    let mut stopped = false;

    for record in records {
        if stopped {
            outcomes.push(CommitOutcome::NotAttempted {
                cylinder_id: record.cylinder_id,
            });
            continue;
        }
        match store.apply_transfer(&record) {
            Ok(()) => outcomes.push(CommitOutcome::Committed(record)),
            Err(error) => {
                stopped = true;
                outcomes.push(CommitOutcome::Failed {
                    cylinder_id: record.cylinder_id,
                    error,
                });
            }
        }
    }

    CommitReport { outcomes }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TransferReason;
    use crate::wizard::{TransferMode, TransferWizard, WizardStep};
    use cylrent_core::{Cylinder, CylinderStatus, StaffId, Timestamp};

    /// In-memory store double. Applies every record unless told to fail
    /// on a specific cylinder.
    #[derive(Default)]
    struct MemoryStore {
        applied: Vec<TransferRecord>,
        fail_on: Option<CylinderId>,
    }

    impl TransferStore for MemoryStore {
        fn apply_transfer(&mut self, record: &TransferRecord) -> Result<(), CommitError> {
            if self.fail_on == Some(record.cylinder_id) {
                return Err(CommitError::StatusConflict {
                    cylinder_id: record.cylinder_id,
                    status: CylinderStatus::Leased,
                });
            }
            self.applied.push(record.clone());
            Ok(())
        }
    }

    fn ts() -> Timestamp {
        Timestamp::parse("2024-02-01T10:00:00Z").unwrap()
    }

    fn cylinder_at(outlet: OutletId) -> Cylinder {
        Cylinder {
            id: CylinderId::new(),
            code: "CYL-001".to_string(),
            qr_code: None,
            capacity_class: "13kg".to_string(),
            status: CylinderStatus::Available,
            current_outlet_id: outlet,
            current_gas_volume: 13,
            max_gas_volume: 13,
            last_inspection_date: None,
        }
    }

    /// Bulk wizard at Review holding the given cylinders.
    fn reviewed_bulk(source: OutletId, cylinders: &[Cylinder]) -> TransferWizard {
        let mut w = TransferWizard::new(StaffId::new());
        w.choose_mode(TransferMode::Bulk).unwrap();
        w.advance().unwrap();
        w.set_source_outlet(source).unwrap();
        for c in cylinders {
            w.add_cylinder(c.clone()).unwrap();
        }
        w.advance().unwrap();
        w.set_destination(OutletId::new()).unwrap();
        w.set_reason(TransferReason::Balancing, None).unwrap();
        w.advance().unwrap();
        w
    }

    // ── Single commit ────────────────────────────────────────────────

    #[test]
    fn test_single_commit_yields_one_record_and_relocation() {
        let source = OutletId::new();
        let destination = OutletId::new();
        let mut w = TransferWizard::new(StaffId::new());
        w.choose_mode(TransferMode::Single).unwrap();
        w.advance().unwrap();
        w.select_cylinder(cylinder_at(source)).unwrap();
        w.advance().unwrap();
        w.set_destination(destination).unwrap();
        w.set_reason(TransferReason::Request, None).unwrap();
        w.advance().unwrap();

        let mut store = MemoryStore::default();
        let report = w.commit(&mut store, ts()).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.committed_count(), 1);
        assert_eq!(store.applied.len(), 1);
        assert_eq!(store.applied[0].destination_outlet_id, destination);
        assert_eq!(report.relocations(), vec![(store.applied[0].cylinder_id, destination)]);
        assert_eq!(w.step(), WizardStep::Committed);
    }

    #[test]
    fn test_committed_record_has_distinct_outlets() {
        let source = OutletId::new();
        let cylinders = vec![cylinder_at(source)];
        let mut w = reviewed_bulk(source, &cylinders);
        let mut store = MemoryStore::default();
        let report = w.commit(&mut store, ts()).unwrap();
        for record in report.committed() {
            assert_ne!(record.destination_outlet_id, record.source_outlet_id);
        }
    }

    // ── Bulk commit ──────────────────────────────────────────────────

    #[test]
    fn test_bulk_commit_applies_in_selection_order() {
        let source = OutletId::new();
        let cylinders: Vec<_> = (0..4).map(|_| cylinder_at(source)).collect();
        let mut w = reviewed_bulk(source, &cylinders);

        let mut store = MemoryStore::default();
        let report = w.commit(&mut store, ts()).unwrap();

        assert!(report.is_complete());
        let applied_ids: Vec<_> = store.applied.iter().map(|r| r.cylinder_id).collect();
        let expected: Vec<_> = cylinders.iter().map(|c| c.id).collect();
        assert_eq!(applied_ids, expected);
    }

    #[test]
    fn test_partial_failure_keeps_prior_and_skips_rest() {
        // Five commands; the third fails. 1-2 stand, 4-5 never issue.
        let source = OutletId::new();
        let cylinders: Vec<_> = (0..5).map(|_| cylinder_at(source)).collect();
        let mut w = reviewed_bulk(source, &cylinders);

        let mut store = MemoryStore {
            fail_on: Some(cylinders[2].id),
            ..Default::default()
        };
        let report = w.commit(&mut store, ts()).unwrap();

        assert!(report.is_partial());
        assert!(!report.is_complete());
        assert_eq!(report.committed_count(), 2);
        assert_eq!(store.applied.len(), 2);

        assert!(report.outcomes[0].is_committed());
        assert!(report.outcomes[1].is_committed());
        assert!(matches!(
            report.outcomes[2],
            CommitOutcome::Failed { cylinder_id, .. } if cylinder_id == cylinders[2].id
        ));
        assert!(matches!(
            report.outcomes[3],
            CommitOutcome::NotAttempted { cylinder_id } if cylinder_id == cylinders[3].id
        ));
        assert!(matches!(
            report.outcomes[4],
            CommitOutcome::NotAttempted { cylinder_id } if cylinder_id == cylinders[4].id
        ));

        let (failed_id, error) = report.failure().unwrap();
        assert_eq!(failed_id, cylinders[2].id);
        assert!(matches!(error, CommitError::StatusConflict { .. }));

        // Relocations cover exactly the committed prefix.
        assert_eq!(report.relocations().len(), 2);
    }

    #[test]
    fn test_first_command_failure_attempts_nothing_else() {
        let source = OutletId::new();
        let cylinders: Vec<_> = (0..3).map(|_| cylinder_at(source)).collect();
        let mut w = reviewed_bulk(source, &cylinders);

        let mut store = MemoryStore {
            fail_on: Some(cylinders[0].id),
            ..Default::default()
        };
        let report = w.commit(&mut store, ts()).unwrap();

        assert_eq!(report.committed_count(), 0);
        assert!(!report.is_partial());
        assert!(store.applied.is_empty());
        assert_eq!(report.outcomes.len(), 3);
    }

    // ── Workflow closure ─────────────────────────────────────────────

    #[test]
    fn test_commit_only_from_review() {
        let mut w = TransferWizard::new(StaffId::new());
        let mut store = MemoryStore::default();
        assert!(w.commit(&mut store, ts()).is_err());
        assert!(store.applied.is_empty());
    }

    #[test]
    fn test_commit_closes_workflow_even_on_partial_failure() {
        let source = OutletId::new();
        let cylinders = vec![cylinder_at(source), cylinder_at(source)];
        let mut w = reviewed_bulk(source, &cylinders);
        let mut store = MemoryStore {
            fail_on: Some(cylinders[1].id),
            ..Default::default()
        };
        w.commit(&mut store, ts()).unwrap();
        assert_eq!(w.step(), WizardStep::Committed);
        // A second commit is rejected; nothing more reaches the store.
        assert!(w.commit(&mut store, ts()).is_err());
        assert_eq!(store.applied.len(), 1);
    }

    // ── Report serde ─────────────────────────────────────────────────

    #[test]
    fn test_report_serde_roundtrip() {
        let source = OutletId::new();
        let cylinders = vec![cylinder_at(source), cylinder_at(source)];
        let mut w = reviewed_bulk(source, &cylinders);
        let mut store = MemoryStore {
            fail_on: Some(cylinders[1].id),
            ..Default::default()
        };
        let report = w.commit(&mut store, ts()).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let parsed: CommitReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.outcomes.len(), report.outcomes.len());
        assert_eq!(parsed.committed_count(), report.committed_count());
    }
}
