//! # Transfer Records and Commands
//!
//! A [`TransferCommand`] is the caller-facing instruction assembled by
//! the wizard; a [`TransferRecord`] is the immutable audit row a
//! committed command becomes. Records are created once, atomically from
//! the core's perspective, and never mutated — the cylinder's custody
//! change is a side effect the caller applies alongside.

use serde::{Deserialize, Serialize};

use cylrent_core::{CylinderId, OutletId, StaffId, Timestamp, TransferId};

use crate::error::TransferError;

// ─── Reason ──────────────────────────────────────────────────────────

/// Why a cylinder is being moved between outlets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferReason {
    /// Stock balancing between outlets.
    Balancing,
    /// A specific outlet requested the cylinder.
    Request,
    /// Moving to a maintenance facility.
    Maintenance,
    /// Emergency restock.
    Emergency,
    /// Source outlet is closing down.
    Closure,
    /// Anything else — requires a custom description.
    Other,
}

impl TransferReason {
    /// Whether this reason demands a free-form description.
    pub fn requires_custom_reason(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl std::fmt::Display for TransferReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Balancing => "BALANCING",
            Self::Request => "REQUEST",
            Self::Maintenance => "MAINTENANCE",
            Self::Emergency => "EMERGENCY",
            Self::Closure => "CLOSURE",
            Self::Other => "OTHER",
        };
        f.write_str(s)
    }
}

// ─── Command ─────────────────────────────────────────────────────────

/// One validated transfer instruction, as emitted to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// The cylinder to move.
    pub cylinder_id: CylinderId,
    /// The outlet currently holding custody.
    pub source_outlet_id: OutletId,
    /// The outlet receiving custody.
    pub destination_outlet_id: OutletId,
    /// Why the cylinder is moving.
    pub reason: TransferReason,
    /// Free-form description, set iff the reason is `other`.
    pub custom_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

// ─── Record ──────────────────────────────────────────────────────────

/// The immutable audit row for one committed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Unique transfer identifier.
    pub id: TransferId,
    /// The moved cylinder.
    pub cylinder_id: CylinderId,
    /// Custody before the move.
    pub source_outlet_id: OutletId,
    /// Custody after the move.
    pub destination_outlet_id: OutletId,
    /// Why the cylinder moved.
    pub reason: TransferReason,
    /// Free-form description, set iff the reason is `other`.
    pub custom_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// The staff member who drove the workflow.
    pub requested_by: StaffId,
    /// When the transfer was committed.
    pub created_at: Timestamp,
}

impl TransferRecord {
    /// Build the audit row for a command.
    ///
    /// The record invariants cannot be bypassed by direct construction:
    ///
    /// # Errors
    ///
    /// - [`TransferError::SameOutlet`] — destination equals source.
    /// - [`TransferError::MissingCustomReason`] — reason is `other` with
    ///   no (or a blank) description.
    pub fn new(
        command: &TransferCommand,
        requested_by: StaffId,
        created_at: Timestamp,
    ) -> Result<Self, TransferError> {
        if command.destination_outlet_id == command.source_outlet_id {
            return Err(TransferError::SameOutlet {
                outlet_id: command.destination_outlet_id,
            });
        }
        if command.reason.requires_custom_reason() {
            let described = command
                .custom_reason
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty());
            if !described {
                return Err(TransferError::MissingCustomReason);
            }
        }

        Ok(Self {
            id: TransferId::new(),
            cylinder_id: command.cylinder_id,
            source_outlet_id: command.source_outlet_id,
            destination_outlet_id: command.destination_outlet_id,
            reason: command.reason,
            custom_reason: command.custom_reason.clone(),
            notes: command.notes.clone(),
            requested_by,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(reason: TransferReason, custom: Option<&str>) -> TransferCommand {
        TransferCommand {
            cylinder_id: CylinderId::new(),
            source_outlet_id: OutletId::new(),
            destination_outlet_id: OutletId::new(),
            reason,
            custom_reason: custom.map(str::to_string),
            notes: None,
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse("2024-02-01T10:00:00Z").unwrap()
    }

    #[test]
    fn test_record_from_valid_command() {
        let cmd = command(TransferReason::Balancing, None);
        let record = TransferRecord::new(&cmd, StaffId::new(), now()).unwrap();
        assert_eq!(record.cylinder_id, cmd.cylinder_id);
        assert_eq!(record.destination_outlet_id, cmd.destination_outlet_id);
        assert_ne!(record.destination_outlet_id, record.source_outlet_id);
    }

    #[test]
    fn test_same_outlet_always_rejected() {
        let mut cmd = command(TransferReason::Balancing, None);
        cmd.destination_outlet_id = cmd.source_outlet_id;
        assert!(matches!(
            TransferRecord::new(&cmd, StaffId::new(), now()),
            Err(TransferError::SameOutlet { .. })
        ));
    }

    #[test]
    fn test_other_reason_requires_description() {
        let cmd = command(TransferReason::Other, None);
        assert!(matches!(
            TransferRecord::new(&cmd, StaffId::new(), now()),
            Err(TransferError::MissingCustomReason)
        ));

        let blank = command(TransferReason::Other, Some("  "));
        assert!(TransferRecord::new(&blank, StaffId::new(), now()).is_err());

        let described = command(TransferReason::Other, Some("insurance audit"));
        assert!(TransferRecord::new(&described, StaffId::new(), now()).is_ok());
    }

    #[test]
    fn test_reason_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransferReason::Balancing).unwrap(),
            "\"balancing\""
        );
        let parsed: TransferReason = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, TransferReason::Other);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let cmd = command(TransferReason::Other, Some("insurance audit"));
        let record = TransferRecord::new(&cmd, StaffId::new(), now()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: TransferRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.custom_reason, record.custom_reason);
    }
}
