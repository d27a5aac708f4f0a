//! # Transfer Wizard State Machine
//!
//! Drives a cylinder transfer through its guarded step sequence:
//!
//! ```text
//! SelectMode ──▶ SelectCylinders ──▶ SelectDestination ──▶ Review ──commit()──▶ Committed
//!     │                                                      (back() at any step)
//!     └──back()──▶ Cancelled
//! ```
//!
//! Two parallel branches — single and bulk — share the sequence and
//! converge before commit. Forward transitions require the current
//! step's guard to pass; backward transitions are always permitted, and
//! stepping back from the first step cancels the workflow. No step can
//! be skipped: every input method is bound to the step it belongs to.
//!
//! ## Design Decision
//!
//! The wizard is an enum-stepped machine with one guard function per
//! step, not a typestate chain. Which branch the workflow takes — and
//! therefore which inputs exist — depends on runtime data (the chosen
//! mode), so the states cannot usefully be separate types; an enum with
//! validated transitions keeps every guard independently testable.
//!
//! Each wizard instance owns its selection state outright. Nothing is
//! shared, nothing is locked; two concurrent workflows targeting the
//! same cylinder race at the store, not here.

use serde::{Deserialize, Serialize};

use cylrent_core::{Cylinder, CylinderId, OutletId, StaffId, Timestamp};

use crate::commit::{execute_sequential, CommitReport, TransferStore};
use crate::eligibility::ensure_transferable;
use crate::error::TransferError;
use crate::record::{TransferCommand, TransferReason, TransferRecord};

// ─── Steps ───────────────────────────────────────────────────────────

/// The wizard's position in the transfer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    /// Choosing single vs bulk.
    SelectMode,
    /// Resolving the cylinder (single) or outlet + multi-selection (bulk).
    SelectCylinders,
    /// Choosing destination outlet, reason, and notes.
    SelectDestination,
    /// Read-only recap of the accumulated selections.
    Review,
    /// Commands were issued (terminal).
    Committed,
    /// Abandoned before commit (terminal).
    Cancelled,
}

impl WizardStep {
    /// The following step, if forward movement goes through `advance()`.
    ///
    /// `Review` returns `None`: the only way forward from review is
    /// [`TransferWizard::commit`].
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::SelectMode => Some(Self::SelectCylinders),
            Self::SelectCylinders => Some(Self::SelectDestination),
            Self::SelectDestination => Some(Self::Review),
            Self::Review | Self::Committed | Self::Cancelled => None,
        }
    }

    /// The preceding step. `None` for the first step and for terminals.
    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            Self::SelectMode | Self::Committed | Self::Cancelled => None,
            Self::SelectCylinders => Some(Self::SelectMode),
            Self::SelectDestination => Some(Self::SelectCylinders),
            Self::Review => Some(Self::SelectDestination),
        }
    }

    /// Whether the workflow is over at this step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectMode => "SELECT_MODE",
            Self::SelectCylinders => "SELECT_CYLINDERS",
            Self::SelectDestination => "SELECT_DESTINATION",
            Self::Review => "REVIEW",
            Self::Committed => "COMMITTED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

// ─── Mode ────────────────────────────────────────────────────────────

/// Which branch the workflow takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// One cylinder, resolved by code or QR scan.
    Single,
    /// Several cylinders drawn from one source outlet's available stock.
    Bulk,
}

impl std::fmt::Display for TransferMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Single => "SINGLE",
            Self::Bulk => "BULK",
        };
        f.write_str(s)
    }
}

/// Selection state, scoped to exactly one mode at a time.
#[derive(Debug, Clone)]
enum ModeSelection {
    Single {
        cylinder: Option<Cylinder>,
    },
    Bulk {
        source_outlet_id: Option<OutletId>,
        cylinders: Vec<Cylinder>,
    },
}

impl ModeSelection {
    fn empty(mode: TransferMode) -> Self {
        match mode {
            TransferMode::Single => Self::Single { cylinder: None },
            TransferMode::Bulk => Self::Bulk {
                source_outlet_id: None,
                cylinders: Vec::new(),
            },
        }
    }

    fn mode(&self) -> TransferMode {
        match self {
            Self::Single { .. } => TransferMode::Single,
            Self::Bulk { .. } => TransferMode::Bulk,
        }
    }
}

// ─── Review Summary ──────────────────────────────────────────────────

/// One cylinder line in the review recap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCylinder {
    /// The selected cylinder.
    pub cylinder_id: CylinderId,
    /// Its asset tag, for display.
    pub code: String,
}

/// Read-only recap of the accumulated selections, produced at the
/// review step. Contains no new input — its guard always passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReview {
    /// The chosen branch.
    pub mode: TransferMode,
    /// Where custody moves from.
    pub source_outlet_id: OutletId,
    /// Where custody moves to.
    pub destination_outlet_id: OutletId,
    /// Why the cylinders move.
    pub reason: TransferReason,
    /// Description, when the reason is `other`.
    pub custom_reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// The selected cylinders, in selection order.
    pub cylinders: Vec<ReviewCylinder>,
}

impl TransferReview {
    /// Number of transfer commands a commit will issue.
    pub fn cylinder_count(&self) -> usize {
        self.cylinders.len()
    }
}

// ─── Wizard ──────────────────────────────────────────────────────────

/// A single transfer workflow instance.
///
/// Owns its local selection state; consumes caller-supplied cylinder
/// snapshots; emits validated commands at commit. Everything before
/// [`commit`](Self::commit) is side-effect free.
#[derive(Debug)]
pub struct TransferWizard {
    step: WizardStep,
    selection: Option<ModeSelection>,
    destination_outlet_id: Option<OutletId>,
    reason: Option<TransferReason>,
    custom_reason: Option<String>,
    notes: Option<String>,
    requested_by: StaffId,
}

impl TransferWizard {
    /// Start a new workflow at the mode-selection step.
    pub fn new(requested_by: StaffId) -> Self {
        Self {
            step: WizardStep::SelectMode,
            selection: None,
            destination_outlet_id: None,
            reason: None,
            custom_reason: None,
            notes: None,
            requested_by,
        }
    }

    /// The wizard's current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The chosen mode, if any.
    pub fn mode(&self) -> Option<TransferMode> {
        self.selection.as_ref().map(ModeSelection::mode)
    }

    // ── Step: SelectMode ─────────────────────────────────────────────

    /// Choose (or switch) the transfer mode.
    ///
    /// Switching to the other mode clears all cylinder selections made
    /// so far — selections are scoped to exactly one mode.
    pub fn choose_mode(&mut self, mode: TransferMode) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectMode)?;
        match &self.selection {
            Some(sel) if sel.mode() == mode => {}
            _ => self.selection = Some(ModeSelection::empty(mode)),
        }
        Ok(())
    }

    // ── Step: SelectCylinders (single) ───────────────────────────────

    /// Resolve the cylinder for a single transfer.
    ///
    /// The caller looks the snapshot up by code or QR scan; this method
    /// runs the eligibility gate and keeps the snapshot. Re-selecting
    /// replaces the previous choice.
    pub fn select_cylinder(&mut self, cylinder: Cylinder) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectCylinders)?;
        match &mut self.selection {
            Some(ModeSelection::Single { cylinder: slot }) => {
                ensure_transferable(&cylinder)?;
                *slot = Some(cylinder);
                Ok(())
            }
            Some(ModeSelection::Bulk { .. }) => Err(TransferError::WrongMode {
                expected: TransferMode::Single,
            }),
            None => Err(TransferError::ModeNotChosen),
        }
    }

    // ── Step: SelectCylinders (bulk) ─────────────────────────────────

    /// Choose the source outlet for a bulk transfer.
    ///
    /// Changing the source clears the multi-selection: the picks were
    /// drawn from the previous outlet's stock.
    pub fn set_source_outlet(&mut self, outlet_id: OutletId) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectCylinders)?;
        match &mut self.selection {
            Some(ModeSelection::Bulk {
                source_outlet_id,
                cylinders,
            }) => {
                if *source_outlet_id != Some(outlet_id) {
                    *source_outlet_id = Some(outlet_id);
                    cylinders.clear();
                }
                Ok(())
            }
            Some(ModeSelection::Single { .. }) => Err(TransferError::WrongMode {
                expected: TransferMode::Bulk,
            }),
            None => Err(TransferError::ModeNotChosen),
        }
    }

    /// Add a cylinder to the bulk selection.
    ///
    /// The cylinder must sit at the chosen source outlet, be
    /// `available`, and not already be selected.
    pub fn add_cylinder(&mut self, cylinder: Cylinder) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectCylinders)?;
        match &mut self.selection {
            Some(ModeSelection::Bulk {
                source_outlet_id,
                cylinders,
            }) => {
                let source = source_outlet_id.ok_or(TransferError::MissingSourceOutlet)?;
                if cylinder.current_outlet_id != source {
                    return Err(TransferError::NotAtSourceOutlet {
                        cylinder_id: cylinder.id,
                        source_outlet_id: source,
                    });
                }
                if !cylinder.is_available() {
                    return Err(TransferError::CylinderUnavailable {
                        cylinder_id: cylinder.id,
                        status: cylinder.status,
                    });
                }
                if cylinders.iter().any(|c| c.id == cylinder.id) {
                    return Err(TransferError::DuplicateCylinder {
                        cylinder_id: cylinder.id,
                    });
                }
                cylinders.push(cylinder);
                Ok(())
            }
            Some(ModeSelection::Single { .. }) => Err(TransferError::WrongMode {
                expected: TransferMode::Bulk,
            }),
            None => Err(TransferError::ModeNotChosen),
        }
    }

    /// Drop a cylinder from the bulk selection. Removing an unselected
    /// id is a no-op.
    pub fn remove_cylinder(&mut self, cylinder_id: CylinderId) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectCylinders)?;
        match &mut self.selection {
            Some(ModeSelection::Bulk { cylinders, .. }) => {
                cylinders.retain(|c| c.id != cylinder_id);
                Ok(())
            }
            Some(ModeSelection::Single { .. }) => Err(TransferError::WrongMode {
                expected: TransferMode::Bulk,
            }),
            None => Err(TransferError::ModeNotChosen),
        }
    }

    // ── Step: SelectDestination ──────────────────────────────────────

    /// Choose the destination outlet. Must differ from the source.
    pub fn set_destination(&mut self, outlet_id: OutletId) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectDestination)?;
        if outlet_id == self.source_outlet_id()? {
            return Err(TransferError::SameOutlet { outlet_id });
        }
        self.destination_outlet_id = Some(outlet_id);
        Ok(())
    }

    /// Choose the transfer reason. A custom description is required —
    /// and only kept — when the reason is `other`.
    pub fn set_reason(
        &mut self,
        reason: TransferReason,
        custom_reason: Option<String>,
    ) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectDestination)?;
        if reason.requires_custom_reason() {
            let described = custom_reason
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty());
            if !described {
                return Err(TransferError::MissingCustomReason);
            }
            self.custom_reason = custom_reason;
        } else {
            self.custom_reason = None;
        }
        self.reason = Some(reason);
        Ok(())
    }

    /// Attach free-form notes to the transfer.
    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), TransferError> {
        self.require_step(WizardStep::SelectDestination)?;
        self.notes = notes;
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Move forward one step. The current step's guard must pass; a
    /// failing guard leaves the wizard where it is.
    pub fn advance(&mut self) -> Result<WizardStep, TransferError> {
        if self.step.is_terminal() {
            return Err(TransferError::WorkflowClosed { step: self.step });
        }
        if self.step == WizardStep::Review {
            return Err(TransferError::AwaitingCommit);
        }
        self.guard(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step. Always permitted; backing out of the first
    /// step cancels the workflow. Selections survive backward steps.
    pub fn back(&mut self) -> WizardStep {
        if self.step.is_terminal() {
            return self.step;
        }
        self.step = self.step.prev().unwrap_or(WizardStep::Cancelled);
        self.step
    }

    /// Run a step's guard without moving.
    pub fn guard(&self, step: WizardStep) -> Result<(), TransferError> {
        match step {
            WizardStep::SelectMode => {
                if self.selection.is_none() {
                    return Err(TransferError::ModeNotChosen);
                }
                Ok(())
            }
            WizardStep::SelectCylinders => match &self.selection {
                None => Err(TransferError::ModeNotChosen),
                Some(ModeSelection::Single { cylinder: None }) => {
                    Err(TransferError::NoCylinderSelected)
                }
                Some(ModeSelection::Single { cylinder: Some(_) }) => Ok(()),
                Some(ModeSelection::Bulk {
                    source_outlet_id: None,
                    ..
                }) => Err(TransferError::MissingSourceOutlet),
                Some(ModeSelection::Bulk { cylinders, .. }) => {
                    if cylinders.is_empty() {
                        Err(TransferError::EmptySelection)
                    } else {
                        Ok(())
                    }
                }
            },
            WizardStep::SelectDestination => {
                let destination = self
                    .destination_outlet_id
                    .ok_or(TransferError::MissingDestination)?;
                if destination == self.source_outlet_id()? {
                    return Err(TransferError::SameOutlet {
                        outlet_id: destination,
                    });
                }
                let reason = self.reason.ok_or(TransferError::MissingReason)?;
                if reason.requires_custom_reason() {
                    let described = self
                        .custom_reason
                        .as_deref()
                        .is_some_and(|r| !r.trim().is_empty());
                    if !described {
                        return Err(TransferError::MissingCustomReason);
                    }
                }
                Ok(())
            }
            // Read-only recap; no new input to validate.
            WizardStep::Review => Ok(()),
            WizardStep::Committed | WizardStep::Cancelled => {
                Err(TransferError::WorkflowClosed { step })
            }
        }
    }

    // ── Review ───────────────────────────────────────────────────────

    /// The read-only recap shown at the review step.
    pub fn review(&self) -> Result<TransferReview, TransferError> {
        self.require_step(WizardStep::Review)?;
        let cylinders = self
            .selected_cylinders()
            .iter()
            .map(|c| ReviewCylinder {
                cylinder_id: c.id,
                code: c.code.clone(),
            })
            .collect();

        Ok(TransferReview {
            // Reaching Review implies every earlier guard passed, so the
            // fields below are all present.
            mode: self.mode().ok_or(TransferError::ModeNotChosen)?,
            source_outlet_id: self.source_outlet_id()?,
            destination_outlet_id: self
                .destination_outlet_id
                .ok_or(TransferError::MissingDestination)?,
            reason: self.reason.ok_or(TransferError::MissingReason)?,
            custom_reason: self.custom_reason.clone(),
            notes: self.notes.clone(),
            cylinders,
        })
    }

    // ── Commit ───────────────────────────────────────────────────────

    /// The validated commands a commit will issue, in selection order.
    pub fn commands(&self) -> Result<Vec<TransferCommand>, TransferError> {
        self.require_step(WizardStep::Review)?;
        let source = self.source_outlet_id()?;
        let destination = self
            .destination_outlet_id
            .ok_or(TransferError::MissingDestination)?;
        let reason = self.reason.ok_or(TransferError::MissingReason)?;

        Ok(self
            .selected_cylinders()
            .iter()
            .map(|c| TransferCommand {
                cylinder_id: c.id,
                source_outlet_id: source,
                destination_outlet_id: destination,
                reason,
                custom_reason: self.custom_reason.clone(),
                notes: self.notes.clone(),
            })
            .collect())
    }

    /// Execute the transfer(s) against the caller's store.
    ///
    /// Commands run **sequentially, in selection order, without
    /// atomicity**: each is applied and awaited before the next, the
    /// first failure stops the sequence, prior successes stand, and the
    /// remainder is recorded as not attempted. The per-command outcomes
    /// land in the returned [`CommitReport`]; a partial failure is a
    /// report, not an error.
    ///
    /// The wizard lands in `Committed` either way — once commands start
    /// issuing, the workflow is no longer cancellable.
    pub fn commit<S: TransferStore>(
        &mut self,
        store: &mut S,
        now: Timestamp,
    ) -> Result<CommitReport, TransferError> {
        let commands = self.commands()?;
        let mut records = Vec::with_capacity(commands.len());
        for command in &commands {
            records.push(TransferRecord::new(command, self.requested_by, now)?);
        }

        let report = execute_sequential(store, records);
        self.step = WizardStep::Committed;
        Ok(report)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_step(&self, expected: WizardStep) -> Result<(), TransferError> {
        if self.step.is_terminal() {
            return Err(TransferError::WorkflowClosed { step: self.step });
        }
        if self.step != expected {
            return Err(TransferError::WrongStep {
                expected,
                found: self.step,
            });
        }
        Ok(())
    }

    /// The outlet custody moves from: the cylinder's own outlet for a
    /// single transfer, the chosen source outlet for bulk.
    fn source_outlet_id(&self) -> Result<OutletId, TransferError> {
        match &self.selection {
            Some(ModeSelection::Single { cylinder: Some(c) }) => Ok(c.current_outlet_id),
            Some(ModeSelection::Single { cylinder: None }) => {
                Err(TransferError::NoCylinderSelected)
            }
            Some(ModeSelection::Bulk {
                source_outlet_id: Some(outlet),
                ..
            }) => Ok(*outlet),
            Some(ModeSelection::Bulk {
                source_outlet_id: None,
                ..
            }) => Err(TransferError::MissingSourceOutlet),
            None => Err(TransferError::ModeNotChosen),
        }
    }

    fn selected_cylinders(&self) -> Vec<&Cylinder> {
        match &self.selection {
            Some(ModeSelection::Single { cylinder: Some(c) }) => vec![c],
            Some(ModeSelection::Bulk { cylinders, .. }) => cylinders.iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
