// ABOUTME: Approval workflow for submitted theses
// ABOUTME: pending -> approved | rejected, both terminal

use archive_core::ThesisStatus;

use crate::ThesisError;

/// A staff decision on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target(&self) -> ThesisStatus {
        match self {
            Decision::Approve => ThesisStatus::Approved,
            Decision::Reject => ThesisStatus::Rejected,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

/// Outcome of applying a decision to a record's current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move the record to this status
    Apply(ThesisStatus),
    /// The record already carries the decided status
    Unchanged,
}

/// Decide what a decision does to a record in `current` status
pub fn plan_transition(current: ThesisStatus, decision: Decision) -> Result<Transition, ThesisError> {
    let target = decision.target();
    match current {
        ThesisStatus::Pending => Ok(Transition::Apply(target)),
        status if status == target => Ok(Transition::Unchanged),
        status => Err(ThesisError::InvalidTransition {
            from: status,
            action: decision.verb(),
        }),
    }
}
