//! Status transition logic
//!
//! Pure functions for applying status transitions to defects.

use crate::schemas::Defect;

use super::policy::Actor;
use super::validation::{
    validate_snapshot, validate_transition, TransitionRejection, TransitionRequest,
};

/// Result of a status transition attempt
#[derive(Debug)]
pub enum TransitionResult {
    /// Successful transition with the new defect state
    Success {
        /// The defect with updated status and timestamp
        next_defect: Defect,
    },
    /// Refused transition; nothing changed
    Rejected {
        /// Why the transition was refused
        rejection: TransitionRejection,
    },
}

impl TransitionResult {
    /// Check if the transition was successful
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success { .. })
    }

    /// Check if the transition was refused
    pub fn is_rejected(&self) -> bool {
        matches!(self, TransitionResult::Rejected { .. })
    }

    /// Get the next defect if the transition was successful
    pub fn defect(self) -> Option<Defect> {
        match self {
            TransitionResult::Success { next_defect } => Some(next_defect),
            TransitionResult::Rejected { .. } => None,
        }
    }

    /// Get the rejection if the transition was refused
    pub fn rejection(self) -> Option<TransitionRejection> {
        match self {
            TransitionResult::Success { .. } => None,
            TransitionResult::Rejected { rejection } => Some(rejection),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<Defect, TransitionRejection> {
        match self {
            TransitionResult::Success { next_defect } => Ok(next_defect),
            TransitionResult::Rejected { rejection } => Err(rejection),
        }
    }
}

/// Pure function that applies a status transition to a defect.
///
/// `defect` must be the authoritative record. The request's snapshot is
/// checked against it first, so a request computed from a stale read is
/// reported as a conflict rather than re-validated against the new status.
///
/// This function:
/// - Never mutates the input defect
/// - Changes only `status` and `updated_at` on success
///
/// # Arguments
/// * `defect` - The authoritative defect (immutable reference)
/// * `request` - Snapshot status and requested status
/// * `actor` - The caller
pub fn apply_status_transition(
    defect: &Defect,
    request: TransitionRequest,
    actor: &Actor,
) -> TransitionResult {
    let checks = [
        validate_snapshot(request.snapshot, defect.status),
        validate_transition(
            defect.status,
            request.requested,
            actor.role,
            defect.is_assignee(actor.id),
        ),
    ];

    for check in checks {
        if let Some(rejection) = check.rejection {
            return TransitionResult::Rejected { rejection };
        }
    }

    // Create a new defect with the updated status - never mutate the original
    let next_defect = defect.clone().with_status(request.requested);

    TransitionResult::Success { next_defect }
}
