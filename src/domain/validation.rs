//! Validation rules for status transitions

use thiserror::Error;

use crate::schemas::{DefectStatus, Role};

use super::policy::find_rule;

/// Why a transition request was refused.
///
/// These are expected outcomes, not faults; callers surface them to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    /// Not in the transition table for this role / assignment
    #[error("{role} may not move a defect from {from} to {to}")]
    Unauthorized {
        from: DefectStatus,
        to: DefectStatus,
        role: Role,
    },

    /// Authoritative status moved on since the caller's snapshot
    #[error("defect is {actual}, request was made against {expected}; refresh and retry")]
    Conflict {
        expected: DefectStatus,
        actual: DefectStatus,
    },

    /// Status value outside the known enumeration
    #[error("unknown status value: {0}")]
    InvalidStatus(String),
}

/// Result of a validation check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Classification of the failure (if valid is false)
    pub rejection: Option<TransitionRejection>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            rejection: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(rejection: TransitionRejection) -> Self {
        ValidationResult {
            valid: false,
            rejection: Some(rejection),
        }
    }
}

/// A transition request as it arrives from outside: the status the caller
/// last saw and the status they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub snapshot: DefectStatus,
    pub requested: DefectStatus,
}

impl TransitionRequest {
    pub fn new(snapshot: DefectStatus, requested: DefectStatus) -> Self {
        TransitionRequest {
            snapshot,
            requested,
        }
    }

    /// Parse raw status strings, rejecting anything outside the enumeration
    /// before it can reach the transition table.
    pub fn parse(snapshot: &str, requested: &str) -> Result<Self, TransitionRejection> {
        Ok(TransitionRequest {
            snapshot: parse_status(snapshot)?,
            requested: parse_status(requested)?,
        })
    }
}

/// Parse a single raw status value.
pub fn parse_status(raw: &str) -> Result<DefectStatus, TransitionRejection> {
    raw.trim()
        .parse()
        .map_err(|_| TransitionRejection::InvalidStatus(raw.to_string()))
}

/// Validate a status transition against the table.
pub fn validate_transition(
    current: DefectStatus,
    requested: DefectStatus,
    role: Role,
    is_assignee: bool,
) -> ValidationResult {
    match find_rule(current, requested, role, is_assignee) {
        Some(_) => ValidationResult::success(),
        None => ValidationResult::failure(TransitionRejection::Unauthorized {
            from: current,
            to: requested,
            role,
        }),
    }
}

/// Validate that the caller's snapshot still matches the authoritative status.
pub fn validate_snapshot(snapshot: DefectStatus, authoritative: DefectStatus) -> ValidationResult {
    if snapshot != authoritative {
        return ValidationResult::failure(TransitionRejection::Conflict {
            expected: snapshot,
            actual: authoritative,
        });
    }
    ValidationResult::success()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_transition_valid() {
        let result =
            validate_transition(DefectStatus::New, DefectStatus::InProgress, Role::Manager, false);
        assert!(result.valid);
        assert!(result.rejection.is_none());

        let result =
            validate_transition(DefectStatus::InProgress, DefectStatus::Review, Role::Engineer, true);
        assert!(result.valid);
    }

    #[test]
    fn test_validate_transition_not_in_table() {
        let result =
            validate_transition(DefectStatus::New, DefectStatus::Closed, Role::Manager, false);
        assert!(!result.valid);
        assert_eq!(
            result.rejection,
            Some(TransitionRejection::Unauthorized {
                from: DefectStatus::New,
                to: DefectStatus::Closed,
                role: Role::Manager,
            })
        );
    }

    #[test]
    fn test_validate_transition_engineer_not_assignee() {
        let result =
            validate_transition(DefectStatus::InProgress, DefectStatus::Review, Role::Engineer, false);
        assert!(!result.valid);
        assert!(matches!(
            result.rejection,
            Some(TransitionRejection::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_validate_transition_from_terminal() {
        let result =
            validate_transition(DefectStatus::Closed, DefectStatus::InProgress, Role::Manager, true);
        assert!(!result.valid);
    }

    #[test]
    fn test_validate_transition_observer() {
        let result =
            validate_transition(DefectStatus::Review, DefectStatus::Closed, Role::Observer, true);
        assert!(!result.valid);
    }

    #[test]
    fn test_validate_snapshot() {
        assert!(validate_snapshot(DefectStatus::Review, DefectStatus::Review).valid);

        let stale = validate_snapshot(DefectStatus::Review, DefectStatus::Closed);
        assert!(!stale.valid);
        assert_eq!(
            stale.rejection,
            Some(TransitionRejection::Conflict {
                expected: DefectStatus::Review,
                actual: DefectStatus::Closed,
            })
        );
    }

    #[test]
    fn test_parse_request() {
        let request = TransitionRequest::parse("review", "closed").unwrap();
        assert_eq!(request.snapshot, DefectStatus::Review);
        assert_eq!(request.requested, DefectStatus::Closed);
    }

    #[test]
    fn test_parse_request_unknown_status() {
        assert_eq!(
            TransitionRequest::parse("review", "reopened"),
            Err(TransitionRejection::InvalidStatus("reopened".to_string()))
        );
        assert_eq!(
            TransitionRequest::parse("", "closed"),
            Err(TransitionRejection::InvalidStatus(String::new()))
        );
    }

    #[test]
    fn test_rejection_messages() {
        let conflict = TransitionRejection::Conflict {
            expected: DefectStatus::Review,
            actual: DefectStatus::Closed,
        };
        assert!(conflict.to_string().contains("refresh and retry"));

        let unauthorized = TransitionRejection::Unauthorized {
            from: DefectStatus::New,
            to: DefectStatus::Review,
            role: Role::Engineer,
        };
        assert_eq!(
            unauthorized.to_string(),
            "engineer may not move a defect from new to review"
        );
    }
}
