//! Defect status definitions
//!
//! new → in_progress → review → closed, with rework (review → in_progress)
//! and rejection (new → cancelled). closed and cancelled are terminal.

use crate::schemas::DefectStatus;

/// Every status a defect can be in, in lifecycle order.
pub const DEFECT_STATUSES: &[DefectStatus] = &[
    DefectStatus::New,
    DefectStatus::InProgress,
    DefectStatus::Review,
    DefectStatus::Closed,
    DefectStatus::Cancelled,
];

/// Status every defect is created in.
pub const INITIAL_STATUS: DefectStatus = DefectStatus::New;

/// Statuses in which a past due date makes a defect overdue.
pub const OPEN_STATUSES: &[DefectStatus] = &[DefectStatus::New, DefectStatus::InProgress];

/// Check if a status is terminal (closed or cancelled).
pub fn is_terminal_status(status: DefectStatus) -> bool {
    matches!(status, DefectStatus::Closed | DefectStatus::Cancelled)
}

/// Check if a status still counts toward the overdue calculation.
pub fn is_open_status(status: DefectStatus) -> bool {
    OPEN_STATUSES.contains(&status)
}
