//! Role-gated transition table
//!
//! The table is the single source of truth for who may move a defect where.
//! Row order is the order actions are offered to the caller.

use serde::Serialize;

use crate::schemas::{Defect, DefectStatus, Role, User};

/// The identity a policy decision is made for.
///
/// Always passed in explicitly; the policy never reads session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: u64, role: Role) -> Self {
        Actor { id, role }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor::new(user.id, user.role)
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: DefectStatus,
    pub to: DefectStatus,
    pub role: Role,
    /// Caller must be the defect's assignee
    pub requires_assignee: bool,
    /// Label shown on the control that triggers this transition
    pub label: &'static str,
}

impl TransitionRule {
    /// Whether this row grants `(role, is_assignee)` the right to leave `from`.
    fn grants(&self, from: DefectStatus, role: Role, is_assignee: bool) -> bool {
        self.from == from && self.role == role && (!self.requires_assignee || is_assignee)
    }
}

pub const TRANSITION_TABLE: &[TransitionRule] = &[
    TransitionRule {
        from: DefectStatus::New,
        to: DefectStatus::InProgress,
        role: Role::Manager,
        requires_assignee: false,
        label: "Start work",
    },
    TransitionRule {
        from: DefectStatus::New,
        to: DefectStatus::Cancelled,
        role: Role::Manager,
        requires_assignee: false,
        label: "Cancel",
    },
    TransitionRule {
        from: DefectStatus::Review,
        to: DefectStatus::Closed,
        role: Role::Manager,
        requires_assignee: false,
        label: "Close",
    },
    TransitionRule {
        from: DefectStatus::Review,
        to: DefectStatus::InProgress,
        role: Role::Manager,
        requires_assignee: false,
        label: "Send back for rework",
    },
    TransitionRule {
        from: DefectStatus::InProgress,
        to: DefectStatus::Review,
        role: Role::Engineer,
        requires_assignee: true,
        label: "Submit for review",
    },
];

/// A transition the caller may trigger, paired with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusAction {
    pub status: DefectStatus,
    pub label: &'static str,
}

/// Legal next statuses for `(status, role, is_assignee)`, in table order.
///
/// Empty for terminal statuses, for observers, and for engineers who are
/// not the assignee.
pub fn available_actions(status: DefectStatus, role: Role, is_assignee: bool) -> Vec<StatusAction> {
    TRANSITION_TABLE
        .iter()
        .filter(|rule| rule.grants(status, role, is_assignee))
        .map(|rule| StatusAction {
            status: rule.to,
            label: rule.label,
        })
        .collect()
}

/// Legal next statuses for `actor` on `defect`.
pub fn available_actions_for(defect: &Defect, actor: &Actor) -> Vec<StatusAction> {
    available_actions(defect.status, actor.role, defect.is_assignee(actor.id))
}

/// The table row permitting `from → to`, if any, for this caller.
pub fn find_rule(
    from: DefectStatus,
    to: DefectStatus,
    role: Role,
    is_assignee: bool,
) -> Option<&'static TransitionRule> {
    TRANSITION_TABLE
        .iter()
        .find(|rule| rule.to == to && rule.grants(from, role, is_assignee))
}
