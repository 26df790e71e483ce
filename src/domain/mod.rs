//! Domain logic for defect statuses, transitions and access rules

mod comments;
mod permissions;
mod policy;
mod query;
mod states;
mod transitions;
mod validation;


pub use comments::{append_comment, CommentRejection};
pub use permissions::{
    can_comment, can_create_defect, can_edit_defect, can_view_defect, OBSERVER_VISIBLE_STATUSES,
};
pub use policy::{
    available_actions, available_actions_for, find_rule, Actor, StatusAction, TransitionRule,
    TRANSITION_TABLE,
};
pub use query::{
    is_overdue, paginate, sort_defects, CompiledFilter, DashboardStats, DefectFilter, PageInfo,
    ProjectStats, SortKey, SortOrder,
};
pub use states::{
    is_open_status, is_terminal_status, DEFECT_STATUSES, INITIAL_STATUS, OPEN_STATUSES,
};
pub use transitions::{apply_status_transition, TransitionResult};
pub use validation::{
    parse_status, validate_snapshot, validate_transition, TransitionRejection, TransitionRequest,
    ValidationResult,
};
