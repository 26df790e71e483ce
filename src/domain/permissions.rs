//! Who may see, create and edit defects

use crate::schemas::{Defect, DefectStatus, Role};

use super::policy::Actor;

/// Statuses an observer is allowed to see.
pub const OBSERVER_VISIBLE_STATUSES: &[DefectStatus] = &[DefectStatus::Closed, DefectStatus::Review];

/// Any non-observer may report a defect.
pub fn can_create_defect(role: Role) -> bool {
    role != Role::Observer
}

/// Any non-observer may comment, whatever the defect's status.
pub fn can_comment(role: Role) -> bool {
    role != Role::Observer
}

/// Managers may edit any defect; engineers only their assigned ones.
pub fn can_edit_defect(defect: &Defect, actor: &Actor) -> bool {
    match actor.role {
        Role::Manager => true,
        Role::Engineer => defect.is_assignee(actor.id),
        Role::Observer => false,
    }
}

/// Visibility by role: managers see everything, engineers what they are
/// assigned to or created, observers only reviewed or closed work.
pub fn can_view_defect(defect: &Defect, actor: &Actor) -> bool {
    match actor.role {
        Role::Manager => true,
        Role::Engineer => defect.is_assignee(actor.id) || defect.creator_id == actor.id,
        Role::Observer => OBSERVER_VISIBLE_STATUSES.contains(&defect.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::User;

    fn make_defect(creator_id: u64, assignee_id: Option<u64>, status: DefectStatus) -> Defect {
        let creator = User::new(creator_id, "c@example.com", "Cara", "Diaz", Role::Engineer);
        Defect::new(1, "t".into(), "d".into(), "p".into(), &creator)
            .with_assignee(assignee_id)
            .with_status(status)
    }

    #[test]
    fn test_can_create_and_comment() {
        assert!(can_create_defect(Role::Manager));
        assert!(can_create_defect(Role::Engineer));
        assert!(!can_create_defect(Role::Observer));
        assert!(can_comment(Role::Manager));
        assert!(can_comment(Role::Engineer));
        assert!(!can_comment(Role::Observer));
    }

    #[test]
    fn test_can_edit_defect() {
        let defect = make_defect(5, Some(6), DefectStatus::InProgress);
        assert!(can_edit_defect(&defect, &Actor::new(1, Role::Manager)));
        assert!(can_edit_defect(&defect, &Actor::new(6, Role::Engineer)));
        assert!(!can_edit_defect(&defect, &Actor::new(5, Role::Engineer)));
        assert!(!can_edit_defect(&defect, &Actor::new(6, Role::Observer)));
    }

    #[test]
    fn test_engineer_visibility() {
        let defect = make_defect(5, Some(6), DefectStatus::New);
        assert!(can_view_defect(&defect, &Actor::new(5, Role::Engineer)));
        assert!(can_view_defect(&defect, &Actor::new(6, Role::Engineer)));
        assert!(!can_view_defect(&defect, &Actor::new(7, Role::Engineer)));
    }

    #[test]
    fn test_observer_visibility() {
        let observer = Actor::new(9, Role::Observer);
        assert!(!can_view_defect(&make_defect(5, None, DefectStatus::New), &observer));
        assert!(!can_view_defect(&make_defect(5, None, DefectStatus::InProgress), &observer));
        assert!(can_view_defect(&make_defect(5, None, DefectStatus::Review), &observer));
        assert!(can_view_defect(&make_defect(5, None, DefectStatus::Closed), &observer));
        assert!(!can_view_defect(&make_defect(5, None, DefectStatus::Cancelled), &observer));
    }

    #[test]
    fn test_manager_sees_everything() {
        let manager = Actor::new(1, Role::Manager);
        assert!(can_view_defect(&make_defect(5, None, DefectStatus::Cancelled), &manager));
        assert!(can_view_defect(&make_defect(5, Some(6), DefectStatus::New), &manager));
    }
}
