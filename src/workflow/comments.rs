//! Comment appends

use crate::domain::{self, can_view_defect, Actor, CommentRejection};
use crate::errors::{DefectError, Result};
use crate::schemas::{Defect, Role, User};
use crate::store::DefectStore;

/// Append a comment from `author` to a defect.
///
/// Any non-observer may comment on any existing defect, whatever its status
/// and whoever it is assigned to. Observers are refused, and a defect they
/// cannot see is reported as missing.
pub fn add_comment<S: DefectStore + ?Sized>(
    store: &mut S,
    defect_id: u64,
    author: &User,
    text: &str,
) -> Result<Defect> {
    let defect = store.get_defect(defect_id)?;
    if author.role == Role::Observer && !can_view_defect(&defect, &Actor::from(author)) {
        return Err(DefectError::DefectNotFound(defect_id));
    }

    let drafted = domain::append_comment(&defect, author, text).map_err(|rejection| {
        tracing::warn!(defect_id, user_id = author.id, %rejection, "comment rejected");
        match rejection {
            CommentRejection::Unauthorized => DefectError::Unauthorized(rejection.to_string()),
            CommentRejection::EmptyText => DefectError::InvalidInput(rejection.to_string()),
        }
    })?;

    let comment = drafted
        .comments
        .last()
        .cloned()
        .ok_or_else(|| DefectError::wrap("no comment drafted", "add_comment"))?;

    let stored = store.append_comment(defect_id, comment)?;
    tracing::info!(defect_id, user_id = author.id, "comment added");
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{DefectStatus, Role};
    use crate::workflow::fixtures::*;

    #[test]
    fn test_engineer_comments_on_closed_defect() {
        let mut store = store_with(DefectStatus::Closed);
        let author = store.get_user(ENGINEER_ID).unwrap();

        let defect = add_comment(&mut store, 1, &author, "confirmed fixed").unwrap();
        assert_eq!(defect.comments.len(), 1);
        assert_eq!(defect.comments[0].author_role, Role::Engineer);
        assert_eq!(defect.status, DefectStatus::Closed);
        assert_eq!(store.get_defect(1).unwrap().comments.len(), 1);
    }

    #[test]
    fn test_unrelated_engineer_can_comment() {
        let mut store = store_with(DefectStatus::InProgress);
        let author = store.get_user(OTHER_ENGINEER_ID).unwrap();

        let defect = add_comment(&mut store, 1, &author, "seen on site").unwrap();
        assert_eq!(defect.comments.len(), 1);
        assert_eq!(defect.comments[0].author_id, OTHER_ENGINEER_ID);
        assert_eq!(store.get_defect(1).unwrap().comments.len(), 1);
    }

    #[test]
    fn test_observer_on_hidden_defect_sees_not_found() {
        let mut store = store_with(DefectStatus::New);
        let author = store.get_user(OBSERVER_ID).unwrap();

        let err = add_comment(&mut store, 1, &author, "hello").unwrap_err();
        assert_eq!(err.code(), "DEFECT_NOT_FOUND");
    }

    #[test]
    fn test_comment_on_missing_defect() {
        let mut store = store_with(DefectStatus::New);
        let author = store.get_user(MANAGER_ID).unwrap();
        assert!(matches!(
            add_comment(&mut store, 9, &author, "anyone?"),
            Err(DefectError::DefectNotFound(9))
        ));
    }

    #[test]
    fn test_observer_cannot_comment() {
        let mut store = store_with(DefectStatus::Review);
        let author = store.get_user(OBSERVER_ID).unwrap();

        let err = add_comment(&mut store, 1, &author, "nice").unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert!(store.get_defect(1).unwrap().comments.is_empty());
    }

    #[test]
    fn test_blank_comment_rejected() {
        let mut store = store_with(DefectStatus::New);
        let author = store.get_user(MANAGER_ID).unwrap();

        let err = add_comment(&mut store, 1, &author, "").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
