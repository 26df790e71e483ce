//! In-memory store

use std::collections::BTreeMap;

use crate::errors::{DefectError, Result};
use crate::schemas::{Comment, Defect, DefectStatus, User};

use super::{check_new_user, compare_and_set, ApplyOutcome, DefectStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    defects: BTreeMap<u64, Defect>,
    users: BTreeMap<u64, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_records(users: Vec<User>, defects: Vec<Defect>) -> Self {
        MemoryStore {
            defects: defects.into_iter().map(|d| (d.id, d)).collect(),
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Overwrite a defect's status without going through the policy.
    ///
    /// Only for simulating another writer in tests.
    #[cfg(test)]
    pub(crate) fn force_status(&mut self, id: u64, status: DefectStatus) {
        if let Some(defect) = self.defects.get_mut(&id) {
            defect.status = status;
        }
    }
}

impl DefectStore for MemoryStore {
    fn get_defect(&self, id: u64) -> Result<Defect> {
        self.defects
            .get(&id)
            .cloned()
            .ok_or(DefectError::DefectNotFound(id))
    }

    fn list_defects(&self) -> Result<Vec<Defect>> {
        Ok(self.defects.values().cloned().collect())
    }

    fn next_defect_id(&self) -> Result<u64> {
        Ok(self.defects.keys().next_back().copied().unwrap_or(0) + 1)
    }

    fn insert_defect(&mut self, defect: Defect) -> Result<()> {
        if self.defects.contains_key(&defect.id) {
            return Err(DefectError::InvalidInput(format!(
                "defect {} already exists",
                defect.id
            )));
        }
        self.defects.insert(defect.id, defect);
        Ok(())
    }

    fn apply_transition(
        &mut self,
        id: u64,
        expected: DefectStatus,
        new_status: DefectStatus,
    ) -> Result<ApplyOutcome> {
        let stored = self
            .defects
            .get_mut(&id)
            .ok_or(DefectError::DefectNotFound(id))?;
        let outcome = compare_and_set(stored, expected, new_status);
        if let ApplyOutcome::Applied(next) = &outcome {
            *stored = next.clone();
        }
        Ok(outcome)
    }

    fn update_details(&mut self, id: u64, edited: &Defect) -> Result<Defect> {
        let stored = self
            .defects
            .get_mut(&id)
            .ok_or(DefectError::DefectNotFound(id))?;
        *stored = stored.clone().with_details_of(edited);
        Ok(stored.clone())
    }

    fn append_comment(&mut self, id: u64, mut comment: Comment) -> Result<Defect> {
        let stored = self
            .defects
            .get_mut(&id)
            .ok_or(DefectError::DefectNotFound(id))?;
        comment.id = stored.next_comment_id();
        stored.comments.push(comment);
        Ok(stored.clone())
    }

    fn get_user(&self, id: u64) -> Result<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(DefectError::UserNotFound(id))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.values().cloned().collect())
    }

    fn add_user(&mut self, user: User) -> Result<()> {
        let existing: Vec<User> = self.users.values().cloned().collect();
        check_new_user(&existing, &user)?;
        self.users.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Priority, Role};

    fn manager() -> User {
        User::new(1, "max@example.com", "Max", "Berg", Role::Manager)
    }

    fn seeded() -> MemoryStore {
        let defect = Defect::new(1, "t".into(), "d".into(), "p".into(), &manager());
        MemoryStore::with_records(vec![manager()], vec![defect])
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_defect(1), Err(DefectError::DefectNotFound(1))));
        assert!(matches!(store.get_user(1), Err(DefectError::UserNotFound(1))));
    }

    #[test]
    fn test_next_defect_id() {
        assert_eq!(MemoryStore::new().next_defect_id().unwrap(), 1);
        assert_eq!(seeded().next_defect_id().unwrap(), 2);
    }

    #[test]
    fn test_apply_transition_compare_and_set() {
        let mut store = seeded();

        let outcome = store
            .apply_transition(1, DefectStatus::New, DefectStatus::InProgress)
            .unwrap();
        assert!(matches!(outcome, ApplyOutcome::Applied(ref d) if d.status == DefectStatus::InProgress));

        let outcome = store
            .apply_transition(1, DefectStatus::New, DefectStatus::Cancelled)
            .unwrap();
        assert_eq!(
            outcome,
            ApplyOutcome::Conflict {
                actual: DefectStatus::InProgress
            }
        );
        assert_eq!(store.get_defect(1).unwrap().status, DefectStatus::InProgress);
    }

    #[test]
    fn test_update_details_keeps_status() {
        let mut store = seeded();
        let mut edited = store.get_defect(1).unwrap().with_priority(Priority::High);
        edited.status = DefectStatus::Closed;

        let stored = store.update_details(1, &edited).unwrap();
        assert_eq!(stored.priority, Priority::High);
        assert_eq!(stored.status, DefectStatus::New);
        assert!(store.update_details(9, &edited).is_err());
    }

    #[test]
    fn test_append_comment_reassigns_id() {
        let mut store = seeded();
        let comment = Comment {
            id: 42,
            author_id: 1,
            author: "Max Berg".into(),
            author_role: Role::Manager,
            text: "hi".into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let first = store.append_comment(1, comment.clone()).unwrap();
        let second = store.append_comment(1, comment).unwrap();
        assert_eq!(first.comments[0].id, 1);
        assert_eq!(second.comments[1].id, 2);
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let mut store = seeded();
        assert!(store.add_user(manager()).is_err());

        let same_email = User::new(2, "MAX@example.com", "Other", "Max", Role::Engineer);
        assert!(store.add_user(same_email).is_err());

        let fresh = User::new(2, "eve@example.com", "Eve", "Stone", Role::Engineer);
        store.add_user(fresh).unwrap();
        assert_eq!(store.list_users().unwrap().len(), 2);
    }
}
