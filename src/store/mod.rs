//! Defect storage
//!
//! The store holds the authoritative defect records. Status writes are a
//! compare-and-set on the status the caller validated against, so a
//! transition decided on a stale read is reported instead of applied.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use crate::schemas::{Comment, Defect, DefectStatus, User};

/// Outcome of a compare-and-set status write
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Status written; the stored defect after the write
    Applied(Defect),
    /// Stored status no longer matched the expected one; nothing written
    Conflict { actual: DefectStatus },
}

/// Access to authoritative defect and user records
pub trait DefectStore {
    /// Fetch a defect by id
    fn get_defect(&self, id: u64) -> Result<Defect>;

    /// Every stored defect, ascending by id
    fn list_defects(&self) -> Result<Vec<Defect>>;

    /// Id a newly created defect should take
    fn next_defect_id(&self) -> Result<u64>;

    /// Store a new defect. Fails if the id is taken.
    fn insert_defect(&mut self, defect: Defect) -> Result<()>;

    /// Write `new_status` (and a fresh `updated_at`) if the stored status is
    /// still `expected`.
    fn apply_transition(
        &mut self,
        id: u64,
        expected: DefectStatus,
        new_status: DefectStatus,
    ) -> Result<ApplyOutcome>;

    /// Copy the editable details of `edited` onto the stored defect and
    /// refresh `updated_at`. The stored status and comments are kept.
    fn update_details(&mut self, id: u64, edited: &Defect) -> Result<Defect>;

    /// Append a comment to the stored defect. The comment id is reassigned
    /// against the stored comment list.
    fn append_comment(&mut self, id: u64, comment: Comment) -> Result<Defect>;

    /// Fetch a user by id
    fn get_user(&self, id: u64) -> Result<User>;

    /// Every registered user, ascending by id
    fn list_users(&self) -> Result<Vec<User>>;

    /// Register a user. Fails if the id or email is taken.
    fn add_user(&mut self, user: User) -> Result<()>;
}

/// Shared duplicate check for `add_user` implementations.
pub(crate) fn check_new_user(existing: &[User], user: &User) -> Result<()> {
    use crate::errors::DefectError;

    if existing.iter().any(|u| u.id == user.id) {
        return Err(DefectError::InvalidInput(format!(
            "user id {} already exists",
            user.id
        )));
    }
    if existing.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
        return Err(DefectError::InvalidInput(format!(
            "email {} already registered",
            user.email
        )));
    }
    Ok(())
}

/// Shared compare-and-set used by both stores.
pub(crate) fn compare_and_set(
    stored: &Defect,
    expected: DefectStatus,
    new_status: DefectStatus,
) -> ApplyOutcome {
    if stored.status != expected {
        return ApplyOutcome::Conflict {
            actual: stored.status,
        };
    }
    ApplyOutcome::Applied(stored.clone().with_status(new_status))
}
