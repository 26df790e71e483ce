//! JSON-file store rooted at a workspace's `.defectctl/` directory

use std::path::{Path, PathBuf};

use crate::errors::{DefectError, Result};
use crate::fs;
use crate::schemas::{Comment, Defect, DefectStatus, User};

use super::{check_new_user, compare_and_set, ApplyOutcome, DefectStore};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store of the workspace at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// Open the store of the workspace enclosing `cwd`
    pub fn discover(cwd: &Path) -> Result<Self> {
        Ok(Self::new(fs::find_workspace_root(cwd)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DefectStore for FileStore {
    fn get_defect(&self, id: u64) -> Result<Defect> {
        fs::read_defect(&self.root, id)
    }

    fn list_defects(&self) -> Result<Vec<Defect>> {
        fs::list_defect_ids(&self.root)?
            .into_iter()
            .map(|id| fs::read_defect(&self.root, id))
            .collect()
    }

    fn next_defect_id(&self) -> Result<u64> {
        Ok(fs::list_defect_ids(&self.root)?.last().copied().unwrap_or(0) + 1)
    }

    fn insert_defect(&mut self, defect: Defect) -> Result<()> {
        if fs::get_defect_json_path(&self.root, defect.id).exists() {
            return Err(DefectError::InvalidInput(format!(
                "defect {} already exists",
                defect.id
            )));
        }
        fs::write_defect(&self.root, &defect)?;
        tracing::debug!(defect_id = defect.id, "stored new defect");
        Ok(())
    }

    fn apply_transition(
        &mut self,
        id: u64,
        expected: DefectStatus,
        new_status: DefectStatus,
    ) -> Result<ApplyOutcome> {
        let stored = fs::read_defect(&self.root, id)?;
        let outcome = compare_and_set(&stored, expected, new_status);
        match &outcome {
            ApplyOutcome::Applied(next) => {
                fs::write_defect(&self.root, next)?;
                tracing::debug!(defect_id = id, from = %expected, to = %new_status, "status written");
            }
            ApplyOutcome::Conflict { actual } => {
                tracing::debug!(defect_id = id, %expected, %actual, "status write refused");
            }
        }
        Ok(outcome)
    }

    fn update_details(&mut self, id: u64, edited: &Defect) -> Result<Defect> {
        let stored = fs::read_defect(&self.root, id)?.with_details_of(edited);
        fs::write_defect(&self.root, &stored)?;
        tracing::debug!(defect_id = id, "details written");
        Ok(stored)
    }

    fn append_comment(&mut self, id: u64, mut comment: Comment) -> Result<Defect> {
        let mut stored = fs::read_defect(&self.root, id)?;
        comment.id = stored.next_comment_id();
        stored.comments.push(comment);
        fs::write_defect(&self.root, &stored)?;
        Ok(stored)
    }

    fn get_user(&self, id: u64) -> Result<User> {
        fs::read_users(&self.root)?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or(DefectError::UserNotFound(id))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut users = fs::read_users(&self.root)?;
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    fn add_user(&mut self, user: User) -> Result<()> {
        let mut users = fs::read_users(&self.root)?;
        check_new_user(&users, &user)?;
        users.push(user);
        fs::write_users(&self.root, &users)
    }
}
