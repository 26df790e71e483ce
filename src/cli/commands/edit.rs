//! Edit command - Change a defect's details

use std::path::Path;

use crate::errors::{DefectError, Result};
use crate::schemas::Priority;
use crate::workflow::{self, DefectEdit};

use super::{open_store, parse_arg, print_json, require_actor, summary_line};

/// Raw edit arguments as they come off the command line
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<u64>,
    pub unassign: bool,
    pub due: Option<String>,
    pub clear_due: bool,
}

impl EditArgs {
    pub fn into_edit(self) -> Result<DefectEdit> {
        if self.unassign && self.assignee.is_some() {
            return Err(DefectError::InvalidInput(
                "--assignee and --unassign cannot be combined".to_string(),
            ));
        }
        if self.clear_due && self.due.is_some() {
            return Err(DefectError::InvalidInput(
                "--due and --clear-due cannot be combined".to_string(),
            ));
        }

        let assignee_id = if self.unassign {
            Some(None)
        } else {
            self.assignee.map(Some)
        };
        let due_date = if self.clear_due {
            Some(None)
        } else {
            self.due.map(Some)
        };

        Ok(DefectEdit {
            title: self.title,
            description: self.description,
            priority: self.priority.as_deref().map(parse_arg::<Priority>).transpose()?,
            assignee_id,
            due_date,
        })
    }
}

pub async fn run(
    cwd: Option<&Path>,
    as_user: Option<u64>,
    id: u64,
    args: EditArgs,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let mut store = open_store(cwd)?;
    let (_, actor) = require_actor(&store, as_user)?;
    let edit = args.into_edit()?;

    let defect = workflow::edit_defect(&mut store, id, &actor, edit, dry_run)?;

    if json {
        return print_json(&defect);
    }
    let prefix = if dry_run { "[DRY RUN] " } else { "" };
    println!("{}{}", prefix, summary_line(&defect));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::*;
    use crate::schemas::{Defect, DefectStatus, Role, User};
    use crate::store::{DefectStore, FileStore};

    fn seed(temp: &tempfile::TempDir) -> FileStore {
        let mut store = FileStore::new(temp.path());
        let manager = User::new(MANAGER_ID, "max@example.com", "Max", "Berg", Role::Manager);
        store
            .insert_defect(
                Defect::new(1, "Door sticks".into(), "Unit 4".into(), "Riverside".into(), &manager)
                    .with_assignee(Some(ENGINEER_ID))
                    .with_status(DefectStatus::InProgress),
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_assignee_edits_details() {
        let temp = workspace().await;
        let store = seed(&temp);
        let args = EditArgs {
            priority: Some("high".to_string()),
            due: Some("2030-06-01T00:00:00Z".to_string()),
            ..Default::default()
        };

        run(Some(temp.path()), Some(ENGINEER_ID), 1, args, false, false)
            .await
            .unwrap();

        let defect = store.get_defect(1).unwrap();
        assert_eq!(defect.priority, Priority::High);
        assert_eq!(defect.due_date.as_deref(), Some("2030-06-01T00:00:00+00:00"));
        assert_eq!(defect.status, DefectStatus::InProgress);
    }

    #[tokio::test]
    async fn test_observer_cannot_edit() {
        let temp = workspace().await;
        let store = seed(&temp);
        let args = EditArgs {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };

        // In progress is hidden from observers
        let err = run(Some(temp.path()), Some(OBSERVER_ID), 1, args, false, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DEFECT_NOT_FOUND");
        assert_eq!(store.get_defect(1).unwrap().title, "Door sticks");
    }

    #[test]
    fn test_into_edit() {
        let edit = EditArgs {
            unassign: true,
            clear_due: true,
            ..Default::default()
        }
        .into_edit()
        .unwrap();
        assert_eq!(edit.assignee_id, Some(None));
        assert_eq!(edit.due_date, Some(None));
        assert!(edit.title.is_none());

        let conflicting = EditArgs {
            assignee: Some(2),
            unassign: true,
            ..Default::default()
        };
        assert_eq!(conflicting.into_edit().unwrap_err().code(), "INVALID_INPUT");

        let bad_priority = EditArgs {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        assert!(bad_priority.into_edit().is_err());
    }
}
