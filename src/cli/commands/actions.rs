//! Actions command - Show the status changes the acting user may make

use std::path::Path;

use crate::errors::Result;
use crate::workflow;

use super::{open_store, print_json, require_actor};

pub async fn run(cwd: Option<&Path>, as_user: Option<u64>, id: u64, json: bool) -> Result<()> {
    let store = open_store(cwd)?;
    let (_, actor) = require_actor(&store, as_user)?;
    let actions = workflow::available_actions(&store, id, &actor)?;

    if json {
        return print_json(&actions);
    }

    if actions.is_empty() {
        println!("No status changes available");
        return Ok(());
    }
    for action in &actions {
        println!("{:<22} -> {}", action.label, action.status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::*;
    use crate::schemas::{Defect, DefectStatus, Role, User};
    use crate::store::{DefectStore, FileStore};

    #[tokio::test]
    async fn test_actions_respect_visibility() {
        let temp = workspace().await;
        let mut store = FileStore::new(temp.path());
        let manager = User::new(MANAGER_ID, "max@example.com", "Max", "Berg", Role::Manager);
        store
            .insert_defect(
                Defect::new(1, "Loose rail".into(), "Stair B".into(), "Riverside".into(), &manager)
                    .with_assignee(Some(ENGINEER_ID))
                    .with_status(DefectStatus::InProgress),
            )
            .unwrap();

        run(Some(temp.path()), Some(ENGINEER_ID), 1, true).await.unwrap();
        run(Some(temp.path()), Some(MANAGER_ID), 1, false).await.unwrap();

        let err = run(Some(temp.path()), Some(OBSERVER_ID), 1, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DEFECT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_actions_unknown_user() {
        let temp = workspace().await;
        let err = run(Some(temp.path()), Some(42), 1, false).await.unwrap_err();
        assert_eq!(err.code(), "USER_NOT_FOUND");
    }
}
