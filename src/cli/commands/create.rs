//! Create command - Report a new defect

use std::path::Path;

use crate::config::load_config;
use crate::errors::Result;
use crate::schemas::Priority;
use crate::store::DefectStore;
use crate::workflow::{self, NewDefect};

use super::{open_store, parse_arg, print_json, require_actor, summary_line};

/// Report a new defect as the acting user
pub async fn run(
    cwd: Option<&Path>,
    as_user: Option<u64>,
    draft: NewDefect,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let mut store = open_store(cwd)?;
    let config = load_config(store.root())?;
    let (user, _) = require_actor(&store, as_user)?;

    if dry_run {
        tracing::info!(
            "[DRY RUN] would create defect {} in {}",
            store.next_defect_id()?,
            draft.project
        );
        return Ok(());
    }

    let defect = workflow::create_defect(&mut store, &user, draft, &config)?;

    if json {
        return print_json(&defect);
    }
    println!("{}", summary_line(&defect));
    Ok(())
}

/// Build the draft from raw CLI arguments
pub fn draft_from_args(
    title: String,
    description: String,
    project: String,
    priority: Option<&str>,
    assignee: Option<u64>,
    due: Option<String>,
) -> Result<NewDefect> {
    let priority = priority.map(parse_arg::<Priority>).transpose()?;
    Ok(NewDefect {
        title,
        description,
        project,
        priority,
        assignee_id: assignee,
        due_date: due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::*;
    use crate::schemas::DefectStatus;
    use crate::store::FileStore;

    fn draft(priority: Option<&str>) -> NewDefect {
        draft_from_args(
            "Loose railing".to_string(),
            "Stairwell B".to_string(),
            "Riverside".to_string(),
            priority,
            Some(ENGINEER_ID),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_defect() {
        let temp = workspace().await;
        run(Some(temp.path()), Some(MANAGER_ID), draft(Some("high")), false, false)
            .await
            .unwrap();

        let defect = FileStore::new(temp.path()).get_defect(1).unwrap();
        assert_eq!(defect.status, DefectStatus::New);
        assert_eq!(defect.priority, Priority::High);
        assert_eq!(defect.assignee_id, Some(ENGINEER_ID));
    }

    #[tokio::test]
    async fn test_observer_cannot_create() {
        let temp = workspace().await;
        let err = run(Some(temp.path()), Some(OBSERVER_ID), draft(None), false, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_draft_rejects_unknown_priority() {
        let err = draft_from_args(
            "t".into(),
            "d".into(),
            "p".into(),
            Some("urgent"),
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
