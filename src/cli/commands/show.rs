//! Show command - Show a defect with its comments

use std::path::Path;

use crate::domain::{available_actions_for, is_overdue};
use crate::errors::Result;
use crate::store::DefectStore;
use crate::workflow;

use super::{open_store, print_json, require_actor};

/// Show details of a specific defect
pub async fn run(cwd: Option<&Path>, as_user: Option<u64>, id: u64, json: bool) -> Result<()> {
    let store = open_store(cwd)?;
    let (_, actor) = require_actor(&store, as_user)?;
    let defect = workflow::show_defect(&store, id, &actor)?;

    if json {
        return print_json(&defect);
    }

    let assignee = match defect.assignee_id {
        Some(assignee_id) => store
            .get_user(assignee_id)
            .map(|u| u.full_name())
            .unwrap_or_else(|_| format!("user {}", assignee_id)),
        None => "Unassigned".to_string(),
    };
    let overdue = if is_overdue(&defect, chrono::Utc::now()) {
        " (overdue)"
    } else {
        ""
    };

    println!("Defect #{}: {}", defect.id, defect.title);
    println!("  Status:    {}", defect.status.label());
    println!("  Priority:  {}", defect.priority);
    println!("  Project:   {}", defect.project);
    println!("  Creator:   {}", defect.creator);
    println!("  Assignee:  {}", assignee);
    println!(
        "  Due:       {}{}",
        defect.due_date.as_deref().unwrap_or("Not set"),
        overdue
    );
    println!("  Created:   {}", defect.created_at);
    println!("  Updated:   {}", defect.updated_at);
    println!();
    println!("{}", defect.description);
    println!();
    println!("Comments ({})", defect.comments.len());
    for comment in &defect.comments {
        println!(
            "  [{}] {} ({}): {}",
            comment.created_at,
            comment.author,
            comment.author_role.label(),
            comment.text
        );
    }

    let actions = available_actions_for(&defect, &actor);
    if !actions.is_empty() {
        println!();
        println!("Actions:");
        for action in actions {
            println!("  {:<22} -> {}", action.label, action.status);
        }
    }
    Ok(())
}
