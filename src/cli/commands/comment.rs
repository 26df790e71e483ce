//! Comment command - Add a comment to a defect

use std::path::Path;

use crate::errors::Result;
use crate::workflow;

use super::{open_store, require_actor};

pub async fn run(
    cwd: Option<&Path>,
    as_user: Option<u64>,
    id: u64,
    text: &str,
    dry_run: bool,
) -> Result<()> {
    let mut store = open_store(cwd)?;
    let (user, _) = require_actor(&store, as_user)?;

    if dry_run {
        tracing::info!("[DRY RUN] would comment on defect {} as {}", id, user.full_name());
        return Ok(());
    }

    let defect = workflow::add_comment(&mut store, id, &user, text)?;
    println!(
        "Comment added to defect #{} ({} total)",
        defect.id,
        defect.comments.len()
    );
    Ok(())
}
