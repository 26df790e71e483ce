//! Status command - Move a defect to a new status

use std::path::Path;

use crate::domain::{parse_status, TransitionRequest};
use crate::errors::Result;
use crate::workflow;

use super::{open_store, print_json, require_actor};

/// Request a status change.
///
/// Without `--expect`, the snapshot is the status the defect has when the
/// request is evaluated, so only a write racing this one can conflict.
pub async fn run(
    cwd: Option<&Path>,
    as_user: Option<u64>,
    id: u64,
    to: &str,
    expect: Option<&str>,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let mut store = open_store(cwd)?;
    let (_, actor) = require_actor(&store, as_user)?;

    let change = match expect {
        Some(snapshot) => {
            let request = TransitionRequest::parse(snapshot, to)?;
            workflow::change_status(&mut store, id, request, &actor, dry_run)?
        }
        None => {
            let requested = parse_status(to)?;
            workflow::change_status_from_current(&mut store, id, requested, &actor, dry_run)?
        }
    };

    if json {
        return print_json(&change);
    }
    let prefix = if change.dry_run { "[DRY RUN] " } else { "" };
    println!(
        "{}Defect #{}: {} -> {}",
        prefix,
        change.defect_id,
        change.from.label(),
        change.to.label()
    );
    Ok(())
}
