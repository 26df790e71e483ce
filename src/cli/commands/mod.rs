//! CLI command implementations

pub mod actions;
pub mod comment;
pub mod create;
pub mod edit;
pub mod init;
pub mod list;
pub mod show;
pub mod stats;
pub mod status;
pub mod user;

use std::path::Path;

use serde::Serialize;

use crate::domain::Actor;
use crate::errors::{DefectError, Result};
use crate::fs::resolve_cwd;
use crate::schemas::{Defect, User};
use crate::store::FileStore;
use crate::workflow::resolve_actor;

/// Open the store of the workspace enclosing `cwd`.
pub(crate) fn open_store(cwd: Option<&Path>) -> Result<FileStore> {
    FileStore::discover(&resolve_cwd(cwd))
}

/// Resolve `--as` into the acting user.
pub(crate) fn require_actor(store: &FileStore, as_user: Option<u64>) -> Result<(User, Actor)> {
    let user_id = as_user.ok_or_else(|| {
        DefectError::InvalidInput("this command needs --as <USER_ID> (or DEFECTCTL_USER)".to_string())
    })?;
    resolve_actor(store, user_id)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| DefectError::InvalidJson(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

/// One-line summary used by list-style output
pub(crate) fn summary_line(defect: &Defect) -> String {
    format!(
        "#{:<5} {:<12} {:<7} {:<16} {}",
        defect.id,
        defect.status.to_string(),
        defect.priority.to_string(),
        defect.project,
        defect.title
    )
}

/// Parse a `FromStr` argument, reporting failures as invalid input.
pub(crate) fn parse_arg<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse().map_err(DefectError::InvalidInput)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Priority;

    #[test]
    fn test_parse_arg() {
        assert_eq!(parse_arg::<Priority>("high").unwrap(), Priority::High);
        let err = parse_arg::<Priority>("urgent").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_require_actor_needs_flag() {
        let store = FileStore::new("/nonexistent");
        let err = require_actor(&store, None).unwrap_err();
        assert!(err.to_string().contains("--as"));
    }
}
