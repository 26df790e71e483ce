//! Init command - Create the .defectctl workspace

use std::path::Path;

use crate::errors::{DefectError, Result};
use crate::fs::{get_config_path, get_data_dir, get_defects_dir, get_users_path, resolve_cwd, write_json};
use crate::schemas::{Config, User};

/// Create `.defectctl/` with a default config and an empty user list.
///
/// Existing defects are never touched, even with `force`.
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let data_dir = get_data_dir(&root);

    if data_dir.exists() && !force {
        return Err(DefectError::InvalidInput(format!(
            "{} already exists; use --force to reset config and users",
            data_dir.display()
        )));
    }

    if dry_run {
        tracing::info!("[DRY RUN] would initialize {}", data_dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(get_defects_dir(&root))?;
    write_json(&get_config_path(&root), &Config::default())?;
    write_json(&get_users_path(&root), &Vec::<User>::new())?;

    tracing::info!("initialized {}", data_dir.display());
    Ok(())
}
