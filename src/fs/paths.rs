//! Path resolution utilities for defectctl
//!
//! Provides functions to locate the workspace root and construct paths
//! to the files stored under `.defectctl/`.

use std::path::{Path, PathBuf};

use crate::errors::{DefectError, Result};

/// Name of the data directory at the workspace root
pub const DATA_DIR: &str = ".defectctl";

/// Find the workspace root containing a .defectctl directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `WorkspaceNotFound` - If no directory on the way up contains .defectctl
pub fn find_workspace_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| DefectError::WorkspaceNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(DATA_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(DefectError::WorkspaceNotFound(format!(
                    "Could not find a {} directory; run `defectctl init` first",
                    DATA_DIR
                )));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .defectctl directory.
pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("config.json")
}

/// Get the path to the users.json file.
pub fn get_users_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("users.json")
}

/// Get the path to the defects directory.
pub fn get_defects_dir(root: &Path) -> PathBuf {
    get_data_dir(root).join("defects")
}

/// Get the path to a specific defect's directory.
pub fn get_defect_dir(root: &Path, id: u64) -> PathBuf {
    get_defects_dir(root).join(id.to_string())
}

/// Get the path to a defect's defect.json file.
pub fn get_defect_json_path(root: &Path, id: u64) -> PathBuf {
    get_defect_dir(root, id).join("defect.json")
}
