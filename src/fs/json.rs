//! JSON file operations
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DefectError, Result};
use crate::schemas::{Config, Defect, User};

use super::paths::{get_config_path, get_defect_json_path, get_defects_dir, get_users_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file is not valid JSON or does not match the
///   expected shape (including status values outside the enumeration)
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DefectError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            DefectError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        DefectError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| DefectError::InvalidJson(e.to_string()))?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write atomically: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file, or defaults if it doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Read users.json. A missing file means no users yet.
pub fn read_users(root: &Path) -> Result<Vec<User>> {
    let path = get_users_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(&path)
}

/// Overwrite users.json.
pub fn write_users(root: &Path, users: &[User]) -> Result<()> {
    write_json(&get_users_path(root), &users)
}

/// Read a defect.json file.
///
/// # Errors
/// * `DefectNotFound` - If the defect has no file
pub fn read_defect(root: &Path, id: u64) -> Result<Defect> {
    let path = get_defect_json_path(root, id);
    read_json(&path).map_err(|e| match e {
        DefectError::FileNotFound(_) => DefectError::DefectNotFound(id),
        other => other,
    })
}

/// Write a defect.json file.
pub fn write_defect(root: &Path, defect: &Defect) -> Result<()> {
    write_json(&get_defect_json_path(root, defect.id), defect)
}

/// Ids of every stored defect, ascending. Directories whose name is not a
/// number are ignored.
pub fn list_defect_ids(root: &Path) -> Result<Vec<u64>> {
    let dir = get_defects_dir(root);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(id) = entry.file_name().to_str().and_then(|n| n.parse::<u64>().ok()) {
            ids.push(id);
        }
    }
    ids.sort_unstable();
    Ok(ids)
}
