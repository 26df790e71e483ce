//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{DefectError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the workspace, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `ConfigError` - If the file exists but cannot be parsed, or sets a
///   zero page size
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root).map_err(|e| match e {
        DefectError::InvalidJson(msg) => DefectError::ConfigError(msg),
        other => other,
    })?;

    if config.page_size == 0 || config.max_page_size == 0 {
        return Err(DefectError::ConfigError(
            "page_size and max_page_size must be at least 1".to_string(),
        ));
    }

    Ok(config)
}
