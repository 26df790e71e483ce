//! Config schema - Configuration for defectctl

use serde::{Deserialize, Serialize};

use super::Priority;

/// Main configuration for defectctl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default page size for `list`
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound applied to any requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Priority given to new defects when none is specified
    #[serde(default)]
    pub default_priority: Priority,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            page_size: 20,
            max_page_size: 100,
            default_priority: Priority::Medium,
        }
    }
}
