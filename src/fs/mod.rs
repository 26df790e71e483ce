//! File system utilities for defectctl
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    list_defect_ids, read_config, read_defect, read_json, read_users, write_defect, write_json,
    write_users,
};
pub use paths::{
    find_workspace_root, get_config_path, get_data_dir, get_defect_dir, get_defect_json_path,
    get_defects_dir, get_users_path, resolve_cwd, DATA_DIR,
};
