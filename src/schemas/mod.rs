//! Schema types for defectctl
//!
//! Serialized forms use the same snake_case vocabulary as the REST API.

mod config;
mod defect;
mod user;

pub use config::Config;
pub use defect::{Comment, Defect, DefectStatus, Priority};
pub use user::{Role, User};
