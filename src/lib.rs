//! defectctl - Track construction defects through a role-gated review workflow
//!
//! This library provides the core functionality for the defectctl CLI, including:
//! - Schema definitions for defects, comments, users, and config
//! - Domain logic for the status machine and who may drive it
//! - Storage behind a trait, with file-backed and in-memory implementations
//! - Workflow operations that tie policy and storage together

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use errors::{DefectError, Result};
pub use schemas::{Comment, Config, Defect, DefectStatus, Priority, Role, User};
