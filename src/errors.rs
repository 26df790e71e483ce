//! Error types for defectctl
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

use crate::domain::TransitionRejection;

/// Result type alias for defectctl operations
pub type Result<T> = std::result::Result<T, DefectError>;

/// Main error type for all defectctl operations
#[derive(Debug, Error)]
pub enum DefectError {
    /// No .defectctl directory found walking up from the working directory
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Defect does not exist in the store
    #[error("Defect not found: {0}")]
    DefectNotFound(u64),

    /// User does not exist in the store
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// Caller lacks rights for the requested operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request was computed against a stale status snapshot
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Status value outside the known enumeration
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Malformed or missing input (empty title, unknown role, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl DefectError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            DefectError::WorkspaceNotFound(_) => "WORKSPACE_NOT_FOUND",
            DefectError::InvalidJson(_) => "INVALID_JSON",
            DefectError::FileNotFound(_) => "FILE_NOT_FOUND",
            DefectError::ConfigError(_) => "CONFIG_ERROR",
            DefectError::DefectNotFound(_) => "DEFECT_NOT_FOUND",
            DefectError::UserNotFound(_) => "USER_NOT_FOUND",
            DefectError::Unauthorized(_) => "UNAUTHORIZED",
            DefectError::Conflict(_) => "CONFLICT",
            DefectError::InvalidStatus(_) => "INVALID_STATUS",
            DefectError::InvalidInput(_) => "INVALID_INPUT",
            DefectError::Io(_) => "IO_ERROR",
            DefectError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        DefectError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

impl From<TransitionRejection> for DefectError {
    fn from(rejection: TransitionRejection) -> Self {
        match rejection {
            TransitionRejection::Unauthorized { .. } => {
                DefectError::Unauthorized(rejection.to_string())
            }
            TransitionRejection::Conflict { .. } => DefectError::Conflict(rejection.to_string()),
            TransitionRejection::InvalidStatus(raw) => DefectError::InvalidStatus(raw),
        }
    }
}

/// Convert an error to an appropriate exit code
///
/// Uses the sysexits.h values so scripts can tell a refresh-and-retry
/// conflict apart from a permission failure.
pub fn to_exit_code(error: &DefectError) -> i32 {
    match error {
        DefectError::InvalidStatus(_) | DefectError::InvalidInput(_) => 65, // EX_DATAERR
        DefectError::Conflict(_) => 75,                                     // EX_TEMPFAIL
        DefectError::Unauthorized(_) => 77,                                 // EX_NOPERM
        _ => 1,
    }
}
