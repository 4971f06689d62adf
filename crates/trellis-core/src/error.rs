//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Plan not found for the given ID
    #[error("Plan with ID '{id}' not found")]
    PlanNotFound { id: String },
    /// Step not found within the given plan
    #[error("Step with ID '{step_id}' not found in plan '{plan_id}'")]
    StepNotFound { plan_id: String, step_id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The snapshot write failed. The mutation that triggered it has already
    /// been applied in memory and is not rolled back, so the in-memory state
    /// is ahead of the durable state until the next successful persist.
    #[error("Storage error at '{path}': {source}. The change is applied in memory but was not persisted.")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Anything unanticipated
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlannerError {
    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a plan or step lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlanNotFound { .. } | Self::StepNotFound { .. }
        )
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
