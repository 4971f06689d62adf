//! Confirmation messages for operations without a richer payload.

use std::fmt;

/// Confirmation message for an operation whose full payload is not worth
/// echoing back, such as a plan import.
pub struct OperationStatus {
    message: String,
}

impl OperationStatus {
    /// Create a confirmation for a completed operation.
    pub fn success(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)
    }
}
