//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Priority;

/// Represents an individual step within a change plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Identifier unique within the owning plan. Assigned sequentially at
    /// creation time (decimal string of the creation-order index) and never
    /// reused or renumbered.
    pub id: String,

    /// Brief title/summary of the step
    pub title: String,

    /// Detailed description of the step
    pub description: String,

    /// Free-form context for the step (defaults to empty)
    #[serde(default)]
    pub context: String,

    /// Scheduling priority of the step
    #[serde(default)]
    pub priority: Priority,

    /// IDs of same-plan steps that must be complete before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Whether the step has been completed
    #[serde(default)]
    pub completed: bool,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was completed; present only while the step
    /// is completed, cleared when it transitions back to incomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl Step {
    /// Get the completion state with consistent icon formatting for display.
    pub fn status_icon(&self) -> &'static str {
        if self.completed { "✓ Done" } else { "○ Pending" }
    }
}
