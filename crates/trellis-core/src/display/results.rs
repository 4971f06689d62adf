//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update, and delete operations with consistent messaging and resource
//! display. Outcome enums returned by the planner also get their Display
//! implementations here.

use std::fmt;

use crate::{
    models::{ChangePlan, Step},
    planner::{MarkOutcome, UpdateOutcome},
};

/// Wrapper type for displaying the result of create operations.
///
/// This provides consistent formatting for creation results,
/// including success messages and the created resource information.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<ChangePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added step with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
///
/// This provides consistent formatting for deletion results,
/// including confirmation messages and resource identification.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ChangePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Updated { step, changes } => {
                writeln!(f, "Updated step with ID: {}", step.id)?;
                if !changes.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "Changes made:")?;
                    for change in changes {
                        writeln!(f, "- {change}")?;
                    }
                }
                writeln!(f)?;
                write!(f, "{step}")
            }
            UpdateOutcome::NoChanges { step } => {
                writeln!(f, "No changes applied to step with ID: {}", step.id)?;
                writeln!(f)?;
                write!(f, "{step}")
            }
        }
    }
}

impl fmt::Display for MarkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkOutcome::Completed { step } => {
                writeln!(f, "Marked step '{}' (ID: {}) complete", step.title, step.id)
            }
            MarkOutcome::AlreadyComplete { step } => {
                writeln!(
                    f,
                    "Step '{}' (ID: {}) was already complete",
                    step.title, step.id
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Priority;

    fn sample_step() -> Step {
        Step {
            id: "0".to_string(),
            title: "Ship it".to_string(),
            description: "Release the new version".to_string(),
            context: String::new(),
            priority: Priority::High,
            depends_on: vec![],
            completed: false,
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn create_result_display() {
        let result = CreateResult::new(sample_step());
        let output = format!("{result}");
        assert!(output.contains("Added step with ID: 0"));
        assert!(output.contains("Ship it"));
    }

    #[test]
    fn update_outcome_display_lists_changes() {
        let outcome = UpdateOutcome::Updated {
            step: sample_step(),
            changes: vec!["Updated title".to_string(), "Marked complete".to_string()],
        };
        let output = format!("{outcome}");
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Updated title"));
        assert!(output.contains("- Marked complete"));
    }

    #[test]
    fn no_changes_display() {
        let outcome = UpdateOutcome::NoChanges {
            step: sample_step(),
        };
        assert!(format!("{outcome}").contains("No changes applied to step with ID: 0"));
    }

    #[test]
    fn mark_outcome_display() {
        let completed = MarkOutcome::Completed {
            step: sample_step(),
        };
        assert!(format!("{completed}").contains("Marked step 'Ship it' (ID: 0) complete"));

        let already = MarkOutcome::AlreadyComplete {
            step: sample_step(),
        };
        assert!(format!("{already}").contains("already complete"));
    }
}
