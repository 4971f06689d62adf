//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! The Display implementations provide:
//! - Markdown-formatted output for rich terminal display
//! - Consistent formatting with status icons and structured sections
//! - Context-aware display behavior for different use cases

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    graph::NextStep,
    models::{ChangePlan, ExportedPlan, Priority, Step},
};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ChangePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        // Metadata section
        writeln!(
            f,
            "- Progress: {}/{} steps complete",
            self.completed_steps(),
            self.total_steps()
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.steps.is_empty() {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{}", step)?;
            }
        } else {
            writeln!(f, "\nNo steps in this plan.")?;
        }

        Ok(())
    }
}

impl Step {
    /// Format the step using the clean, compact display format.
    ///
    /// This uses the same format whether the step is displayed standalone
    /// or within a plan context.
    fn fmt_step(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        if !self.depends_on.is_empty() {
            writeln!(f, "- Depends on: {}", self.depends_on.join(", "))?;
        }
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f, "#### Context")?;
            writeln!(f)?;
            writeln!(f, "{}", self.context)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_step(f)
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::Ready { step } => {
                writeln!(f, "Next step to work on:")?;
                writeln!(f)?;
                write!(f, "{step}")
            }
            NextStep::Blocked { blocked } => {
                writeln!(
                    f,
                    "No step is ready. {} step(s) are waiting on dependencies:",
                    blocked.len()
                )?;
                writeln!(f)?;
                for entry in blocked {
                    writeln!(
                        f,
                        "- {}. {} (waiting on: {})",
                        entry.id,
                        entry.title,
                        entry.waiting_on.join(", ")
                    )?;
                }
                Ok(())
            }
            NextStep::AllComplete => {
                writeln!(f, "All steps are complete. Nothing left to do.")
            }
        }
    }
}

impl fmt::Display for ExportedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Exports are consumed as data, so Display emits the JSON payload
        // itself rather than a markdown rendering.
        match serde_json::to_string_pretty(self) {
            Ok(json) => writeln!(f, "{json}"),
            Err(_) => Err(fmt::Error),
        }
    }
}
