//! Parameter structures for Trellis operations.
//!
//! This module contains shared parameter structures used across interfaces
//! (CLI, MCP) without framework-specific derives. Interface layers wrap
//! these types to add their own derives (clap `Args`, schemars
//! `JsonSchema`) and convert into them, keeping the core free of framework
//! dependencies. JSON schema generation is available behind the `schema`
//! feature for the MCP surface.
//!
//! Enum-like fields (`priority`, `status`) arrive as plain strings and are
//! parsed by the `validate` methods, so schema-level validation stays at
//! the transport boundary while semantic validation stays here.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{Priority, StatusFilter},
};

fn parse_priority(value: Option<&str>) -> Result<Option<Priority>> {
    match value {
        None => Ok(None),
        Some(s) => s
            .parse::<Priority>()
            .map(Some)
            .map_err(|_| {
                PlannerError::invalid_input(
                    "priority",
                    format!("Invalid priority: {s}. Must be 'high', 'medium', or 'low'"),
                )
            }),
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(
            field,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

/// Generic parameters for operations requiring just a plan ID.
///
/// Used for get_plan, get_next_step, delete_plan, and export_plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: String,
}

/// A step definition inside a plan-creation batch.
///
/// Step identifiers are assigned positionally (creation-order index), so
/// `depends_on` entries may reference any step of the same batch by its
/// future identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NewStep {
    /// Title of the step (required)
    pub title: String,
    /// Detailed description of the step (required)
    pub description: String,
    /// Optional free-form context for the step
    pub context: Option<String>,
    /// IDs of steps in the same plan that must complete first
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Priority ('high', 'medium', or 'low'); defaults to medium
    pub priority: Option<String>,
}

impl NewStep {
    /// Validate the step definition and return its parsed priority.
    pub fn validate(&self) -> Result<Priority> {
        require_non_empty("title", &self.title)?;
        require_non_empty("description", &self.description)?;
        Ok(parse_priority(self.priority.as_deref())?.unwrap_or_default())
    }
}

/// Parameters for creating a new plan with its initial batch of steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    /// Initial steps, in order; may be empty
    #[serde(default)]
    pub steps: Vec<NewStep>,
}

/// Parameters for searching plans by text and completion status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchPlans {
    /// Case-insensitive term matched against plan names and step titles,
    /// descriptions, and context
    pub search_term: Option<String>,
    /// Completion filter: 'all' (default), 'active', or 'completed'
    pub status: Option<String>,
}

impl SearchPlans {
    /// Validate and parse the status filter.
    pub fn validate(&self) -> Result<StatusFilter> {
        match self.status.as_deref() {
            None => Ok(StatusFilter::default()),
            Some(s) => s.parse::<StatusFilter>().map_err(|_| {
                PlannerError::invalid_input(
                    "status",
                    format!("Invalid status: {s}. Must be 'all', 'active', or 'completed'"),
                )
            }),
        }
    }
}

/// Parameters identifying a step within a plan.
///
/// Used for mark_step_complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepRef {
    /// ID of the plan containing the step
    pub plan_id: String,
    /// ID of the step within the plan
    pub step_id: String,
}

/// Parameters for appending a step to an existing plan.
///
/// Dependencies may only reference steps that already exist in the plan;
/// the new step's identifier is assigned by the plan's counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddStep {
    /// ID of the plan to add the step to
    pub plan_id: String,
    /// Title of the step (required)
    pub title: String,
    /// Detailed description of the step (required)
    pub description: String,
    /// Optional free-form context for the step
    pub context: Option<String>,
    /// IDs of existing steps in the plan that must complete first
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Priority ('high', 'medium', or 'low'); defaults to medium
    pub priority: Option<String>,
}

impl AddStep {
    /// Validate the parameters and return the parsed priority.
    pub fn validate(&self) -> Result<Priority> {
        require_non_empty("title", &self.title)?;
        require_non_empty("description", &self.description)?;
        Ok(parse_priority(self.priority.as_deref())?.unwrap_or_default())
    }
}

/// Parameters for updating an existing step.
///
/// Only the supplied fields are applied. A request whose every supplied
/// field already holds the requested value is reported as a no-op, not an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// ID of the plan containing the step
    pub plan_id: String,
    /// ID of the step to update
    pub step_id: String,
    /// Updated title of the step
    pub title: Option<String>,
    /// Updated description of the step
    pub description: Option<String>,
    /// Updated free-form context
    pub context: Option<String>,
    /// Replacement dependency list (validated against the plan's current
    /// steps, excluding this step)
    pub depends_on: Option<Vec<String>>,
    /// Updated priority ('high', 'medium', or 'low')
    pub priority: Option<String>,
    /// Completion flag. Setting it to true fails unless every dependency
    /// is already complete; setting it to false clears the completion
    /// timestamp.
    pub completed: Option<bool>,
}

impl UpdateStep {
    /// Validate the parameters and return the parsed priority, if any.
    pub fn validate(&self) -> Result<Option<Priority>> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(description) = &self.description {
            require_non_empty("description", description)?;
        }
        parse_priority(self.priority.as_deref())
    }
}

/// Parameters for importing a serialized plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ImportPlan {
    /// Serialized plan record or export envelope (JSON)
    pub data: String,
    /// Replace an existing plan with the same ID instead of failing
    #[serde(default)]
    pub overwrite: bool,
}
