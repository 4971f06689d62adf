//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Step;

/// Represents a complete change plan with metadata and steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangePlan {
    /// Opaque unique identifier, assigned at creation and immutable
    pub id: String,

    /// Name of the plan
    pub name: String,

    /// Associated steps, kept in insertion order across all operations
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Next sequential step identifier to assign. Incremented only on step
    /// addition and never decremented, so identifiers are never reused.
    #[serde(default)]
    pub next_step_id: u64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan or any of its steps was last modified (UTC)
    pub updated_at: Timestamp,
}

impl ChangePlan {
    /// Look up a step by its identifier.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Total number of steps in the plan.
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Number of completed steps in the plan.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Whether the plan counts as completed: it has at least one step and
    /// every step is complete.
    pub fn is_completed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.completed)
    }

    /// Reconciles the step-identifier counter after loading or importing a
    /// plan serialized without one. The counter never moves backwards.
    pub fn restore_step_counter(&mut self) {
        let max_assigned = self
            .steps
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max + 1);
        self.next_step_id = self
            .next_step_id
            .max(max_assigned)
            .max(self.steps.len() as u64);
    }
}

/// Timestamped envelope produced by plan export and accepted by import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedPlan {
    /// Timestamp of the export (UTC)
    pub exported_at: Timestamp,

    /// The full plan record
    pub plan: ChangePlan,
}
