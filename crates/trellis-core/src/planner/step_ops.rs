//! Step operations for the Planner.

use std::collections::HashSet;

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    graph::{self, NextStep},
    models::Step,
    params::{AddStep, Id, StepRef, UpdateStep},
};

/// Result of an update_step call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// At least one field changed; the plan was stamped and persisted
    Updated {
        step: Step,
        /// Human-readable description of each applied change
        changes: Vec<String>,
    },
    /// Every supplied field already held the requested value; nothing was
    /// stamped or persisted
    NoChanges { step: Step },
}

/// Result of a mark_step_complete call.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkOutcome {
    /// The step transitioned to complete
    Completed { step: Step },
    /// The step was already complete; nothing was persisted
    AlreadyComplete { step: Step },
}

impl Planner {
    /// Appends a new step to a plan.
    ///
    /// The identifier is taken from the plan's counter, so it is never
    /// reused even if steps were created and completed before. Dependencies
    /// may only reference steps that already exist in the plan, which rules
    /// out self-dependency and forward references at addition time.
    pub fn add_step(&mut self, params: &AddStep) -> Result<Step> {
        let priority = params.validate()?;
        let plan =
            self.store
                .get_mut(&params.plan_id)
                .ok_or_else(|| PlannerError::PlanNotFound {
                    id: params.plan_id.clone(),
                })?;

        let id = plan.next_step_id.to_string();
        let known: HashSet<&str> = plan.steps.iter().map(|s| s.id.as_str()).collect();
        graph::validate_dependencies(&id, &params.depends_on, &known)?;

        let now = Timestamp::now();
        let step = Step {
            id,
            title: params.title.clone(),
            description: params.description.clone(),
            context: params.context.clone().unwrap_or_default(),
            priority,
            depends_on: params.depends_on.clone(),
            completed: false,
            created_at: now,
            completed_at: None,
        };

        plan.next_step_id += 1;
        plan.steps.push(step.clone());
        plan.updated_at = now;

        debug!("added step '{}' to plan '{}'", step.id, params.plan_id);
        self.store.persist()?;
        Ok(step)
    }

    /// Computes the next actionable step of a plan.
    ///
    /// Read-only: consults the readiness engine without mutating anything.
    pub fn get_next_step(&self, params: &Id) -> Result<NextStep> {
        let plan = self
            .store
            .get(&params.id)
            .ok_or_else(|| PlannerError::PlanNotFound {
                id: params.id.clone(),
            })?;
        Ok(graph::next_step(plan))
    }

    /// Applies the supplied field updates to a step.
    ///
    /// Each supplied field is compared against the current value; when
    /// nothing actually changes the call reports [`UpdateOutcome::NoChanges`]
    /// without stamping `updated_at` or persisting. A completion transition
    /// to true is rejected while any dependency is incomplete.
    pub fn update_step(&mut self, params: &UpdateStep) -> Result<UpdateOutcome> {
        let priority = params.validate()?;
        let plan =
            self.store
                .get_mut(&params.plan_id)
                .ok_or_else(|| PlannerError::PlanNotFound {
                    id: params.plan_id.clone(),
                })?;

        let index = plan
            .steps
            .iter()
            .position(|s| s.id == params.step_id)
            .ok_or_else(|| PlannerError::StepNotFound {
                plan_id: params.plan_id.clone(),
                step_id: params.step_id.clone(),
            })?;

        // Validate before mutating anything.
        if let Some(depends_on) = &params.depends_on {
            if *depends_on != plan.steps[index].depends_on {
                let known: HashSet<&str> = plan
                    .steps
                    .iter()
                    .map(|s| s.id.as_str())
                    .filter(|id| *id != params.step_id)
                    .collect();
                graph::validate_dependencies(&params.step_id, depends_on, &known)?;
            }
        }
        if params.completed == Some(true) && !plan.steps[index].completed {
            // The invariant is checked against the step's current
            // dependency list; a depends_on supplied in the same request
            // takes effect for future completions, not this one.
            let unmet = graph::unmet_dependencies(plan, &plan.steps[index].depends_on);
            if !unmet.is_empty() {
                return Err(PlannerError::invalid_input(
                    "completed",
                    format!(
                        "cannot complete step '{}': unmet dependencies: {}",
                        params.step_id,
                        unmet.join(", ")
                    ),
                ));
            }
        }

        let now = Timestamp::now();
        let mut changes = Vec::new();
        {
            let step = &mut plan.steps[index];

            if let Some(title) = &params.title {
                if *title != step.title {
                    step.title = title.clone();
                    changes.push("Updated title".to_string());
                }
            }
            if let Some(description) = &params.description {
                if *description != step.description {
                    step.description = description.clone();
                    changes.push("Updated description".to_string());
                }
            }
            if let Some(context) = &params.context {
                if *context != step.context {
                    step.context = context.clone();
                    changes.push("Updated context".to_string());
                }
            }
            if let Some(priority) = priority {
                if priority != step.priority {
                    step.priority = priority;
                    changes.push(format!("Updated priority to '{}'", priority.as_str()));
                }
            }
            if let Some(depends_on) = &params.depends_on {
                if *depends_on != step.depends_on {
                    step.depends_on = depends_on.clone();
                    changes.push("Updated dependencies".to_string());
                }
            }
            if let Some(completed) = params.completed {
                if completed != step.completed {
                    step.completed = completed;
                    if completed {
                        step.completed_at = Some(now);
                        changes.push("Marked complete".to_string());
                    } else {
                        step.completed_at = None;
                        changes.push("Reopened".to_string());
                    }
                }
            }
        }

        if changes.is_empty() {
            return Ok(UpdateOutcome::NoChanges {
                step: plan.steps[index].clone(),
            });
        }

        plan.updated_at = now;
        let step = plan.steps[index].clone();

        debug!(
            "updated step '{}' in plan '{}': {}",
            params.step_id,
            params.plan_id,
            changes.join(", ")
        );
        self.store.persist()?;
        Ok(UpdateOutcome::Updated { step, changes })
    }

    /// Marks a step complete.
    ///
    /// Convenience path equivalent to an update with `completed = true`.
    /// An already-complete step is reported as such without re-persisting;
    /// otherwise the same dependency-complete invariant applies.
    pub fn mark_step_complete(&mut self, params: &StepRef) -> Result<MarkOutcome> {
        let plan =
            self.store
                .get_mut(&params.plan_id)
                .ok_or_else(|| PlannerError::PlanNotFound {
                    id: params.plan_id.clone(),
                })?;

        let index = plan
            .steps
            .iter()
            .position(|s| s.id == params.step_id)
            .ok_or_else(|| PlannerError::StepNotFound {
                plan_id: params.plan_id.clone(),
                step_id: params.step_id.clone(),
            })?;

        if plan.steps[index].completed {
            return Ok(MarkOutcome::AlreadyComplete {
                step: plan.steps[index].clone(),
            });
        }

        let unmet = graph::unmet_dependencies(plan, &plan.steps[index].depends_on);
        if !unmet.is_empty() {
            return Err(PlannerError::invalid_input(
                "completed",
                format!(
                    "cannot complete step '{}': unmet dependencies: {}",
                    params.step_id,
                    unmet.join(", ")
                ),
            ));
        }

        let now = Timestamp::now();
        plan.steps[index].completed = true;
        plan.steps[index].completed_at = Some(now);
        plan.updated_at = now;
        let step = plan.steps[index].clone();

        debug!(
            "marked step '{}' complete in plan '{}'",
            params.step_id, params.plan_id
        );
        self.store.persist()?;
        Ok(MarkOutcome::Completed { step })
    }
}
