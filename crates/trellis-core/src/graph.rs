//! Dependency-graph validation and the readiness engine.
//!
//! Two concerns live here, both pure functions of plan state:
//!
//! - [`validate_dependencies`] checks the `depends_on` list of a single step
//!   against a set of known step identifiers (referential integrity plus the
//!   no-self-dependency rule).
//! - [`next_step`] selects the next actionable step of a plan: incomplete
//!   steps are filtered to those whose every dependency is complete, then
//!   the highest-priority one wins, with insertion order breaking ties.
//!
//! Only direct self-dependency is rejected; multi-hop cycles are not
//! detected. A plan that acquires one through dependency updates simply
//! reports every remaining step as blocked, which is observable and
//! non-destructive.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    error::{PlannerError, Result},
    models::{ChangePlan, Step},
};

/// Outcome of asking a plan for its next actionable step.
///
/// Both non-`Ready` variants are legitimate terminal states, not errors.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextStep {
    /// A step is ready to be worked on
    Ready { step: Step },

    /// Incomplete steps exist but every one has an unmet dependency
    Blocked { blocked: Vec<BlockedStep> },

    /// Every step in the plan is complete
    AllComplete,
}

/// An incomplete step held back by unmet dependencies.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockedStep {
    /// Step identifier
    pub id: String,

    /// Step title, for readable reporting
    pub title: String,

    /// Dependency identifiers that are not yet complete or do not resolve
    pub waiting_on: Vec<String>,
}

/// Validates the dependency list of a single step.
///
/// `known_ids` is the set of step identifiers the dependencies may refer
/// to. Callers choose it per operation: the whole batch at plan creation,
/// only pre-existing steps on step addition, and the full current step set
/// minus the step itself on a dependency update.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidInput`] if a dependency equals `own_id`
/// or does not appear in `known_ids`. Nothing is mutated on failure.
pub fn validate_dependencies(
    own_id: &str,
    depends_on: &[String],
    known_ids: &HashSet<&str>,
) -> Result<()> {
    for dep in depends_on {
        if dep == own_id {
            return Err(PlannerError::invalid_input(
                "depends_on",
                format!("step '{own_id}' cannot depend on itself"),
            ));
        }
        if !known_ids.contains(dep.as_str()) {
            return Err(PlannerError::invalid_input(
                "depends_on",
                format!("dependency '{dep}' does not reference an existing step"),
            ));
        }
    }
    Ok(())
}

/// Returns the dependencies of `depends_on` that are not currently
/// satisfied in `plan`: incomplete steps and identifiers that do not
/// resolve to any step.
pub fn unmet_dependencies(plan: &ChangePlan, depends_on: &[String]) -> Vec<String> {
    depends_on
        .iter()
        .filter(|dep| match plan.step(dep) {
            Some(step) => !step.completed,
            None => true,
        })
        .cloned()
        .collect()
}

/// Selects the next actionable step of a plan.
///
/// A step is ready when every entry of its `depends_on` resolves to a
/// completed step; an empty list is always ready, and an identifier that
/// resolves to no step counts as unmet. Among ready steps the highest
/// priority wins. The scan only replaces the candidate on a strict
/// priority improvement, so equal priorities keep insertion order.
///
/// This is a pure function of plan state and safe to call repeatedly.
pub fn next_step(plan: &ChangePlan) -> NextStep {
    let completed: HashSet<&str> = plan
        .steps
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.id.as_str())
        .collect();

    let incomplete: Vec<&Step> = plan.steps.iter().filter(|s| !s.completed).collect();
    if incomplete.is_empty() {
        return NextStep::AllComplete;
    }

    let ready: Vec<&Step> = incomplete
        .iter()
        .copied()
        .filter(|s| {
            s.depends_on
                .iter()
                .all(|dep| completed.contains(dep.as_str()))
        })
        .collect();

    if ready.is_empty() {
        let blocked = incomplete
            .iter()
            .map(|s| BlockedStep {
                id: s.id.clone(),
                title: s.title.clone(),
                waiting_on: s
                    .depends_on
                    .iter()
                    .filter(|dep| !completed.contains(dep.as_str()))
                    .cloned()
                    .collect(),
            })
            .collect();
        return NextStep::Blocked { blocked };
    }

    let mut best = ready[0];
    for step in &ready[1..] {
        if step.priority < best.priority {
            best = step;
        }
    }
    NextStep::Ready { step: best.clone() }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Priority;

    fn step(id: &str, priority: Priority, depends_on: &[&str], completed: bool) -> Step {
        Step {
            id: id.to_string(),
            title: format!("Step {id}"),
            description: format!("Description of step {id}"),
            context: String::new(),
            priority,
            depends_on: depends_on.iter().map(|s| (*s).to_string()).collect(),
            completed,
            created_at: Timestamp::now(),
            completed_at: completed.then(Timestamp::now),
        }
    }

    fn plan(steps: Vec<Step>) -> ChangePlan {
        let now = Timestamp::now();
        ChangePlan {
            id: "plan-test".to_string(),
            name: "Test Plan".to_string(),
            next_step_id: steps.len() as u64,
            steps,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_validate_rejects_self_dependency() {
        let known: HashSet<&str> = ["0", "1"].into_iter().collect();
        let deps = vec!["0".to_string()];
        let result = validate_dependencies("0", &deps, &known);
        match result.unwrap_err() {
            PlannerError::InvalidInput { field, reason } => {
                assert_eq!(field, "depends_on");
                assert!(reason.contains("cannot depend on itself"));
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_dependency() {
        let known: HashSet<&str> = ["0"].into_iter().collect();
        let deps = vec!["7".to_string()];
        let result = validate_dependencies("1", &deps, &known);
        match result.unwrap_err() {
            PlannerError::InvalidInput { reason, .. } => {
                assert!(reason.contains("'7'"));
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_known_dependencies() {
        let known: HashSet<&str> = ["0", "1", "2"].into_iter().collect();
        let deps = vec!["0".to_string(), "2".to_string()];
        assert!(validate_dependencies("1", &deps, &known).is_ok());
    }

    #[test]
    fn test_validate_accepts_empty_dependencies() {
        let known: HashSet<&str> = HashSet::new();
        assert!(validate_dependencies("0", &[], &known).is_ok());
    }

    #[test]
    fn test_next_step_all_complete() {
        let p = plan(vec![
            step("0", Priority::Medium, &[], true),
            step("1", Priority::Medium, &["0"], true),
        ]);
        assert_eq!(next_step(&p), NextStep::AllComplete);
    }

    #[test]
    fn test_next_step_never_returns_step_with_incomplete_dependency() {
        let p = plan(vec![
            step("0", Priority::Low, &[], false),
            step("1", Priority::High, &["0"], false),
        ]);
        // Step 1 has higher priority but its dependency is incomplete.
        match next_step(&p) {
            NextStep::Ready { step } => assert_eq!(step.id, "0"),
            other => panic!("Expected a ready step, got {other:?}"),
        }
    }

    #[test]
    fn test_next_step_priority_wins_regardless_of_insertion_order() {
        let p = plan(vec![
            step("0", Priority::Low, &[], false),
            step("1", Priority::High, &[], false),
        ]);
        match next_step(&p) {
            NextStep::Ready { step } => assert_eq!(step.id, "1"),
            other => panic!("Expected a ready step, got {other:?}"),
        }
    }

    #[test]
    fn test_next_step_equal_priority_keeps_insertion_order() {
        let p = plan(vec![
            step("0", Priority::Medium, &[], false),
            step("1", Priority::Medium, &[], false),
            step("2", Priority::Medium, &[], false),
        ]);
        match next_step(&p) {
            NextStep::Ready { step } => assert_eq!(step.id, "0"),
            other => panic!("Expected a ready step, got {other:?}"),
        }
    }

    #[test]
    fn test_next_step_reports_blocked_with_unmet_dependencies() {
        let p = plan(vec![
            step("0", Priority::Medium, &["1"], false),
            step("1", Priority::Medium, &["0"], false),
        ]);
        match next_step(&p) {
            NextStep::Blocked { blocked } => {
                assert_eq!(blocked.len(), 2);
                assert_eq!(blocked[0].waiting_on, vec!["1".to_string()]);
                assert_eq!(blocked[1].waiting_on, vec!["0".to_string()]);
            }
            other => panic!("Expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_next_step_treats_dangling_dependency_as_unmet() {
        let p = plan(vec![step("0", Priority::High, &["99"], false)]);
        match next_step(&p) {
            NextStep::Blocked { blocked } => {
                assert_eq!(blocked[0].waiting_on, vec!["99".to_string()]);
            }
            other => panic!("Expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_next_step_becomes_ready_after_dependency_completes() {
        let mut p = plan(vec![
            step("0", Priority::High, &[], false),
            step("1", Priority::Medium, &["0"], false),
        ]);
        match next_step(&p) {
            NextStep::Ready { step } => assert_eq!(step.id, "0"),
            other => panic!("Expected step 0, got {other:?}"),
        }

        p.steps[0].completed = true;
        match next_step(&p) {
            NextStep::Ready { step } => assert_eq!(step.id, "1"),
            other => panic!("Expected step 1, got {other:?}"),
        }

        p.steps[1].completed = true;
        assert_eq!(next_step(&p), NextStep::AllComplete);
    }

    #[test]
    fn test_unmet_dependencies_lists_incomplete_and_dangling() {
        let p = plan(vec![
            step("0", Priority::Medium, &[], true),
            step("1", Priority::Medium, &[], false),
        ]);
        let deps = vec!["0".to_string(), "1".to_string(), "9".to_string()];
        assert_eq!(
            unmet_dependencies(&p, &deps),
            vec!["1".to_string(), "9".to_string()]
        );
    }
}
