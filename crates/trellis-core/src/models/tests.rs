//! Tests for the models module.

use jiff::Timestamp;

use super::*;

fn test_step(id: &str, completed: bool) -> Step {
    Step {
        id: id.to_string(),
        title: format!("Step {id}"),
        description: "Do something".to_string(),
        context: String::new(),
        priority: Priority::Medium,
        depends_on: vec![],
        completed,
        created_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
        completed_at: None,
    }
}

fn test_plan(steps: Vec<Step>) -> ChangePlan {
    let next_step_id = steps.len() as u64;
    ChangePlan {
        id: "plan-1".to_string(),
        name: "Test Plan".to_string(),
        steps,
        next_step_id,
        created_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
        updated_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
    }
}

#[test]
fn test_priority_ordering_is_scheduling_order() {
    assert!(Priority::High < Priority::Medium);
    assert!(Priority::Medium < Priority::Low);

    let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
    priorities.sort();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Low]
    );
}

#[test]
fn test_priority_from_str() {
    assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
    assert_eq!("MEDIUM".parse::<Priority>(), Ok(Priority::Medium));
    assert_eq!("Low".parse::<Priority>(), Ok(Priority::Low));
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn test_priority_serde_lowercase() {
    assert_eq!(
        serde_json::to_string(&Priority::High).expect("serialize"),
        "\"high\""
    );
    let parsed: Priority = serde_json::from_str("\"low\"").expect("deserialize");
    assert_eq!(parsed, Priority::Low);
}

#[test]
fn test_priority_default_is_medium() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn test_step_serde_skips_empty_optionals() {
    let step = test_step("0", false);
    let json = serde_json::to_string(&step).expect("serialize");
    assert!(!json.contains("depends_on"));
    assert!(!json.contains("completed_at"));

    let mut step = test_step("1", true);
    step.depends_on = vec!["0".to_string()];
    step.completed_at = Some(Timestamp::from_second(1_700_000_100).expect("valid timestamp"));
    let json = serde_json::to_string(&step).expect("serialize");
    assert!(json.contains("depends_on"));
    assert!(json.contains("completed_at"));
}

#[test]
fn test_step_deserialize_with_defaults() {
    let json = r#"{
        "id": "0",
        "title": "Minimal",
        "description": "Bare record",
        "created_at": "2023-11-14T22:13:20Z"
    }"#;
    let step: Step = serde_json::from_str(json).expect("deserialize");
    assert_eq!(step.priority, Priority::Medium);
    assert!(step.depends_on.is_empty());
    assert!(!step.completed);
    assert!(step.completed_at.is_none());
    assert!(step.context.is_empty());
}

#[test]
fn test_plan_completion_requires_steps() {
    let empty = test_plan(vec![]);
    assert!(!empty.is_completed());

    let partial = test_plan(vec![test_step("0", true), test_step("1", false)]);
    assert!(!partial.is_completed());
    assert_eq!(partial.completed_steps(), 1);
    assert_eq!(partial.total_steps(), 2);

    let done = test_plan(vec![test_step("0", true), test_step("1", true)]);
    assert!(done.is_completed());
}

#[test]
fn test_restore_step_counter_never_moves_backwards() {
    let mut plan = test_plan(vec![test_step("0", false), test_step("5", false)]);
    plan.next_step_id = 0;
    plan.restore_step_counter();
    assert_eq!(plan.next_step_id, 6);

    // An already-advanced counter is preserved.
    plan.next_step_id = 10;
    plan.restore_step_counter();
    assert_eq!(plan.next_step_id, 10);
}

#[test]
fn test_restore_step_counter_with_non_numeric_ids() {
    let mut plan = test_plan(vec![test_step("alpha", false), test_step("beta", false)]);
    plan.next_step_id = 0;
    plan.restore_step_counter();
    // Falls back to the step count when no identifier parses.
    assert_eq!(plan.next_step_id, 2);
}

#[test]
fn test_status_filter_matches() {
    let empty = test_plan(vec![]);
    let active = test_plan(vec![test_step("0", false)]);
    let completed = test_plan(vec![test_step("0", true)]);

    assert!(StatusFilter::All.matches(&empty));
    assert!(StatusFilter::All.matches(&active));
    assert!(StatusFilter::All.matches(&completed));

    // A plan with no steps counts as active, not completed.
    assert!(StatusFilter::Active.matches(&empty));
    assert!(StatusFilter::Active.matches(&active));
    assert!(!StatusFilter::Active.matches(&completed));

    assert!(!StatusFilter::Completed.matches(&empty));
    assert!(!StatusFilter::Completed.matches(&active));
    assert!(StatusFilter::Completed.matches(&completed));
}

#[test]
fn test_status_filter_from_str() {
    assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!("Active".parse::<StatusFilter>(), Ok(StatusFilter::Active));
    assert_eq!(
        "COMPLETED".parse::<StatusFilter>(),
        Ok(StatusFilter::Completed)
    );
    assert!("archived".parse::<StatusFilter>().is_err());
}

#[test]
fn test_exported_plan_round_trip() {
    let plan = test_plan(vec![test_step("0", false)]);
    let envelope = ExportedPlan {
        exported_at: Timestamp::from_second(1_700_000_200).expect("valid timestamp"),
        plan: plan.clone(),
    };
    let json = serde_json::to_string(&envelope).expect("serialize");
    let parsed: ExportedPlan = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed.plan, plan);
}
