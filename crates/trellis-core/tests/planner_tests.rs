use std::path::PathBuf;

use tempfile::TempDir;
use trellis_core::{
    params::{CreatePlan, Id, ImportPlan, NewStep, SearchPlans, StepRef, UpdateStep},
    NextStep, PlannerBuilder, Priority,
};

mod common;

/// Helper function to create a temporary directory and snapshot path
fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store_path = temp_dir.path().join("test_plans.json");
    (temp_dir, store_path)
}

fn step(title: &str, priority: Option<&str>, depends_on: &[&str]) -> NewStep {
    NewStep {
        title: title.to_string(),
        description: format!("Description for {title}"),
        priority: priority.map(str::to_string),
        depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
#[allow(clippy::too_many_lines)]
fn test_complete_plan_workflow() {
    let (_temp_dir, mut planner) = common::create_test_planner();

    // Create a plan with an initial dependency chain:
    // 0 (setup) <- 1 (migrate, high) <- 2 (verify)
    let plan = planner
        .create_plan(&CreatePlan {
            name: "Integration Test".to_string(),
            steps: vec![
                step("Set up staging", None, &[]),
                step("Run migration", Some("high"), &["0"]),
                step("Verify results", None, &["1"]),
            ],
        })
        .expect("Failed to create plan");
    assert_eq!(plan.total_steps(), 3);

    let plan_id = Id {
        id: plan.id.clone(),
    };

    // Only the root is ready; the high-priority step waits on it.
    match planner
        .get_next_step(&plan_id)
        .expect("Failed to get next step")
    {
        NextStep::Ready { step } => assert_eq!(step.id, "0"),
        other => panic!("Expected Ready, got {other:?}"),
    }

    // Work through the chain.
    planner
        .mark_step_complete(&StepRef {
            plan_id: plan.id.clone(),
            step_id: "0".to_string(),
        })
        .expect("Failed to complete setup");

    match planner
        .get_next_step(&plan_id)
        .expect("Failed to get next step")
    {
        NextStep::Ready { step } => {
            assert_eq!(step.id, "1");
            assert_eq!(step.priority, Priority::High);
        }
        other => panic!("Expected Ready, got {other:?}"),
    }

    planner
        .mark_step_complete(&StepRef {
            plan_id: plan.id.clone(),
            step_id: "1".to_string(),
        })
        .expect("Failed to complete migration");

    // Append a follow-up step while work is in flight.
    let added = planner
        .add_step(&trellis_core::params::AddStep {
            plan_id: plan.id.clone(),
            title: "Announce rollout".to_string(),
            description: "Notify the team once verification passes".to_string(),
            depends_on: vec!["2".to_string()],
            priority: Some("low".to_string()),
            ..Default::default()
        })
        .expect("Failed to add step");
    assert_eq!(added.id, "3");

    planner
        .mark_step_complete(&StepRef {
            plan_id: plan.id.clone(),
            step_id: "2".to_string(),
        })
        .expect("Failed to complete verification");

    match planner
        .get_next_step(&plan_id)
        .expect("Failed to get next step")
    {
        NextStep::Ready { step } => assert_eq!(step.id, "3"),
        other => panic!("Expected Ready, got {other:?}"),
    }

    planner
        .mark_step_complete(&StepRef {
            plan_id: plan.id.clone(),
            step_id: "3".to_string(),
        })
        .expect("Failed to complete announcement");

    match planner
        .get_next_step(&plan_id)
        .expect("Failed to get next step")
    {
        NextStep::AllComplete => {}
        other => panic!("Expected AllComplete, got {other:?}"),
    }

    // The plan now matches the completed filter.
    let results = planner
        .search_plans(&SearchPlans {
            search_term: None,
            status: Some("completed".to_string()),
        })
        .expect("Failed to search");
    assert_eq!(results.count, 1);
    assert_eq!(results.plans[0].id, plan.id);
}

#[test]
fn test_blocked_report_lists_waiting_steps() {
    let (_temp_dir, mut planner) = common::create_test_planner();

    // Two steps depending on each other: neither can ever be ready.
    let plan = planner
        .create_plan(&CreatePlan {
            name: "Deadlock".to_string(),
            steps: vec![step("A", None, &["1"]), step("B", None, &["0"])],
        })
        .expect("Failed to create plan");

    match planner
        .get_next_step(&Id { id: plan.id })
        .expect("Failed to get next step")
    {
        NextStep::Blocked { blocked } => {
            assert_eq!(blocked.len(), 2);
            assert_eq!(blocked[0].waiting_on, vec!["1".to_string()]);
            assert_eq!(blocked[1].waiting_on, vec!["0".to_string()]);
        }
        other => panic!("Expected Blocked, got {other:?}"),
    }
}

#[test]
fn test_state_survives_planner_restart() {
    let (_temp_dir, store_path) = create_test_environment();

    let plan_id = {
        let mut planner = PlannerBuilder::new()
            .with_store_path(Some(&store_path))
            .build()
            .expect("Failed to create planner");
        let plan = planner
            .create_plan(&CreatePlan {
                name: "Durable".to_string(),
                steps: vec![step("First", Some("high"), &[]), step("Second", None, &["0"])],
            })
            .expect("Failed to create plan");
        planner
            .mark_step_complete(&StepRef {
                plan_id: plan.id.clone(),
                step_id: "0".to_string(),
            })
            .expect("Failed to mark step");
        planner
            .update_step(&UpdateStep {
                plan_id: plan.id.clone(),
                step_id: "1".to_string(),
                context: Some("Carry over the staging credentials".to_string()),
                ..Default::default()
            })
            .expect("Failed to update step");
        plan.id
    };

    // A fresh planner sees all of the persisted state.
    let mut planner = PlannerBuilder::new()
        .with_store_path(Some(&store_path))
        .build()
        .expect("Failed to reopen planner");
    let plan = planner
        .get_plan(&Id {
            id: plan_id.clone(),
        })
        .expect("Failed to reload plan");
    assert!(plan.steps[0].completed);
    assert_eq!(plan.steps[1].context, "Carry over the staging credentials");

    // And the step counter still advances past the persisted identifiers.
    let added = planner
        .add_step(&trellis_core::params::AddStep {
            plan_id,
            title: "Third".to_string(),
            description: "Added after restart".to_string(),
            ..Default::default()
        })
        .expect("Failed to add step");
    assert_eq!(added.id, "2");
}

#[test]
fn test_export_import_between_planners() {
    let (_source_dir, mut source) = common::create_test_planner();
    let (_target_dir, mut target) = common::create_test_planner();

    let plan = source
        .create_plan(&CreatePlan {
            name: "Shared Plan".to_string(),
            steps: vec![step("First", None, &[]), step("Second", Some("low"), &["0"])],
        })
        .expect("Failed to create plan");
    source
        .mark_step_complete(&StepRef {
            plan_id: plan.id.clone(),
            step_id: "0".to_string(),
        })
        .expect("Failed to mark step");

    let exported = source
        .export_plan(&Id {
            id: plan.id.clone(),
        })
        .expect("Failed to export");
    let data = serde_json::to_string_pretty(&exported).expect("Failed to serialize");

    let imported = target
        .import_plan(&ImportPlan {
            data,
            overwrite: false,
        })
        .expect("Failed to import");

    // Identifiers, timestamps, and completion state carry over verbatim.
    assert_eq!(imported.id, plan.id);
    assert_eq!(imported.created_at, plan.created_at);
    assert!(imported.steps[0].completed);
    assert_eq!(imported.steps[1].priority, Priority::Low);

    // The imported plan is immediately workable.
    match target
        .get_next_step(&Id { id: plan.id })
        .expect("Failed to get next step")
    {
        NextStep::Ready { step } => assert_eq!(step.id, "1"),
        other => panic!("Expected Ready, got {other:?}"),
    }
}
