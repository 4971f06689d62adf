use tempfile::TempDir;
use trellis_core::PlannerBuilder;

/// Helper function to create a test planner
pub fn create_test_planner() -> (TempDir, trellis_core::Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("plans.json");
    let planner = PlannerBuilder::new()
        .with_store_path(Some(&store_path))
        .build()
        .expect("Failed to create planner");
    (temp_dir, planner)
}
