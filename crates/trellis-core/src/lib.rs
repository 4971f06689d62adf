//! Core library for the Trellis change-plan manager.
//!
//! This crate provides the core business logic for managing change plans and
//! their dependency-ordered steps, including the flat-file plan store, data
//! models, the readiness engine, and error handling.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, creation results vs. updates, etc.)
//! while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trellis_core::{
//!     params::{CreatePlan, Id, NewStep},
//!     PlannerBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a planner instance
//! let mut planner = PlannerBuilder::new()
//!     .with_store_path(Some("plans.json"))
//!     .build()?;
//!
//! // Create a new plan with an initial step
//! let create_params = CreatePlan {
//!     name: "Database migration".to_string(),
//!     steps: vec![NewStep {
//!         title: "Back up production".to_string(),
//!         description: "Take a full snapshot before touching anything".to_string(),
//!         priority: Some("high".to_string()),
//!         ..Default::default()
//!     }],
//! };
//!
//! let plan = planner.create_plan(&create_params)?;
//! println!("Created plan: {}", plan);
//!
//! // Ask the readiness engine what to work on next
//! let next = planner.get_next_step(&Id { id: plan.id.clone() })?;
//! println!("{next}");
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod graph;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

// Re-export commonly used types
pub use display::{CreateResult, DeleteResult, LocalDateTime, OperationStatus, PlanList, SearchResults};
pub use error::{PlannerError, Result};
pub use graph::{BlockedStep, NextStep};
pub use models::{ChangePlan, ExportedPlan, Priority, StatusFilter, Step};
pub use params::{
    AddStep, CreatePlan, Id, ImportPlan, NewStep, SearchPlans, StepRef, UpdateStep,
};
pub use planner::{MarkOutcome, Planner, PlannerBuilder, UpdateOutcome};
pub use store::PlanStore;
