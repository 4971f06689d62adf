//! High-level planner API for managing change plans and steps.
//!
//! This module provides the main [`Planner`] interface for the Trellis
//! plan-management system. The planner coordinates between the interface
//! layers and the plan store, implementing all business logic for plan and
//! step operations.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │     Planner     │    │    PlanStore    │
//! │   (CLI, MCP)    │───▶│ (plan_ops,      │───▶│ (flat-file      │
//! │                 │    │  step_ops)      │    │  snapshot)      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances
//! - [`plan_ops`]: Plan-level operations (create, list, get, search,
//!   delete, export, import)
//! - [`step_ops`]: Step-level operations (add, update, mark complete,
//!   next-step selection)
//!
//! Every mutation validates before applying (no partial mutation on
//! validation failure) and persists the full snapshot immediately after
//! applying. A persistence failure is reported after the in-memory change
//! is live; see [`crate::error::PlannerError::Storage`].

use std::path::Path;

pub mod builder;
pub mod plan_ops;
pub mod step_ops;


pub use builder::PlannerBuilder;
pub use step_ops::{MarkOutcome, UpdateOutcome};

use crate::store::PlanStore;

/// Main planner interface for managing change plans and their steps.
pub struct Planner {
    pub(crate) store: PlanStore,
}

impl Planner {
    /// Creates a new planner over an opened store.
    pub(crate) fn new(store: PlanStore) -> Self {
        Self { store }
    }

    /// Path of the snapshot file backing this planner.
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}
