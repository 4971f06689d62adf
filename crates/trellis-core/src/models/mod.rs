//! Data models for change plans and steps.
//!
//! This module contains the core domain models of the Trellis planning
//! system. Display implementations for these models live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation logic.
//!
//! A [`ChangePlan`] owns an ordered sequence of [`Step`]s. Step identifiers
//! are sequential, assigned at creation from the plan's `next_step_id`
//! counter, and never reused. Steps carry a [`Priority`] and a `depends_on`
//! list referencing other steps of the same plan; the readiness engine in
//! [`crate::graph`] interprets both when selecting the next actionable step.

pub mod filters;
pub mod plan;
pub mod priority;
pub mod step;

#[cfg(test)]
mod tests;

pub use filters::StatusFilter;
pub use plan::{ChangePlan, ExportedPlan};
pub use priority::Priority;
pub use step::Step;
