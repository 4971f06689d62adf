//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain
//! objects with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{ChangePlan, StatusFilter};

/// Newtype wrapper for displaying collections of plans.
///
/// This provides clean Display formatting for plan collections without title
/// handling, allowing consumers to handle titles separately. Handles empty
/// collections gracefully. Plans are rendered one line each with a progress
/// summary rather than the full step listing.
pub struct PlanList(pub Vec<ChangePlan>);

impl PlanList {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan at the given index.
    pub fn get(&self, index: usize) -> Option<&ChangePlan> {
        self.0.get(index)
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangePlan> {
        self.0.iter()
    }
}

impl Index<usize> for PlanList {
    type Output = ChangePlan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanList {
    type Item = ChangePlan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanList {
    type Item = &'a ChangePlan;
    type IntoIter = std::slice::Iter<'a, ChangePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write_plan_summary(f, plan)?;
            }
            Ok(())
        }
    }
}

/// The outcome of a plan search, carrying the results together with the
/// criteria that produced them so the rendered output can echo them back.
#[derive(Debug)]
pub struct SearchResults {
    pub plans: Vec<ChangePlan>,
    pub count: usize,
    pub search_term: Option<String>,
    pub status: StatusFilter,
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.search_term {
            Some(term) => writeln!(
                f,
                "Found {} plan(s) matching '{}' (status: {})",
                self.count,
                term,
                self.status.as_str()
            )?,
            None => writeln!(
                f,
                "Found {} plan(s) (status: {})",
                self.count,
                self.status.as_str()
            )?,
        }
        writeln!(f)?;
        write!(f, "{}", PlanList(self.plans.clone()))
    }
}

fn write_plan_summary(f: &mut fmt::Formatter<'_>, plan: &ChangePlan) -> fmt::Result {
    writeln!(
        f,
        "## {} (ID: {}) ({}/{})",
        plan.name,
        plan.id,
        plan.completed_steps(),
        plan.total_steps()
    )?;
    writeln!(f)
}
