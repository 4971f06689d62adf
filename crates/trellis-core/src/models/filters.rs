//! Filter types for plan searches.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ChangePlan;

/// Completion filter applied when searching plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Match every plan
    #[default]
    All,

    /// Plans with at least one incomplete step, or no steps yet
    Active,

    /// Plans with at least one step and every step complete
    Completed,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(format!("Invalid status filter: {s}")),
        }
    }
}

impl StatusFilter {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    /// Whether the given plan passes this filter.
    pub fn matches(&self, plan: &ChangePlan) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !plan.is_completed(),
            StatusFilter::Completed => plan.is_completed(),
        }
    }
}
