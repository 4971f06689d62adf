//! Step priority levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe scheduling priority for a step.
///
/// The derived ordering is the scheduling order: `High` sorts before
/// `Medium`, which sorts before `Low`. The readiness engine relies on this
/// when picking the next actionable step.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Step should be scheduled before everything else
    High,

    /// Default priority
    #[default]
    Medium,

    /// Step can wait until nothing more urgent is ready
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}
