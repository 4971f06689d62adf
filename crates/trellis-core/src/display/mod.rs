//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] (in [`models`]) producing
//! markdown for rich terminal display, while wrapper types here add
//! operation context: creation/update/deletion results, status notices,
//! and collection formatting. The same formatted text is returned over the
//! MCP transport and rendered by the CLI, so all output flows through one
//! set of formatters.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (PlanList, SearchResults)
//! - [`results`]: Operation result types (CreateResult, DeleteResult, and
//!   Display impls for update/mark outcomes)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{PlanList, SearchResults};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult};
pub use status::OperationStatus;
