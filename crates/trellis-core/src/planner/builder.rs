//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    store::PlanStore,
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    store_path: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { store_path: None }
    }

    /// Sets a custom snapshot file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/trellis/plans.json` or
    /// `~/.local/share/trellis/plans.json`
    pub fn with_store_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.store_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner instance, loading the persisted
    /// snapshot if one exists.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the store directory cannot be
    /// created or the snapshot cannot be read, and
    /// `PlannerError::Serialization` if the snapshot cannot be parsed.
    pub fn build(self) -> Result<Planner> {
        let store_path = if let Some(path) = self.store_path {
            path
        } else {
            Self::default_store_path()?
        };

        if let Some(parent) = store_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = PlanStore::open(&store_path)?;
        Ok(Planner::new(store))
    }

    /// Returns the default snapshot path following the XDG Base Directory
    /// specification.
    fn default_store_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("trellis")
            .place_data_file("plans.json")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
