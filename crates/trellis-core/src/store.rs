//! Flat-file plan store.
//!
//! Owns the in-memory collection of plans and the JSON snapshot on disk.
//! The snapshot is a single serialized array of plan records, loaded once
//! at startup and rewritten in full after every mutation. A failed write is
//! surfaced to the caller but the in-memory mutation is not rolled back, so
//! the caller must treat such a failure as "change is live but not yet
//! durable".

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use log::debug;

use crate::{
    error::{PlannerError, Result},
    models::ChangePlan,
};

/// In-memory keyed collection of plans backed by a JSON snapshot file.
#[derive(Debug)]
pub struct PlanStore {
    path: PathBuf,
    plans: BTreeMap<String, ChangePlan>,
}

impl PlanStore {
    /// Opens a store backed by the given snapshot file.
    ///
    /// A missing file is treated as an empty store; the file is created on
    /// the first persist. Step-identifier counters are reconciled for plans
    /// serialized before the counter existed.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the file exists but cannot be
    /// read, or `PlannerError::Serialization` if it cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let plans = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| PlannerError::FileSystem {
                path: path.clone(),
                source: e,
            })?;
            let records: Vec<ChangePlan> = serde_json::from_str(&raw)?;
            records
                .into_iter()
                .map(|mut plan| {
                    plan.restore_step_counter();
                    (plan.id.clone(), plan)
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        debug!(
            "opened plan store at {} with {} plan(s)",
            path.display(),
            plans.len()
        );
        Ok(Self { path, plans })
    }

    /// Path of the snapshot file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts a plan, failing on a duplicate identifier unless `overwrite`
    /// is set (used by import).
    pub fn insert(&mut self, plan: ChangePlan, overwrite: bool) -> Result<()> {
        if !overwrite && self.plans.contains_key(&plan.id) {
            return Err(PlannerError::invalid_input(
                "id",
                format!(
                    "plan '{}' already exists; set overwrite to replace it",
                    plan.id
                ),
            ));
        }
        self.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    /// Looks up a plan by identifier.
    pub fn get(&self, id: &str) -> Option<&ChangePlan> {
        self.plans.get(id)
    }

    /// Looks up a plan by identifier for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChangePlan> {
        self.plans.get_mut(id)
    }

    /// Removes a plan, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<ChangePlan> {
        self.plans.remove(id)
    }

    /// Iterates over all plans in stable key order.
    pub fn plans(&self) -> impl Iterator<Item = &ChangePlan> {
        self.plans.values()
    }

    /// Number of plans in the store.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the store holds no plans.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Rewrites the snapshot file with the full plan collection.
    ///
    /// The write goes to a temporary sibling first and is renamed into
    /// place, so a failed write leaves the previous snapshot intact.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` if the write fails. The in-memory
    /// state is NOT rolled back; it stays ahead of the durable state until
    /// the next successful persist.
    pub fn persist(&self) -> Result<()> {
        let records: Vec<&ChangePlan> = self.plans.values().collect();
        let body = serde_json::to_string_pretty(&records)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| PlannerError::Storage {
            path: self.path.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| PlannerError::Storage {
            path: self.path.clone(),
            source: e,
        })?;

        debug!("persisted {} plan(s) to {}", self.plans.len(), self.path.display());
        Ok(())
    }

    /// Allocates a fresh plan identifier from the current wall clock,
    /// suffixed if the millisecond value collides with an existing plan.
    pub fn allocate_plan_id(&self) -> String {
        let base = format!("plan-{}", Timestamp::now().as_millisecond());
        if !self.plans.contains_key(&base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.plans.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
