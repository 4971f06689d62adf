//! Plan operations for the Planner.

use std::collections::HashSet;

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    display::SearchResults,
    error::{PlannerError, Result},
    graph,
    models::{ChangePlan, ExportedPlan, Step},
    params::{CreatePlan, Id, ImportPlan, SearchPlans},
};

impl Planner {
    /// Creates a new plan with its initial batch of steps.
    ///
    /// Step identifiers are assigned positionally (0..n as strings), so
    /// dependencies are validated against the identifier set of the whole
    /// batch before anything is inserted. Nothing is created if any step
    /// fails validation.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<ChangePlan> {
        if params.name.trim().is_empty() {
            return Err(PlannerError::invalid_input(
                "name",
                "name must not be empty",
            ));
        }

        let batch_ids: Vec<String> = (0..params.steps.len() as u64)
            .map(|i| i.to_string())
            .collect();
        let known: HashSet<&str> = batch_ids.iter().map(String::as_str).collect();

        let mut priorities = Vec::with_capacity(params.steps.len());
        for (new_step, id) in params.steps.iter().zip(&batch_ids) {
            priorities.push(new_step.validate()?);
            graph::validate_dependencies(id, &new_step.depends_on, &known)?;
        }

        let now = Timestamp::now();
        let steps: Vec<Step> = params
            .steps
            .iter()
            .zip(batch_ids)
            .zip(priorities)
            .map(|((new_step, id), priority)| Step {
                id,
                title: new_step.title.clone(),
                description: new_step.description.clone(),
                context: new_step.context.clone().unwrap_or_default(),
                priority,
                depends_on: new_step.depends_on.clone(),
                completed: false,
                created_at: now,
                completed_at: None,
            })
            .collect();

        let plan = ChangePlan {
            id: self.store.allocate_plan_id(),
            name: params.name.clone(),
            next_step_id: steps.len() as u64,
            steps,
            created_at: now,
            updated_at: now,
        };

        debug!("creating plan '{}' with {} step(s)", plan.id, plan.total_steps());
        self.store.insert(plan.clone(), false)?;
        self.store.persist()?;
        Ok(plan)
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, params: &Id) -> Result<ChangePlan> {
        self.store
            .get(&params.id)
            .cloned()
            .ok_or_else(|| PlannerError::PlanNotFound {
                id: params.id.clone(),
            })
    }

    /// Lists all plans in stable snapshot order.
    pub fn list_plans(&self) -> Vec<ChangePlan> {
        self.store.plans().cloned().collect()
    }

    /// Searches plans by free text and completion status.
    ///
    /// The term is matched case-insensitively against the plan name and
    /// each step's title, description, and context.
    pub fn search_plans(&self, params: &SearchPlans) -> Result<SearchResults> {
        let status = params.validate()?;
        let term = params.search_term.as_deref().map(str::to_lowercase);

        let plans: Vec<ChangePlan> = self
            .store
            .plans()
            .filter(|plan| status.matches(plan))
            .filter(|plan| match term.as_deref() {
                Some(term) => plan_matches_term(plan, term),
                None => true,
            })
            .cloned()
            .collect();

        Ok(SearchResults {
            count: plans.len(),
            plans,
            search_term: params.search_term.clone(),
            status,
        })
    }

    /// Permanently deletes a plan, returning the removed record.
    pub fn delete_plan(&mut self, params: &Id) -> Result<ChangePlan> {
        let plan = self
            .store
            .remove(&params.id)
            .ok_or_else(|| PlannerError::PlanNotFound {
                id: params.id.clone(),
            })?;

        debug!("deleted plan '{}'", plan.id);
        self.store.persist()?;
        Ok(plan)
    }

    /// Wraps a plan in a timestamped export envelope.
    pub fn export_plan(&self, params: &Id) -> Result<ExportedPlan> {
        let plan = self.get_plan(params)?;
        Ok(ExportedPlan {
            exported_at: Timestamp::now(),
            plan,
        })
    }

    /// Imports a serialized plan, optionally overwriting an existing one
    /// with the same identifier.
    ///
    /// Accepts either an export envelope or a bare plan record. The
    /// embedded plan is kept verbatim (identifiers and timestamps
    /// included) after passing the same referential checks enforced at
    /// creation time.
    pub fn import_plan(&mut self, params: &ImportPlan) -> Result<ChangePlan> {
        let mut plan = parse_import_payload(&params.data)?;
        validate_imported_plan(&plan)?;
        plan.restore_step_counter();

        debug!("importing plan '{}' (overwrite: {})", plan.id, params.overwrite);
        self.store.insert(plan.clone(), params.overwrite)?;
        self.store.persist()?;
        Ok(plan)
    }
}

fn plan_matches_term(plan: &ChangePlan, term: &str) -> bool {
    if plan.name.to_lowercase().contains(term) {
        return true;
    }
    plan.steps.iter().any(|step| {
        step.title.to_lowercase().contains(term)
            || step.description.to_lowercase().contains(term)
            || step.context.to_lowercase().contains(term)
    })
}

fn parse_import_payload(data: &str) -> Result<ChangePlan> {
    if let Ok(envelope) = serde_json::from_str::<ExportedPlan>(data) {
        return Ok(envelope.plan);
    }
    serde_json::from_str::<ChangePlan>(data).map_err(|e| {
        PlannerError::invalid_input("data", format!("malformed plan payload: {e}"))
    })
}

fn validate_imported_plan(plan: &ChangePlan) -> Result<()> {
    if plan.id.trim().is_empty() {
        return Err(PlannerError::invalid_input("data", "plan id must not be empty"));
    }
    if plan.name.trim().is_empty() {
        return Err(PlannerError::invalid_input(
            "data",
            "plan name must not be empty",
        ));
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(plan.steps.len());
    for step in &plan.steps {
        if !seen.insert(step.id.as_str()) {
            return Err(PlannerError::invalid_input(
                "data",
                format!("duplicate step id '{}' in imported plan", step.id),
            ));
        }
    }

    for step in &plan.steps {
        let known: HashSet<&str> = plan
            .steps
            .iter()
            .map(|s| s.id.as_str())
            .filter(|id| *id != step.id)
            .collect();
        graph::validate_dependencies(&step.id, &step.depends_on, &known)?;
    }
    Ok(())
}
