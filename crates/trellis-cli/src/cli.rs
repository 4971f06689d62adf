//! Command-line interface definitions and handlers using clap
//!
//! This module defines the CLI argument structures using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! Each command defines a CLI-specific argument structure with clap derives
//! and a `From` conversion into the matching core parameter type. CLI
//! concerns (help text, aliases, value parsing) stay in this layer while the
//! core types remain interface-agnostic, and the conversion is verified at
//! compile time.

use std::{
    fs,
    io::Read,
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use trellis_core::{
    display::{CreateResult, DeleteResult, PlanList},
    params::{AddStep, CreatePlan, Id, ImportPlan, SearchPlans, StepRef, UpdateStep},
    Planner,
};

use crate::renderer::TerminalRenderer;

/// Create a new plan
///
/// CLI wrapper for CreatePlan. Steps are added afterwards with `step add`,
/// so plan creation from the command line only needs a name.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            name: val.name,
            steps: Vec::new(),
        }
    }
}

/// Show details of a specific plan
///
/// Display comprehensive information about a plan including its name,
/// timestamps, and all associated steps with their priority, dependencies,
/// and completion state.
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    #[arg(help = "Unique identifier of the plan to show details for")]
    pub id: String,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Show the next actionable step of a plan
///
/// Asks the readiness engine which incomplete step has every dependency
/// satisfied, preferring higher priority and earlier insertion order. When
/// nothing is ready, lists the blocked steps and what they are waiting on.
#[derive(Args)]
pub struct NextStepArgs {
    /// ID of the plan to query
    #[arg(help = "Unique identifier of the plan to find the next step for")]
    pub id: String,
}

impl From<NextStepArgs> for Id {
    fn from(val: NextStepArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Search for plans by text and completion status
///
/// The term is matched case-insensitively against plan names and step
/// titles, descriptions, and context. Either criterion may be omitted.
#[derive(Args)]
pub struct SearchPlansArgs {
    /// Term to search for in plan names and step content
    pub term: Option<String>,
    /// Restrict results by completion status
    #[arg(short, long, help = "Completion filter (all, active, completed)")]
    pub status: Option<StatusArg>,
}

impl From<SearchPlansArgs> for SearchPlans {
    fn from(val: SearchPlansArgs) -> Self {
        SearchPlans {
            search_term: val.term,
            status: val.status.map(|s| s.to_string()),
        }
    }
}

/// Export a plan as JSON
///
/// Writes a timestamped export envelope to stdout or a file. The payload can
/// be imported into another store with `plan import`.
#[derive(Args)]
pub struct ExportPlanArgs {
    /// ID of the plan to export
    #[arg(help = "Unique identifier of the plan to export")]
    pub id: String,
    /// Write the export to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Import a plan from JSON
///
/// Accepts either an export envelope or a bare plan record. Pass `-` as the
/// file to read from stdin.
#[derive(Args)]
pub struct ImportPlanArgs {
    /// File containing the serialized plan, or '-' for stdin
    pub file: PathBuf,
    /// Replace an existing plan with the same ID instead of failing
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Show the next actionable step of a plan
    #[command(alias = "n")]
    Next(NextStepArgs),
    /// Search for plans by text and completion status
    #[command(alias = "f")]
    Search(SearchPlansArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Export a plan as JSON
    Export(ExportPlanArgs),
    /// Import a plan from JSON
    Import(ImportPlanArgs),
}

/// Add a new step to a plan
#[derive(Args)]
pub struct AddStepArgs {
    /// ID of the plan to add the step to
    #[arg(help = "Unique identifier of the plan to add this step to")]
    pub plan_id: String,
    /// Title of the step
    pub title: String,
    /// Detailed description of what needs to be done
    #[arg(short, long)]
    pub description: String,
    /// Optional free-form context for the step
    #[arg(short, long)]
    pub context: Option<String>,
    /// IDs of existing steps that must complete first - comma-separated list
    #[arg(
        long,
        value_delimiter = ',',
        help = "IDs of existing steps that must complete first, comma-separated"
    )]
    pub depends_on: Vec<String>,
    /// Priority of the step
    #[arg(short, long, help = "Priority of the step (high, medium, low)")]
    pub priority: Option<PriorityArg>,
}

impl From<AddStepArgs> for AddStep {
    fn from(val: AddStepArgs) -> Self {
        AddStep {
            plan_id: val.plan_id,
            title: val.title,
            description: val.description,
            context: val.context,
            depends_on: val.depends_on,
            priority: val.priority.map(|p| p.to_string()),
        }
    }
}

/// Update a step's details or completion state
///
/// Only the supplied fields are applied; re-sending the current values is
/// reported as a no-op. Completing a step fails while any of its
/// dependencies is still open.
#[derive(Args)]
pub struct UpdateStepArgs {
    #[arg(help = "Unique identifier of the plan containing the step")]
    pub plan_id: String,
    #[arg(help = "Unique identifier of the step to update")]
    pub step_id: String,
    #[arg(short, long, help = "Updated title for the step")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated detailed description")]
    pub description: Option<String>,
    #[arg(short, long, help = "Updated free-form context")]
    pub context: Option<String>,
    /// Replacement dependency list - comma-separated, empty string to clear
    #[arg(
        long,
        value_delimiter = ',',
        help = "Replacement dependency list, comma-separated"
    )]
    pub depends_on: Option<Vec<String>>,
    #[arg(short, long, help = "Updated priority (high, medium, low)")]
    pub priority: Option<PriorityArg>,
    /// New completion state (true to complete, false to reopen)
    #[arg(long)]
    pub completed: Option<bool>,
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            plan_id: val.plan_id,
            step_id: val.step_id,
            title: val.title,
            description: val.description,
            context: val.context,
            depends_on: val
                .depends_on
                .map(|deps| deps.into_iter().filter(|d| !d.is_empty()).collect()),
            priority: val.priority.map(|p| p.to_string()),
            completed: val.completed,
        }
    }
}

/// Mark a step as complete
#[derive(Args)]
pub struct CompleteStepArgs {
    #[arg(help = "Unique identifier of the plan containing the step")]
    pub plan_id: String,
    #[arg(help = "Unique identifier of the step to complete")]
    pub step_id: String,
}

impl From<CompleteStepArgs> for StepRef {
    fn from(val: CompleteStepArgs) -> Self {
        StepRef {
            plan_id: val.plan_id,
            step_id: val.step_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Add a new step to a plan
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Update a step's details or completion state
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Mark a step as complete
    #[command(aliases = ["c", "done"])]
    Complete(CompleteStepArgs),
}

/// Command-line argument representation of step priorities
///
/// Converts between user-friendly command arguments and the internal
/// priority strings parsed by the core. Used with the `--priority` flag.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum PriorityArg {
    /// Schedule before medium and low priority steps
    High,
    /// The default priority
    Medium,
    /// Schedule after high and medium priority steps
    Low,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityArg::High => write!(f, "high"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::Low => write!(f, "low"),
        }
    }
}

/// Command-line argument representation of the search status filter
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Match every plan
    All,
    /// Plans with at least one incomplete step
    Active,
    /// Plans whose every step is complete
    Completed,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusArg::All => write!(f, "all"),
            StatusArg::Active => write!(f, "active"),
            StatusArg::Completed => write!(f, "completed"),
        }
    }
}

/// Command handler tying the planner to the terminal renderer.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Dispatch a `plan` subcommand.
    pub fn handle_plan_command(mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into())?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List => self.list_plans(),
            PlanCommands::Show(args) => {
                let plan = self.planner.get_plan(&args.into())?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Next(args) => {
                let next = self.planner.get_next_step(&args.into())?;
                self.renderer.render(&next.to_string())
            }
            PlanCommands::Search(args) => {
                let results = self.planner.search_plans(&args.into())?;
                self.renderer.render(&results.to_string())
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Plan deletion is permanent. Re-run with --confirm to delete plan '{}'.",
                        args.id
                    );
                }
                let plan = self.planner.delete_plan(&Id { id: args.id })?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
            PlanCommands::Export(args) => {
                let exported = self.planner.export_plan(&Id {
                    id: args.id.clone(),
                })?;
                match args.output {
                    Some(path) => {
                        fs::write(&path, exported.to_string()).with_context(|| {
                            format!("Failed to write export to {}", path.display())
                        })?;
                        self.renderer.render(&format!(
                            "Exported plan '{}' to {}\n",
                            args.id,
                            path.display()
                        ))
                    }
                    None => {
                        print!("{exported}");
                        Ok(())
                    }
                }
            }
            PlanCommands::Import(args) => {
                let data = read_import_data(&args.file)?;
                let plan = self.planner.import_plan(&ImportPlan {
                    data,
                    overwrite: args.overwrite,
                })?;
                self.renderer
                    .render(&format!("Imported plan '{}' (ID: {})\n", plan.name, plan.id))
            }
        }
    }

    /// Dispatch a `step` subcommand.
    pub fn handle_step_command(mut self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let step = self.planner.add_step(&args.into())?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::Update(args) => {
                let outcome = self.planner.update_step(&args.into())?;
                self.renderer.render(&outcome.to_string())
            }
            StepCommands::Complete(args) => {
                let outcome = self.planner.mark_step_complete(&args.into())?;
                self.renderer.render(&outcome.to_string())
            }
        }
    }

    /// List all plans, the default action when no command is given.
    pub fn list_plans(&self) -> Result<()> {
        let plans = PlanList(self.planner.list_plans());
        if plans.is_empty() {
            self.renderer.render(&plans.to_string())
        } else {
            self.renderer.render(&format!("# Plans\n\n{plans}"))
        }
    }
}

fn read_import_data(file: &PathBuf) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut data = String::new();
        std::io::stdin()
            .read_to_string(&mut data)
            .context("Failed to read plan data from stdin")?;
        Ok(data)
    } else {
        fs::read_to_string(file)
            .with_context(|| format!("Failed to read plan data from {}", file.display()))
    }
}
