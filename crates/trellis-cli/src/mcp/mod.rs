//! MCP server implementation for Trellis
//!
//! This module implements the Model Context Protocol server for Trellis,
//! providing a standardized interface for AI models to interact with
//! the change-plan manager.
//!
//! ## Generic Parameter Wrapper
//!
//! Core parameter types carry `JsonSchema` derives behind the `schema`
//! feature but no MCP-specific traits. [`McpParams`] wraps any such type in
//! a transparent serde container so tool handlers get JSON deserialization
//! and schema generation without per-operation wrapper structs.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use trellis_core::{
    display::{CreateResult, DeleteResult, OperationStatus, PlanList},
    params as core,
    Planner,
};

pub mod errors;

use errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type SearchPlans = McpParams<core::SearchPlans>;
pub type StepRef = McpParams<core::StepRef>;
pub type AddStep = McpParams<core::AddStep>;
pub type UpdateStep = McpParams<core::UpdateStep>;
pub type ImportPlan = McpParams<core::ImportPlan>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// MCP server for Trellis
#[derive(Clone)]
pub struct TrellisMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TrellisMcpServer {
    /// Create a new Trellis MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "create_plan",
        description = "Create a new change plan. Provide a clear name (required) and optionally an initial list of steps, each with title, description, optional context, optional priority ('high', 'medium', 'low'; default medium), and optional depends_on list. Step IDs are assigned positionally (0, 1, 2, ...), so depends_on may reference other steps of the same batch by those IDs. Returns the new plan with its generated ID."
    )]
    async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text_result(CreateResult::new(plan).to_string())
    }

    #[tool(
        name = "list_plans",
        description = "List all change plans with their IDs, names, and step completion progress. Use this to discover existing plans before querying or modifying them."
    )]
    async fn list_plans(&self) -> McpResult {
        debug!("list_plans");

        let plans = PlanList(self.planner.lock().await.list_plans());
        let result = if plans.is_empty() {
            plans.to_string()
        } else {
            format!("# Plans\n\n{plans}")
        };
        text_result(result)
    }

    #[tool(
        name = "get_plan",
        description = "Display complete details of a specific plan including all its steps with priorities, dependencies, completion state, and context. Use the plan ID to retrieve. Essential for understanding scope and progress."
    )]
    async fn get_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .get_plan(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;

        text_result(plan.to_string())
    }

    #[tool(
        name = "search_plans",
        description = "Search plans by free text and completion status. The search term is matched case-insensitively against plan names and step titles, descriptions, and context. The status filter is 'all' (default), 'active' (at least one incomplete step), or 'completed' (every step complete). Both criteria are optional."
    )]
    async fn search_plans(&self, Parameters(params): Parameters<SearchPlans>) -> McpResult {
        debug!("search_plans: {:?}", params);

        let results = self
            .planner
            .lock()
            .await
            .search_plans(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to search plans", &e))?;

        text_result(results.to_string())
    }

    #[tool(
        name = "get_next_step",
        description = "Determine the next actionable step of a plan: the incomplete step whose dependencies are all complete, preferring higher priority and then earlier insertion order. When no step is ready, reports which steps are blocked and which dependencies they are waiting on. When every step is done, says so. Read-only."
    )]
    async fn get_next_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_next_step: {:?}", params);

        let next = self
            .planner
            .lock()
            .await
            .get_next_step(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to get next step", &e))?;

        text_result(next.to_string())
    }

    #[tool(
        name = "mark_step_complete",
        description = "Mark a step as complete. Fails if any of the step's dependencies is still incomplete; complete those first (get_next_step shows the correct order). Marking an already-complete step is a no-op, not an error."
    )]
    async fn mark_step_complete(&self, Parameters(params): Parameters<StepRef>) -> McpResult {
        debug!("mark_step_complete: {:?}", params);

        let outcome = self
            .planner
            .lock()
            .await
            .mark_step_complete(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to mark step complete", &e))?;

        text_result(outcome.to_string())
    }

    #[tool(
        name = "add_step",
        description = "Append a new step to an existing plan. Requires plan_id, title, and description. Optionally include context (free-form notes), priority ('high', 'medium', 'low'; default medium), and depends_on (IDs of existing steps in the plan that must complete first). The new step's ID is assigned by the plan and returned."
    )]
    async fn add_step(&self, Parameters(params): Parameters<AddStep>) -> McpResult {
        debug!("add_step: {:?}", params);

        let step = self
            .planner
            .lock()
            .await
            .add_step(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text_result(CreateResult::new(step).to_string())
    }

    #[tool(
        name = "update_step",
        description = "Modify an existing step's properties. Use plan_id and step_id to identify it. Can update: title, description, context, priority, depends_on (replacement list validated against the plan's other steps), and completed. Setting completed=true fails while any dependency is incomplete; completed=false reopens the step. Only supplied fields are applied, and a request that changes nothing is reported as a no-op."
    )]
    async fn update_step(&self, Parameters(params): Parameters<UpdateStep>) -> McpResult {
        debug!("update_step: {:?}", params);

        let outcome = self
            .planner
            .lock()
            .await
            .update_step(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to update step", &e))?;

        text_result(outcome.to_string())
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan and all its steps. This operation cannot be undone. Consider export_plan first if you might need the plan later."
    )]
    async fn delete_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .delete_plan(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;

        text_result(DeleteResult::new(plan).to_string())
    }

    #[tool(
        name = "export_plan",
        description = "Export a plan as a timestamped JSON envelope containing the full plan record (steps, dependencies, completion state, timestamps). The payload can be imported into another store with import_plan."
    )]
    async fn export_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("export_plan: {:?}", params);

        let exported = self
            .planner
            .lock()
            .await
            .export_plan(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to export plan", &e))?;

        text_result(exported.to_string())
    }

    #[tool(
        name = "import_plan",
        description = "Import a serialized plan from JSON. Accepts either an export envelope (as produced by export_plan) or a bare plan record. The plan is stored verbatim, IDs and timestamps included, after referential validation of its steps. Set overwrite=true to replace an existing plan with the same ID; otherwise a duplicate ID is an error."
    )]
    async fn import_plan(&self, Parameters(params): Parameters<ImportPlan>) -> McpResult {
        debug!("import_plan: overwrite={}", params.as_ref().overwrite);

        let plan = self
            .planner
            .lock()
            .await
            .import_plan(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to import plan", &e))?;

        let status = OperationStatus::success(format!(
            "Imported plan '{}' (ID: {})",
            plan.name, plan.id
        ));
        text_result(status.to_string())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TrellisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trellis".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            instructions: Some(r#"Trellis is a change-plan manager that organizes work into named plans of dependency-ordered steps.

## Core Concepts
- **Plans**: Named units of work identified by an opaque ID
- **Steps**: Individual tasks with title, description, optional context, priority (high/medium/low), and dependencies on other steps of the same plan
- **Readiness**: A step is ready when it is incomplete and every step it depends on is complete

## Workflow Examples

### Starting a New Plan
1. Create a plan with `create_plan` - provide a name and, optionally, the initial steps with their dependencies
2. Add further steps with `add_step` as the work takes shape
3. Use `get_plan` to review the full structure

### Working Through a Plan
1. Call `get_next_step` to find the highest-priority ready step
2. Do the work, then record it with `mark_step_complete`
3. Repeat until `get_next_step` reports that all steps are complete

### Managing Plans
- Use `list_plans` or `search_plans` to find existing plans
- Move plans between stores with `export_plan` and `import_plan`
- Remove finished plans with `delete_plan` (permanent)

## Best Practices
- Create clear, actionable step titles
- Express ordering constraints as dependencies instead of relying on step order
- Use the context field for notes, links, and decisions the step needs

## Tool Categories
- **Plan Management**: create_plan, list_plans, get_plan, search_plans, delete_plan, export_plan, import_plan
- **Step Management**: add_step, update_step, mark_step_complete, get_next_step"#.to_string()),
        }
    }
}


/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TrellisMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Trellis MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
