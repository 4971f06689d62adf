use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, StepCommands};

/// Main command-line interface for the Trellis change-plan manager
///
/// Trellis organizes work into named change plans made of dependency-ordered
/// steps. It provides a command-line interface for creating, querying, and
/// completing steps, with support for both local CLI operations and MCP
/// (Model Context Protocol) server mode for integration with AI assistants.
#[derive(Parser)]
#[command(version, about, name = "trellis")]
pub struct Args {
    /// Path to the JSON snapshot file. Defaults to
    /// $XDG_DATA_HOME/trellis/plans.json
    #[arg(long, global = true)]
    pub store_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Trellis CLI
///
/// The CLI is organized into three main command categories:
/// - `plan`: Operations for managing change plans (create, list, search, etc.)
/// - `step`: Operations for managing individual steps within plans
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage steps within plans
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Start the MCP server
    Serve,
}
