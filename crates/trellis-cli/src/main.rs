//! Trellis CLI Application
//!
//! Command-line interface for the Trellis change-plan manager.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TrellisMcpServer};
use renderer::TerminalRenderer;
use trellis_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { store_file, no_color, command } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_store_path(store_file)
        .build()
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Trellis started");

    match command {
        Some(Plan { command }) => Cli::new(planner, renderer).handle_plan_command(command),
        Some(Step { command }) => Cli::new(planner, renderer).handle_step_command(command),
        Some(Serve) => {
            info!("Starting Trellis MCP server");
            run_stdio_server(TrellisMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_plans(),
    }
}
