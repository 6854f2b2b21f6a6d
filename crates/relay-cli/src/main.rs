//! Relay CLI Application
//!
//! Command-line front end for the Relay prompt wizard: step overviews,
//! one-shot rendering, an interactive shell and the MCP server.

mod args;
mod cli;
mod mcp;
mod renderer;
mod shell;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, RelayMcpServer};
use relay_core::SessionBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        workflow,
        builtin,
        no_color,
        command,
    } = Args::parse();

    let builder = SessionBuilder::new()
        .with_workflow_path(workflow)
        .with_builtin(builtin.clone());
    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(builder, renderer);

    info!("Relay started");

    match command {
        Some(Steps) | None => cli.list_steps(),
        Some(Show(args)) => cli.show_step(args),
        Some(Workflows) => cli.list_workflows(),
        Some(Check) => cli.check(),
        Some(Render(args)) => cli.render(args),
        Some(Shell) => cli.shell(),
        Some(Init(args)) => cli.init(args, builtin.as_deref()),
        Some(Serve) => {
            info!("Starting Relay MCP server");
            run_stdio_server(RelayMcpServer::new(cli.session()?))
                .await
                .context("MCP server failed")
        }
    }
}
