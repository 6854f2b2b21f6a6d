use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{InitArgs, RenderArgs, ShowArgs};

/// Step-by-step prompt wizard for AI chat workflows
///
/// Relay walks through a fixed sequence of steps. Each step collects a few
/// inputs and renders a prompt to paste into an AI chat; the answer feeds a
/// later step. An optional project packet carries the running project state
/// between chat sessions. Runs as a one-shot CLI, an interactive shell, or an
/// MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "relay")]
pub struct Args {
    /// Workflow file (TOML). Defaults to $XDG_CONFIG_HOME/relay/workflow.toml
    /// when present, otherwise the built-in seo-8-step workflow
    #[arg(long, short = 'w', global = true, conflicts_with = "builtin")]
    pub workflow: Option<PathBuf>,

    /// Use one of the built-in workflows (see `relay workflows`)
    #[arg(long, short = 'b', global = true)]
    pub builtin: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Relay CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List the workflow's steps
    #[command(alias = "ls")]
    Steps,
    /// Show one step's inputs
    #[command(alias = "s")]
    Show(ShowArgs),
    /// List the built-in workflows
    Workflows,
    /// Validate the active workflow
    Check,
    /// Render one step's prompt
    #[command(alias = "r")]
    Render(RenderArgs),
    /// Run the wizard interactively
    #[command(alias = "sh")]
    Shell,
    /// Write a built-in workflow to a file for customization
    Init(InitArgs),
    /// Start the MCP server
    Serve,
}
