//! Command handlers and clap argument wrappers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, so `relay_core::params` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → WizardSession handlers
//! ```

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use relay_core::{
    params::{SetArticle, SetField, SetPacket, StepRef},
    workflow::{BUILTIN_WORKFLOWS, DEFAULT_WORKFLOW},
    write_workflow_file, BuiltinWorkflows, OperationStatus, SessionBuilder, StepList,
    WizardSession,
};

use crate::{renderer::TerminalRenderer, shell::Shell};

/// Show one step's inputs
#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Step id or 1-based step number")]
    pub step: String,
}

impl From<ShowArgs> for StepRef {
    fn from(val: ShowArgs) -> Self {
        StepRef {
            step: Some(val.step),
        }
    }
}

/// `NAME=VALUE` pair from `--set` / `--set-file`.
///
/// `NAME` is a field of the rendered step, or `step.field` for another step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub step: Option<String>,
    pub field: String,
    pub value: String,
}

/// Parses `NAME=VALUE`; only the first `=` separates.
pub fn parse_assignment(raw: &str) -> std::result::Result<Assignment, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    let (step, field) = match name.split_once('.') {
        Some((step, field)) => (Some(step.to_string()), field.to_string()),
        None => (None, name.to_string()),
    };
    Ok(Assignment {
        step,
        field,
        value: value.to_string(),
    })
}

/// Render one step's prompt
///
/// Builds a fresh session, applies the given inputs and prints the prompt.
/// Nothing is kept between invocations.
#[derive(Args)]
pub struct RenderArgs {
    #[arg(help = "Step id or 1-based step number")]
    pub step: String,

    #[arg(
        long = "set",
        value_name = "NAME=VALUE",
        value_parser = parse_assignment,
        help = "Field value; NAME may be `step.field` to fill another step's field (repeatable)"
    )]
    pub set: Vec<Assignment>,

    #[arg(
        long = "set-file",
        value_name = "NAME=PATH",
        value_parser = parse_assignment,
        help = "Read a field value from a file (repeatable)"
    )]
    pub set_file: Vec<Assignment>,

    #[arg(long, conflicts_with = "packet_file", help = "Packet text")]
    pub packet: Option<String>,

    #[arg(long, value_name = "PATH", help = "Read the packet from a file")]
    pub packet_file: Option<PathBuf>,

    #[arg(long, help = "Article card id, e.g. A07")]
    pub article_id: Option<String>,

    #[arg(long, help = "Article card title")]
    pub title: Option<String>,

    #[arg(long, help = "Print only the prompt text")]
    pub raw: bool,
}

/// Core parameters for a one-shot render.
pub struct RenderRequest {
    pub step: StepRef,
    pub fields: Vec<SetField>,
    pub packet: Option<SetPacket>,
    pub article: Option<SetArticle>,
    pub raw: bool,
}

impl RenderArgs {
    /// Converts to core parameters, reading any referenced files.
    pub fn into_params(self) -> Result<RenderRequest> {
        let RenderArgs {
            step,
            set,
            set_file,
            packet,
            packet_file,
            article_id,
            title,
            raw,
        } = self;

        // Unqualified names target the rendered step
        let to_params = |assignment: Assignment| SetField {
            step: Some(assignment.step.unwrap_or_else(|| step.clone())),
            field: assignment.field,
            value: assignment.value,
        };

        let mut fields: Vec<SetField> = set.into_iter().map(&to_params).collect();
        for mut assignment in set_file {
            let path = PathBuf::from(&assignment.value);
            assignment.value = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            fields.push(to_params(assignment));
        }

        let packet = match (packet, packet_file) {
            (Some(text), _) => Some(SetPacket { text }),
            (None, Some(path)) => Some(SetPacket {
                text: std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            }),
            (None, None) => None,
        };

        let article = (article_id.is_some() || title.is_some())
            .then_some(SetArticle { article_id, title });

        Ok(RenderRequest {
            step: StepRef { step: Some(step) },
            fields,
            packet,
            article,
            raw,
        })
    }
}

/// Write a built-in workflow to a file for customization
///
/// Uses the workflow named by `--builtin`, or the default one.
#[derive(Args)]
pub struct InitArgs {
    #[arg(
        long,
        short,
        value_name = "PATH",
        help = "Target file; defaults to $XDG_CONFIG_HOME/relay/workflow.toml"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Overwrite an existing file")]
    pub force: bool,
}

/// Runs CLI commands against the configured workflow.
pub struct Cli {
    builder: SessionBuilder,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(builder: SessionBuilder, renderer: TerminalRenderer) -> Self {
        Self { builder, renderer }
    }

    /// Starts a fresh session on the configured workflow.
    pub fn session(&self) -> Result<WizardSession> {
        self.builder
            .clone()
            .build()
            .with_context(|| format!("Failed to load workflow from {}", self.builder.source()))
    }

    pub fn list_steps(&self) -> Result<()> {
        let session = self.session()?;
        let workflow = session.workflow();

        let mut output = format!("# {}\n\n", workflow.title());
        if let Some(description) = workflow.description() {
            output.push_str(description);
            output.push_str("\n\n");
        }
        output.push_str(&StepList::new(workflow.registry().steps_in_order()).to_string());
        self.renderer.render(&output)
    }

    pub fn show_step(&self, args: ShowArgs) -> Result<()> {
        let session = self.session()?;
        let params: StepRef = args.into();
        let step = session.target_step(params.step.as_deref())?;
        self.renderer.render(&step.to_string())
    }

    pub fn list_workflows(&self) -> Result<()> {
        let output = format!(
            "# Built-in workflows\n\n{}",
            BuiltinWorkflows(BUILTIN_WORKFLOWS)
        );
        self.renderer.render(&output)
    }

    pub fn check(&self) -> Result<()> {
        let source = self.builder.source();
        let workflow = self
            .builder
            .load_workflow()
            .with_context(|| format!("Invalid workflow at {source}"))?;

        let status = OperationStatus::success(format!(
            "Workflow '{}' from {source} is valid ({} steps, {} templates)",
            workflow.name(),
            workflow.registry().len(),
            workflow.templates().len()
        ));
        self.renderer.render(&status.to_string())
    }

    pub fn render(&self, args: RenderArgs) -> Result<()> {
        let request = args.into_params()?;
        let mut session = self.session()?;

        if let Some(packet) = &request.packet {
            session.update_packet(packet)?;
        }
        if let Some(article) = &request.article {
            session.update_article(article)?;
        }
        for field in &request.fields {
            debug!("render: applying {:?}.{}", field.step, field.field);
            session.update_field(field)?;
        }

        let view = session.prompt_view(&request.step)?;
        if request.raw {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", view.prompt.trim_end())?;
            Ok(())
        } else {
            self.renderer.render(&view.to_string())
        }
    }

    pub fn shell(&self) -> Result<()> {
        let session = self.session()?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        Shell::new(session, &self.renderer).run(stdin.lock(), &mut stdout)
    }

    pub fn init(&self, args: InitArgs, builtin: Option<&str>) -> Result<()> {
        let name = builtin.unwrap_or(DEFAULT_WORKFLOW);
        let path = write_workflow_file(name, args.output.as_deref(), args.force)
            .context("Failed to write workflow")?;
        let status = OperationStatus::success(format!(
            "Wrote workflow '{name}' to {}",
            path.display()
        ));
        self.renderer.render(&status.to_string())
    }
}
