//! Builder for resolving a workflow and starting sessions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use super::WizardSession;
use crate::{
    error::{RelayError, Result},
    workflow::{builtin, Workflow, DEFAULT_WORKFLOW},
};

const CONFIG_PREFIX: &str = "relay";
const CONFIG_FILE: &str = "workflow.toml";

/// Where a session's workflow came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowSource {
    /// A TOML file on disk
    File(PathBuf),
    /// One of the embedded workflows
    Builtin(String),
}

impl fmt::Display for WorkflowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowSource::File(path) => write!(f, "{}", path.display()),
            WorkflowSource::Builtin(name) => write!(f, "built-in '{name}'"),
        }
    }
}

/// Builder for creating [`WizardSession`] instances.
///
/// Resolution order: an explicit workflow file, then an explicit built-in
/// name, then `$XDG_CONFIG_HOME/relay/workflow.toml` when it exists, then
/// the default built-in workflow.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    workflow_path: Option<PathBuf>,
    builtin: Option<String>,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a workflow file to load.
    pub fn with_workflow_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.workflow_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Selects a built-in workflow by name.
    pub fn with_builtin<S: Into<String>>(mut self, name: Option<S>) -> Self {
        if let Some(name) = name {
            self.builtin = Some(name.into());
        }
        self
    }

    /// Decides where the workflow will be loaded from without loading it.
    pub fn source(&self) -> WorkflowSource {
        if let Some(path) = &self.workflow_path {
            return WorkflowSource::File(path.clone());
        }
        if let Some(name) = &self.builtin {
            return WorkflowSource::Builtin(name.clone());
        }
        match Self::default_workflow_path() {
            Some(path) => WorkflowSource::File(path),
            None => WorkflowSource::Builtin(DEFAULT_WORKFLOW.to_string()),
        }
    }

    /// Loads and validates the configured workflow.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::FileSystem` if the file cannot be read,
    /// `RelayError::Parse` for malformed TOML, or the validation errors of
    /// [`Workflow::from_definition`].
    pub fn load_workflow(&self) -> Result<Workflow> {
        let source = self.source();
        debug!("Loading workflow from {source}");
        match source {
            WorkflowSource::File(path) => Workflow::load(&path),
            WorkflowSource::Builtin(name) => Workflow::builtin(&name),
        }
    }

    /// Builds a session on the configured workflow.
    ///
    /// # Errors
    ///
    /// See [`SessionBuilder::load_workflow`].
    pub fn build(self) -> Result<WizardSession> {
        let workflow = self.load_workflow()?;
        info!(
            "Starting session on workflow '{}' ({} steps)",
            workflow.name(),
            workflow.registry().len()
        );
        Ok(WizardSession::new(Arc::new(workflow)))
    }

    /// The user's workflow file, if one exists.
    pub fn default_workflow_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(CONFIG_PREFIX).find_config_file(CONFIG_FILE)
    }

    /// Where the user's workflow file lives, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::XdgDirectory` if the config directory cannot be
    /// created.
    pub fn config_workflow_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(CONFIG_PREFIX)
            .place_config_file(CONFIG_FILE)
            .map_err(|e| RelayError::XdgDirectory(e.to_string()))
    }
}

/// Writes a built-in workflow's TOML to `path` (or the user's config path)
/// as a starting point for customization.
///
/// # Errors
///
/// Returns `RelayError::Configuration` for an unknown built-in or when the
/// target exists and `force` is false, `RelayError::XdgDirectory` when the
/// config directory cannot be created, and `RelayError::FileSystem` when the
/// write fails.
pub fn write_workflow_file(name: &str, path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let workflow = builtin::find(name).ok_or_else(|| {
        RelayError::configuration(format!(
            "unknown built-in workflow '{name}' (available: {})",
            builtin::names().join(", ")
        ))
    })?;

    let target = match path {
        Some(path) => path.to_path_buf(),
        None => SessionBuilder::config_workflow_path()?,
    };

    if target.exists() && !force {
        return Err(RelayError::configuration(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RelayError::FileSystem {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(&target, workflow.source()).map_err(|e| RelayError::FileSystem {
        path: target.clone(),
        source: e,
    })?;
    info!("Wrote workflow '{name}' to {}", target.display());
    Ok(target)
}
