//! Workflows shipped with the library.

use super::Workflow;
use crate::error::Result;

/// Name of the workflow used when nothing else is configured.
pub const DEFAULT_WORKFLOW: &str = "seo-8-step";

/// A workflow definition embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinWorkflow {
    pub name: &'static str,
    pub summary: &'static str,
    source: &'static str,
}

impl BuiltinWorkflow {
    /// Parses and validates the embedded definition.
    ///
    /// # Errors
    ///
    /// Only if the embedded TOML is defective; covered by tests.
    pub fn load(&self) -> Result<Workflow> {
        Workflow::from_toml_str(self.name, self.source)
    }

    /// Raw TOML source, useful as a starting point for custom workflows.
    pub fn source(&self) -> &'static str {
        self.source
    }
}

pub const BUILTIN_WORKFLOWS: &[BuiltinWorkflow] = &[
    BuiltinWorkflow {
        name: "seo-8-step",
        summary: "SEO 8-step dashboard: product brief to drafted article with technical SEO",
        source: include_str!("../../workflows/seo-8-step.toml"),
    },
    BuiltinWorkflow {
        name: "seo-packet",
        summary: "SEO workflow with a carried-forward project packet and article cards",
        source: include_str!("../../workflows/seo-packet.toml"),
    },
];

/// Looks up a built-in workflow by name.
pub fn find(name: &str) -> Option<&'static BuiltinWorkflow> {
    BUILTIN_WORKFLOWS.iter().find(|workflow| workflow.name == name)
}

/// Names of every built-in workflow.
pub fn names() -> Vec<&'static str> {
    BUILTIN_WORKFLOWS.iter().map(|workflow| workflow.name).collect()
}
