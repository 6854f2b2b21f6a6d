//! Listing wrappers for steps and workflows.

use std::fmt;

use crate::{
    models::Step,
    workflow::{BuiltinWorkflow, DEFAULT_WORKFLOW},
};

/// Compact numbered listing of a workflow's steps.
///
/// When `current` is set, that step is marked so the listing doubles as a
/// progress indicator.
///
/// # Examples
///
/// ```rust
/// use relay_core::{display::StepList, workflow::Workflow};
///
/// let workflow = Workflow::builtin("seo-8-step")?;
/// let listing = StepList::new(workflow.registry().steps_in_order()).with_current(Some(1));
/// let output = listing.to_string();
/// assert!(output.contains("2. **任務目標 → 主題發想** (`topic_ideation`) ◀"));
/// # Ok::<(), relay_core::RelayError>(())
/// ```
pub struct StepList<'a> {
    steps: &'a [Step],
    current: Option<usize>,
}

impl<'a> StepList<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            current: None,
        }
    }

    /// Marks the step at `index` as current.
    pub fn with_current(mut self, index: Option<usize>) -> Self {
        self.current = index;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for StepList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return writeln!(f, "No steps found.");
        }
        for step in self.steps {
            write!(f, "{}. **{}** (`{}`)", step.number(), step.label, step.id)?;
            if self.current == Some(step.index) {
                write!(f, " ◀")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Listing of the embedded workflows with the default marked.
pub struct BuiltinWorkflows(pub &'static [BuiltinWorkflow]);

impl fmt::Display for BuiltinWorkflows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No built-in workflows.");
        }
        for workflow in self.0 {
            write!(f, "- `{}`: {}", workflow.name, workflow.summary)?;
            if workflow.name == DEFAULT_WORKFLOW {
                write!(f, " (default)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::BUILTIN_WORKFLOWS;

    fn step(index: usize, id: &str) -> Step {
        Step {
            index,
            id: id.to_string(),
            label: id.to_uppercase(),
            description: None,
            template: id.to_string(),
            fields: vec![],
        }
    }

    #[test]
    fn test_step_list_marks_current() {
        let steps = vec![step(0, "ask"), step(1, "answer")];
        let output = StepList::new(&steps).with_current(Some(1)).to_string();
        assert_eq!(output, "1. **ASK** (`ask`)\n2. **ANSWER** (`answer`) ◀\n");
    }

    #[test]
    fn test_step_list_without_current() {
        let steps = vec![step(0, "ask")];
        let output = StepList::new(&steps).to_string();
        assert!(!output.contains('◀'));
    }

    #[test]
    fn test_empty_step_list() {
        assert_eq!(StepList::new(&[]).to_string(), "No steps found.\n");
    }

    #[test]
    fn test_builtin_listing_marks_default() {
        let output = BuiltinWorkflows(BUILTIN_WORKFLOWS).to_string();
        assert!(output.contains("- `seo-8-step`:"));
        assert!(output.contains("(default)"));
        assert!(output.contains("- `seo-packet`:"));
    }
}
