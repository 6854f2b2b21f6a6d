//! Workflows: the declarative table a wizard session runs.
//!
//! A workflow bundles a [`StepRegistry`], the [`TemplateSet`] its steps
//! render, and the packet and article card configuration. Each variant of
//! the prompt wizard is a workflow file rather than a separate program.
//!
//! Loading validates the whole table up front:
//!
//! - at least one step, unique step ids without `.`
//! - unique, non-empty field names per step; local fields may not use the
//!   shared slot names (`packet`, `article_id`, `article_title`)
//! - every step's template exists and compiles
//! - every slot the template uses resolves to a field, the packet or the
//!   article card
//! - `{{ packet }}` slots and `packet`-bound fields require a `[packet]` table
//!
//! # Examples
//!
//! ```rust
//! use relay_core::workflow::Workflow;
//!
//! let workflow = Workflow::from_toml_str(
//!     "inline",
//!     r#"
//! name = "tiny"
//!
//! [templates]
//! goal = "Goal: {{ goal }}"
//!
//! [[steps]]
//! id = "goal"
//! label = "Goal"
//!
//! [[steps.fields]]
//! name = "goal"
//! label = "Task goal"
//! "#,
//! )?;
//!
//! assert_eq!(workflow.registry().len(), 1);
//! # Ok::<(), relay_core::RelayError>(())
//! ```

pub mod builtin;
pub mod definition;
pub mod registry;
pub mod template;

use std::collections::BTreeSet;
use std::path::Path;

use log::debug;

pub use builtin::{BuiltinWorkflow, BUILTIN_WORKFLOWS, DEFAULT_WORKFLOW};
pub use definition::{ArticleConfig, PacketConfig, StepDefinition, WorkflowDefinition};
pub use registry::StepRegistry;
pub use template::{SlotValues, Template, TemplateSet};

use crate::{
    error::{RelayError, Result},
    models::{FieldBinding, Step},
};

/// Slot name bound to the packet content.
pub const PACKET_SLOT: &str = "packet";
/// Slot name bound to the article card id.
pub const ARTICLE_ID_SLOT: &str = "article_id";
/// Slot name bound to the article card title.
pub const ARTICLE_TITLE_SLOT: &str = "article_title";

const SHARED_SLOTS: [&str; 3] = [PACKET_SLOT, ARTICLE_ID_SLOT, ARTICLE_TITLE_SLOT];

/// What a template slot reads when rendered for a particular step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef<'a> {
    /// The packet store content
    Packet,
    /// The article card id
    ArticleId,
    /// The article card title
    ArticleTitle,
    /// A field of the rendering step (`{{ name }}`) or another
    /// step (`{{ step.name }}`)
    Field { step: &'a str, field: &'a str },
}

impl<'a> SlotRef<'a> {
    /// Classifies a slot name as seen from `step_id`.
    pub fn classify(step_id: &'a str, slot: &'a str) -> Self {
        match slot {
            PACKET_SLOT => SlotRef::Packet,
            ARTICLE_ID_SLOT => SlotRef::ArticleId,
            ARTICLE_TITLE_SLOT => SlotRef::ArticleTitle,
            _ => match slot.split_once('.') {
                Some((step, field)) => SlotRef::Field { step, field },
                None => SlotRef::Field {
                    step: step_id,
                    field: slot,
                },
            },
        }
    }
}

/// A validated workflow.
#[derive(Debug, Clone)]
pub struct Workflow {
    name: String,
    title: Option<String>,
    description: Option<String>,
    registry: StepRegistry,
    templates: TemplateSet,
    packet: Option<PacketConfig>,
    article: ArticleConfig,
}

impl Workflow {
    /// Validates a definition and compiles its templates.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Configuration`, `RelayError::UnknownTemplate` or
    /// `RelayError::UnknownSlot` describing the first defect found.
    pub fn from_definition(definition: WorkflowDefinition) -> Result<Self> {
        let WorkflowDefinition {
            name,
            title,
            description,
            packet,
            article,
            templates,
            steps,
        } = definition;

        if steps.is_empty() {
            return Err(RelayError::configuration(format!(
                "workflow '{name}' declares no steps"
            )));
        }

        let templates = TemplateSet::compile(
            templates
                .iter()
                .map(|(id, skeleton)| (id.as_str(), skeleton.as_str())),
        )?;

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let template = step.template.unwrap_or_else(|| step.id.clone());
                Step {
                    index,
                    id: step.id,
                    label: step.label,
                    description: step.description,
                    template,
                    fields: step.fields,
                }
            })
            .collect();

        let workflow = Self {
            name,
            title,
            description,
            registry: StepRegistry::new(steps),
            templates,
            packet,
            article,
        };
        workflow.validate()?;

        debug!(
            "Loaded workflow '{}' with {} steps and {} templates",
            workflow.name,
            workflow.registry.len(),
            workflow.templates.len()
        );
        Ok(workflow)
    }

    /// Parses and validates a TOML workflow. `origin` names the source in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Parse` for malformed TOML, otherwise the errors
    /// of [`Workflow::from_definition`].
    pub fn from_toml_str(origin: &str, text: &str) -> Result<Self> {
        let definition: WorkflowDefinition =
            toml::from_str(text).map_err(|source| RelayError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_definition(definition)
    }

    /// Reads a workflow file.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::FileSystem` when the file cannot be read,
    /// otherwise the errors of [`Workflow::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RelayError::FileSystem {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&path.display().to_string(), &text)
    }

    /// Loads one of the built-in workflows.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Configuration` for an unknown name.
    pub fn builtin(name: &str) -> Result<Self> {
        builtin::find(name)
            .ok_or_else(|| {
                RelayError::configuration(format!(
                    "unknown built-in workflow '{name}' (available: {})",
                    builtin::names().join(", ")
                ))
            })?
            .load()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title, falling back to the name.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Packet configuration, if the workflow carries a packet.
    pub fn packet(&self) -> Option<&PacketConfig> {
        self.packet.as_ref()
    }

    pub fn article(&self) -> &ArticleConfig {
        &self.article
    }

    /// Compiled template of a step.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownTemplate`; cannot happen for steps of a
    /// validated workflow.
    pub fn template_for(&self, step: &Step) -> Result<&Template> {
        self.templates
            .get(&step.template)
            .ok_or_else(|| RelayError::UnknownTemplate {
                id: step.template.clone(),
            })
    }

    fn validate(&self) -> Result<()> {
        let mut step_ids = BTreeSet::new();
        for step in self.registry.steps_in_order() {
            if step.id.is_empty() || step.id.contains('.') {
                return Err(RelayError::configuration(format!(
                    "step id '{}' must be non-empty and must not contain '.'",
                    step.id
                )));
            }
            if !step_ids.insert(step.id.as_str()) {
                return Err(RelayError::configuration(format!(
                    "duplicate step id '{}'",
                    step.id
                )));
            }
            self.validate_fields(step)?;
        }

        for step in self.registry.steps_in_order() {
            let template = self.template_for(step)?;
            for slot in template.slots() {
                self.validate_slot(step, slot)?;
            }
        }
        Ok(())
    }

    fn validate_fields(&self, step: &Step) -> Result<()> {
        let mut names = BTreeSet::new();
        for field in &step.fields {
            if field.name.is_empty() || field.name.contains('.') {
                return Err(RelayError::configuration(format!(
                    "step '{}': field name '{}' must be non-empty and must not contain '.'",
                    step.id, field.name
                )));
            }
            if !names.insert(field.name.as_str()) {
                return Err(RelayError::configuration(format!(
                    "step '{}': duplicate field '{}'",
                    step.id, field.name
                )));
            }
            if field.bind == FieldBinding::Local && SHARED_SLOTS.contains(&field.name.as_str()) {
                return Err(RelayError::configuration(format!(
                    "step '{}': local field '{}' shadows a shared slot; bind it instead",
                    step.id, field.name
                )));
            }
            if field.bind == FieldBinding::Packet && self.packet.is_none() {
                return Err(RelayError::configuration(format!(
                    "step '{}': field '{}' is bound to the packet but the workflow has no [packet] table",
                    step.id, field.name
                )));
            }
        }
        Ok(())
    }

    fn validate_slot(&self, step: &Step, slot: &str) -> Result<()> {
        let missing = || RelayError::UnknownSlot {
            template: step.template.clone(),
            slot: slot.to_string(),
        };

        match SlotRef::classify(&step.id, slot) {
            SlotRef::Packet if self.packet.is_none() => Err(RelayError::configuration(format!(
                "template '{}' uses {{{{ packet }}}} but the workflow has no [packet] table",
                step.template
            ))),
            SlotRef::Packet | SlotRef::ArticleId | SlotRef::ArticleTitle => Ok(()),
            SlotRef::Field { step: owner, field } => self
                .registry
                .get(owner)
                .and_then(|owner| owner.field(field))
                .map(|_| ())
                .ok_or_else(missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STEPS: &str = r#"
name = "two"
title = "Two steps"

[packet]
template = "=== [PROJECT LOG] ===\n=== [/PROJECT LOG] ==="

[templates]
log = "Source: {{ raw }}\n{{ packet }}"
card = "Article {{ article_id }}: {{ article_title }} after {{ log.raw }}"

[[steps]]
id = "log"
label = "Log"

[[steps.fields]]
name = "raw"
label = "Raw source"

[[steps]]
id = "card"
label = "Card"

[[steps.fields]]
name = "id"
label = "Article id"
bind = "article_id"
"#;

    #[test]
    fn test_loads_valid_workflow() {
        let workflow = Workflow::from_toml_str("two", TWO_STEPS).unwrap();
        assert_eq!(workflow.name(), "two");
        assert_eq!(workflow.title(), "Two steps");
        assert_eq!(workflow.registry().len(), 2);
        assert_eq!(workflow.registry().step_at(1).unwrap().template, "card");
        assert!(workflow.packet().is_some());
        assert_eq!(workflow.article().article_id, "A01");
    }

    #[test]
    fn test_slot_classification() {
        assert_eq!(SlotRef::classify("s", "packet"), SlotRef::Packet);
        assert_eq!(SlotRef::classify("s", "article_id"), SlotRef::ArticleId);
        assert_eq!(SlotRef::classify("s", "article_title"), SlotRef::ArticleTitle);
        assert_eq!(
            SlotRef::classify("s", "goal"),
            SlotRef::Field {
                step: "s",
                field: "goal"
            }
        );
        assert_eq!(
            SlotRef::classify("s", "outline.title"),
            SlotRef::Field {
                step: "outline",
                field: "title"
            }
        );
    }

    #[test]
    fn test_rejects_no_steps() {
        let err = Workflow::from_toml_str("empty", "name = \"empty\"").unwrap_err();
        assert!(err.to_string().contains("declares no steps"));
    }

    #[test]
    fn test_rejects_missing_template() {
        let text = r#"
name = "w"
[[steps]]
id = "a"
label = "A"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(matches!(err, RelayError::UnknownTemplate { ref id } if id == "a"));
    }

    #[test]
    fn test_rejects_unresolved_slot() {
        let text = r#"
name = "w"
[templates]
a = "{{ nope }}"
[[steps]]
id = "a"
label = "A"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(matches!(err, RelayError::UnknownSlot { ref slot, .. } if slot == "nope"));
    }

    #[test]
    fn test_rejects_cross_step_slot_to_missing_field() {
        let text = r#"
name = "w"
[templates]
a = "{{ a.x }}"
b = "{{ a.y }}"
[[steps]]
id = "a"
label = "A"
[[steps.fields]]
name = "x"
label = "X"
[[steps]]
id = "b"
label = "B"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(matches!(err, RelayError::UnknownSlot { ref slot, .. } if slot == "a.y"));
    }

    #[test]
    fn test_rejects_packet_slot_without_packet() {
        let text = r#"
name = "w"
[templates]
a = "{{ packet }}"
[[steps]]
id = "a"
label = "A"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(err.to_string().contains("no [packet] table"));
    }

    #[test]
    fn test_rejects_packet_binding_without_packet() {
        let text = r#"
name = "w"
[templates]
a = "static"
[[steps]]
id = "a"
label = "A"
[[steps.fields]]
name = "log"
label = "Log"
bind = "packet"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(err.to_string().contains("bound to the packet"));
    }

    #[test]
    fn test_rejects_duplicate_step_ids() {
        let text = r#"
name = "w"
[templates]
a = "static"
[[steps]]
id = "a"
label = "A"
[[steps]]
id = "a"
label = "Again"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(err.to_string().contains("duplicate step id 'a'"));
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let text = r#"
name = "w"
[templates]
a = "{{ x }}"
[[steps]]
id = "a"
label = "A"
[[steps.fields]]
name = "x"
label = "X"
[[steps.fields]]
name = "x"
label = "X again"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'x'"));
    }

    #[test]
    fn test_rejects_local_field_shadowing_shared_slot() {
        let text = r#"
name = "w"
[templates]
a = "{{ article_id }}"
[[steps]]
id = "a"
label = "A"
[[steps.fields]]
name = "article_id"
label = "Id"
"#;
        let err = Workflow::from_toml_str("w", text).unwrap_err();
        assert!(err.to_string().contains("shadows a shared slot"));
    }

    #[test]
    fn test_rejects_dotted_step_id() {
        let text = r#"
name = "w"
[templates]
a = "static"
[[steps]]
id = "a.b"
label = "A"
template = "a"
"#;
        assert!(Workflow::from_toml_str("w", text).is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let text = r#"
name = "w"
colour = "blue"
[templates]
a = "static"
[[steps]]
id = "a"
label = "A"
"#;
        let err = Workflow::from_toml_str("inline", text).unwrap_err();
        assert!(matches!(err, RelayError::Parse { ref origin, .. } if origin == "inline"));
    }

    #[test]
    fn test_rejects_unknown_field_keys() {
        let text = r#"
name = "w"
[templates]
a = "{{ x }}"
[[steps]]
id = "a"
label = "A"
[[steps.fields]]
name = "x"
label = "X"
fallbak = "typo"
"#;
        let err = Workflow::from_toml_str("inline", text).unwrap_err();
        assert!(matches!(err, RelayError::Parse { .. }));
        assert!(err.to_string().contains("fallbak"), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let err = Workflow::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, RelayError::FileSystem { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("two.toml");
        std::fs::write(&path, TWO_STEPS).expect("Failed to write workflow");

        let workflow = Workflow::load(&path).unwrap();
        assert_eq!(workflow.registry().index_of("card"), Some(1));
    }

    #[test]
    fn test_unknown_builtin() {
        let err = Workflow::builtin("nope").unwrap_err();
        assert!(err.to_string().contains("seo-8-step"));
    }
}
