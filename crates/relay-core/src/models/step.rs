//! Step and field specification models.

use serde::{Deserialize, Serialize};

/// Where the value typed into a field is stored.
///
/// Local fields live in the session's per-step field table. Bound fields
/// mirror their value into state shared by every step, so later steps can
/// refer to it through the shared slots (`{{ article_id }}`, `{{ article_title }}`,
/// `{{ packet }}`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldBinding {
    /// Stored per step
    #[default]
    Local,

    /// Mirrors the article card id
    ArticleId,

    /// Mirrors the article card title
    ArticleTitle,

    /// Replaces the packet content wholesale
    Packet,
}

impl FieldBinding {
    /// Short name used in workflow files and step listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldBinding::Local => "local",
            FieldBinding::ArticleId => "article_id",
            FieldBinding::ArticleTitle => "article_title",
            FieldBinding::Packet => "packet",
        }
    }

    /// Whether the value is shared across steps.
    pub fn is_shared(&self) -> bool {
        !matches!(self, FieldBinding::Local)
    }
}

/// Declares one input a step collects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Identifier used in templates and by `set_field`
    pub name: String,

    /// Human-readable label shown next to the input
    pub label: String,

    /// Label rendered as `[fallback]` when the input is blank; defaults to
    /// the field label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Initial raw text, restored on reset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,

    /// Whether the input expects multi-line text
    #[serde(default)]
    pub multiline: bool,

    /// Example input shown as a hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Where the value is stored
    #[serde(default)]
    pub bind: FieldBinding,
}

impl FieldSpec {
    /// Creates a local, single-line field whose fallback is its label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            fallback: None,
            default: String::new(),
            multiline: false,
            hint: None,
            bind: FieldBinding::Local,
        }
    }

    /// Sets the fallback label.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Sets the initial raw text.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the storage binding.
    pub fn bound_to(mut self, bind: FieldBinding) -> Self {
        self.bind = bind;
        self
    }

    /// Label used when the field resolves to a placeholder.
    pub fn fallback_label(&self) -> &str {
        self.fallback.as_deref().unwrap_or(&self.label)
    }
}

/// One stage of the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Position of the step within the workflow (0-indexed)
    pub index: usize,

    /// Stable identifier
    pub id: String,

    /// Human-readable name
    pub label: String,

    /// Optional guidance shown above the step's inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Id of the template rendered for this step
    pub template: String,

    /// Inputs collected by the step, in display order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Step {
    /// Looks up one of the step's fields by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// 1-based position, as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}
