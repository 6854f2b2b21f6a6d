//! Declarative workflow definition as read from TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ArticleCard, FieldSpec, DEFAULT_ARTICLE_ID};

/// Raw workflow table: steps, templates, packet and article defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDefinition {
    /// Short identifier
    pub name: String,

    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// One-paragraph summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Packet configuration; workflows without one cannot use `{{ packet }}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketConfig>,

    /// Article card defaults and fallback labels
    #[serde(default)]
    pub article: ArticleConfig,

    /// Template skeletons keyed by id
    #[serde(default)]
    pub templates: BTreeMap<String, String>,

    /// Steps in wizard order
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// Packet skeleton and placeholder label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PacketConfig {
    /// Initial packet content, restored on reset
    #[serde(default)]
    pub template: String,

    /// Label shown as `[fallback]` while the packet is blank
    #[serde(default = "default_packet_fallback")]
    pub fallback: String,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            template: String::new(),
            fallback: default_packet_fallback(),
        }
    }
}

/// Article card defaults and the fallback labels of its slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArticleConfig {
    #[serde(default = "default_article_id")]
    pub article_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default = "default_id_fallback")]
    pub id_fallback: String,

    #[serde(default = "default_title_fallback")]
    pub title_fallback: String,
}

impl ArticleConfig {
    /// The article card a fresh session starts with.
    pub fn initial_card(&self) -> ArticleCard {
        ArticleCard::new(self.article_id.clone(), self.title.clone())
    }
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            article_id: default_article_id(),
            title: String::new(),
            id_fallback: default_id_fallback(),
            title_fallback: default_title_fallback(),
        }
    }
}

/// One step as written in a workflow file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDefinition {
    pub id: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Template id; defaults to the step id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_packet_fallback() -> String {
    "packet not created yet".to_string()
}

fn default_article_id() -> String {
    DEFAULT_ARTICLE_ID.to_string()
}

fn default_id_fallback() -> String {
    "article id".to_string()
}

fn default_title_fallback() -> String {
    "article title".to_string()
}
