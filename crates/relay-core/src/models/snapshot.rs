//! Serializable view of a wizard session.

use serde::{Deserialize, Serialize};

use super::ArticleCard;
use crate::error::Result;

/// Raw value of one local field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSnapshot {
    /// Step id the field belongs to
    pub step: String,
    /// Field name
    pub field: String,
    /// Raw text as typed, untrimmed
    pub value: String,
}

/// Point-in-time copy of everything a session holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    /// Workflow name
    pub workflow: String,
    /// 0-based index of the current step
    pub current_index: usize,
    /// Id of the current step
    pub current_step: String,
    /// Number of steps in the workflow
    pub total_steps: usize,
    /// Local field values in step order, then field order
    pub fields: Vec<FieldSnapshot>,
    /// Packet content (the template when never replaced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet: Option<String>,
    /// Whether the packet still holds its template
    pub packet_is_default: bool,
    /// Shared article card
    pub article: ArticleCard,
}

impl SessionSnapshot {
    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
