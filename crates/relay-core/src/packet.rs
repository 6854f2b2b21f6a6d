//! The carried-forward project packet.
//!
//! The packet is a block of text the user keeps between chat sessions
//! (called "meeting log" or "project packet"). It is opaque: this module
//! never parses it, only hands it whole to templates and back to the user.

use log::debug;

use crate::{placeholder, workflow::PacketConfig};

/// Holds the packet content for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketStore {
    template: String,
    fallback: String,
    content: Option<String>,
}

impl PacketStore {
    /// Creates a store whose content starts as the configured template.
    pub fn new(config: &PacketConfig) -> Self {
        Self {
            template: config.template.clone(),
            fallback: config.fallback.clone(),
            content: None,
        }
    }

    /// Current content, or the template when never replaced.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.template)
    }

    /// Replaces the content wholesale. No merge and no structure check.
    pub fn set_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!("Packet replaced ({} bytes)", text.len());
        self.content = Some(text);
    }

    /// Content for a template slot: the trimmed content, or `[fallback]`
    /// while it is blank.
    pub fn resolved_or_placeholder(&self) -> String {
        placeholder::resolve(Some(self.content()), &self.fallback)
    }

    /// The skeleton restored on reset.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the content is still the template.
    pub fn is_default(&self) -> bool {
        self.content() == self.template
    }

    /// Restores the template.
    pub fn reset(&mut self) {
        self.content = None;
    }
}
