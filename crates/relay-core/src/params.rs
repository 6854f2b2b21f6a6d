//! Parameter structures for session operations.
//!
//! These structures are shared by every interface (the interactive shell,
//! the one-shot CLI commands and the MCP server) and carry no framework
//! derives beyond serde. JSON schema generation is available behind the
//! `schema` feature.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap these in their own types (`#[serde(transparent)]`
//! for MCP, `From<..Args>` for clap) and hand them to the handler methods on
//! [`crate::WizardSession`].
//!
//! Wherever a step is optional, omitting it targets the current step.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Selects a step, or the current step when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepRef {
    /// Step id or 1-based step number; defaults to the current step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

/// Parameters for storing a field value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetField {
    /// Step id or 1-based step number; defaults to the current step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Field name as declared by the step
    pub field: String,
    /// Raw text to store; leading and trailing whitespace is kept
    pub value: String,
}

impl SetField {
    /// Checks that a field name was given.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank field name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use relay_core::params::SetField;
    ///
    /// let params = SetField {
    ///     step: None,
    ///     field: " ".to_string(),
    ///     value: "text".to_string(),
    /// };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        require_name("field", &self.field)
    }
}

/// Parameters for reading a field value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GetField {
    /// Step id or 1-based step number; defaults to the current step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Field name as declared by the step
    pub field: String,
}

impl GetField {
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank field name.
    pub fn validate(&self) -> Result<()> {
        require_name("field", &self.field)
    }
}

/// Parameters for moving to a step.
///
/// A number outside `1..=N` leaves the wizard where it is; an unknown step
/// id is an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct JumpTo {
    /// Step id or 1-based step number
    pub step: String,
}

/// Where a [`JumpTo`] points once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTarget<'a> {
    /// A 1-based step number, possibly out of range; numbers past the `i64`
    /// range saturate
    Number(i64),
    /// A step id
    Id(&'a str),
}

impl JumpTo {
    /// Parses the step reference.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank reference.
    pub fn target(&self) -> Result<JumpTarget<'_>> {
        let step = self.step.trim();
        require_name("step", step)?;

        let digits = step.strip_prefix(['+', '-']).unwrap_or(step);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(JumpTarget::Id(step));
        }
        let number = step.parse::<i64>().unwrap_or(if step.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        Ok(JumpTarget::Number(number))
    }
}

/// Parameters for replacing the packet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPacket {
    /// Full packet text; replaces the previous content wholesale
    pub text: String,
}

/// Parameters for updating the article card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetArticle {
    /// New article id, e.g. `A07`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    /// New article title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SetArticle {
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` when neither value is given.
    pub fn validate(&self) -> Result<()> {
        if self.article_id.is_none() && self.title.is_none() {
            return Err(RelayError::invalid_input("article_id")
                .with_reason("Provide an article id, a title, or both"));
        }
        Ok(())
    }
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RelayError::invalid_input(field).with_reason("Must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_requires_field_name() {
        let params = SetField {
            step: Some("outline".to_string()),
            field: String::new(),
            value: "x".to_string(),
        };
        match params.validate().unwrap_err() {
            RelayError::InvalidInput { field, reason } => {
                assert_eq!(field, "field");
                assert!(reason.contains("empty"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_set_field_deserializes_without_step() {
        let params: SetField =
            serde_json::from_str(r#"{"field": "goal", "value": "  keep spaces "}"#).unwrap();
        assert!(params.step.is_none());
        assert_eq!(params.value, "  keep spaces ");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_jump_targets() {
        let jump = |step: &str| JumpTo {
            step: step.to_string(),
        };
        assert_eq!(jump("3").target().unwrap(), JumpTarget::Number(3));
        assert_eq!(jump(" -1 ").target().unwrap(), JumpTarget::Number(-1));
        assert_eq!(jump("outline").target().unwrap(), JumpTarget::Id("outline"));
        assert_eq!(jump("+2").target().unwrap(), JumpTarget::Number(2));
        assert_eq!(jump("3a").target().unwrap(), JumpTarget::Id("3a"));
        assert_eq!(jump("-").target().unwrap(), JumpTarget::Id("-"));
        assert!(jump("  ").target().is_err());
    }

    #[test]
    fn test_jump_numbers_beyond_i64_saturate() {
        let jump = |step: &str| JumpTo {
            step: step.to_string(),
        };
        assert_eq!(
            jump("99999999999999999999").target().unwrap(),
            JumpTarget::Number(i64::MAX)
        );
        assert_eq!(
            jump(" -99999999999999999999 ").target().unwrap(),
            JumpTarget::Number(i64::MIN)
        );
    }

    #[test]
    fn test_set_article_requires_a_value() {
        assert!(SetArticle::default().validate().is_err());
        let params = SetArticle {
            article_id: Some("A07".to_string()),
            title: None,
        };
        assert!(params.validate().is_ok());
    }
}
