//! Error types for the relay library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all relay operations.
///
/// Most variants describe configuration defects (a workflow that references
/// a template or slot it never declares). Workflows are validated when they
/// are loaded, so a session built from a validated workflow only surfaces
/// `UnknownStep` / `UnknownField` when a caller passes an id the workflow
/// does not declare.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Step id not declared by the workflow
    #[error("Step '{id}' not found")]
    UnknownStep { id: String },
    /// Field not declared by the given step
    #[error("Field '{field}' not found on step '{step}'")]
    UnknownField { step: String, field: String },
    /// Template id not declared by the workflow
    #[error("Template '{id}' not found")]
    UnknownTemplate { id: String },
    /// A template slot with no value to fill it
    #[error("Template '{template}' has no value for slot '{slot}'")]
    UnknownSlot { template: String, slot: String },
    /// Template skeleton failed to compile or render
    #[error("Template '{id}' is invalid: {source}")]
    Template {
        id: String,
        #[source]
        source: minijinja::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Workflow definition could not be parsed
    #[error("Failed to parse workflow '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RelayError {
        RelayError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RelayError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_step(id: impl Into<String>) -> Self {
        Self::UnknownStep { id: id.into() }
    }

    pub(crate) fn unknown_field(step: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            step: step.into(),
            field: field.into(),
        }
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
