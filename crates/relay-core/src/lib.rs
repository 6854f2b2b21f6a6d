//! Core library for the Relay prompt wizard.
//!
//! Relay walks a user through a fixed sequence of steps. At each step the
//! user fills in a few text fields and Relay renders a ready-to-paste prompt
//! for an external AI chat. The answer from that chat is pasted into a later
//! step, and an optional project packet carries the running project state
//! between chat sessions.
//!
//! # Architecture
//!
//! - **Workflows** ([`workflow`]): validated step tables and prompt templates,
//!   loaded from TOML or one of the built-ins
//! - **Sessions** ([`wizard`]): navigation, field values, the packet and the
//!   article card, plus prompt building
//! - **Display** ([`display`]): markdown formatting shared by the terminal and
//!   MCP front ends
//!
//! # Quick Start
//!
//! ```rust
//! use relay_core::{params::SetPacket, SessionBuilder};
//!
//! let mut session = SessionBuilder::new()
//!     .with_builtin(Some("seo-packet"))
//!     .build()?;
//!
//! session.update_packet(&SetPacket {
//!     text: "=== [PROJECT INFO] ===\n- 專案名稱：Acme\n=== [/PROJECT INFO] ===".to_string(),
//! })?;
//! session.set_field("topic_ideation", "goal", "grow trial signups")?;
//!
//! let prompt = session.build_prompt_for("topic_ideation")?;
//! assert!(prompt.contains("專案名稱：Acme"));
//! assert!(prompt.contains("grow trial signups"));
//! # Ok::<(), relay_core::RelayError>(())
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod packet;
pub mod params;
pub mod placeholder;
pub mod wizard;
pub mod workflow;

// Re-export commonly used types
pub use display::{BuiltinWorkflows, NavigationResult, OperationStatus, PromptView, StepList};
pub use error::{RelayError, Result};
pub use models::{ArticleCard, FieldBinding, FieldSpec, SessionSnapshot, Step};
pub use packet::PacketStore;
pub use params::{GetField, JumpTo, SetArticle, SetField, SetPacket, StepRef};
pub use wizard::{write_workflow_file, SessionBuilder, WizardNavigator, WizardSession, WorkflowSource};
pub use workflow::{Workflow, DEFAULT_WORKFLOW};
