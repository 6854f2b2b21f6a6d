//! Display formatting for steps, prompts and session state.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers. Everything
//! renders as markdown so the terminal renderer and MCP clients can show the
//! same text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Step, Snapshot)│───▶│ (StepList,      │───▶│ (Terminal/MCP)  │
//! │                 │    │  PromptView)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Step and workflow listings
//! - [`results`]: Rendered prompts, navigation outcomes and confirmations
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use relay_core::display::OperationStatus;
//!
//! let status = OperationStatus::packet_replaced("=== [PROJECT LOG] ===");
//! assert_eq!(status.to_string(), "Success: Packet replaced (21 characters)\n");
//! ```

pub mod collections;
pub mod models;
pub mod results;

pub use collections::{BuiltinWorkflows, StepList};
pub use results::{fence_for, NavigationResult, OperationStatus, PromptView};

/// First line of `text`, cut to `max` characters with an ellipsis.
pub(crate) fn preview(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    let first_line = trimmed.lines().next().unwrap_or_default();
    let mut out: String = first_line.chars().take(max).collect();
    if first_line.chars().count() > max || trimmed.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}
