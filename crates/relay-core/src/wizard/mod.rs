//! Wizard sessions: navigation, field state and prompt building.
//!
//! A [`WizardSession`] is the single mutable aggregate of a run. It owns a
//! [`WizardNavigator`] for the current step, every field value, the packet
//! store and the article card, and renders prompts from them on demand.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ SessionBuilder  │───▶│  WizardSession  │───▶│    Workflow     │
//! │ (file, builtin, │    │ (navigator,     │    │ (registry,      │
//! │  XDG default)   │    │  fields, packet)│    │  templates)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    Configuration         Mutable state          Immutable table
//! ```
//!
//! Rendering is a pure function of the session state: no I/O, no clock and
//! no randomness. Editing a field never moves the wizard, and moving never
//! edits a field.
//!
//! # Examples
//!
//! ```rust
//! use relay_core::SessionBuilder;
//!
//! let mut session = SessionBuilder::new()
//!     .with_builtin(Some("seo-8-step"))
//!     .build()?;
//!
//! session.set_field("product_brief", "content", "Acme invoices in one click")?;
//! let prompt = session.render_current()?;
//! assert!(prompt.contains("Acme invoices in one click"));
//!
//! session.advance();
//! assert_eq!(session.current_step().id, "topic_ideation");
//! # Ok::<(), relay_core::RelayError>(())
//! ```

mod builder;
mod handlers;
mod navigator;
mod session;


pub use builder::{write_workflow_file, SessionBuilder, WorkflowSource};
pub use navigator::WizardNavigator;
pub use session::WizardSession;
