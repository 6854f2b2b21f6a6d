//! Data models for steps, fields and session state.
//!
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures apart from
//! presentation.
//!
//! # Examples
//!
//! ```rust
//! use relay_core::models::{FieldBinding, FieldSpec, Step};
//!
//! let step = Step {
//!     index: 0,
//!     id: "project_log".to_string(),
//!     label: "Project log".to_string(),
//!     description: None,
//!     template: "project_log".to_string(),
//!     fields: vec![
//!         FieldSpec::new("raw_source", "Source material").with_fallback("paste source here"),
//!         FieldSpec::new("packet", "Current packet").bound_to(FieldBinding::Packet),
//!     ],
//! };
//!
//! assert_eq!(step.number(), 1);
//! assert_eq!(step.field("raw_source").unwrap().fallback_label(), "paste source here");
//! assert_eq!(step.field("packet").unwrap().fallback_label(), "Current packet");
//! ```

pub mod article;
pub mod snapshot;
pub mod step;


pub use article::{ArticleCard, DEFAULT_ARTICLE_ID};
pub use snapshot::{FieldSnapshot, SessionSnapshot};
pub use step::{FieldBinding, FieldSpec, Step};
