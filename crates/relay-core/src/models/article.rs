//! Article card reference shared across steps.

use serde::{Deserialize, Serialize};

/// Default article id used when a workflow does not declare one.
pub const DEFAULT_ARTICLE_ID: &str = "A01";

/// Identifies which downstream article later steps refer to.
///
/// No uniqueness check is made against the article cards listed inside the
/// packet; the packet is opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleCard {
    /// Free-text article id, `A01` by default
    pub article_id: String,

    /// Free-text article title, empty by default
    pub title: String,
}

impl ArticleCard {
    /// Creates an article card.
    pub fn new(article_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            title: title.into(),
        }
    }
}

impl Default for ArticleCard {
    fn default() -> Self {
        Self::new(DEFAULT_ARTICLE_ID, "")
    }
}
