//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data types stay plain.

use std::fmt;

use super::preview;
use crate::models::{ArticleCard, FieldBinding, FieldSpec, SessionSnapshot, Step};

const PREVIEW_WIDTH: usize = 60;

impl fmt::Display for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- `{}`: {}", self.name, self.label)?;
        if self.multiline {
            write!(f, " (multi-line)")?;
        }
        if self.bind.is_shared() {
            write!(f, " (shared: {})", self.bind)?;
        }
        if !self.default.is_empty() {
            write!(f, " (default: {})", self.default)?;
        }
        writeln!(f)?;
        if let Some(hint) = &self.hint {
            writeln!(f, "  - e.g. {hint}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} (`{}`)", self.number(), self.label, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.fields.is_empty() {
            writeln!(f, "No inputs.")?;
        } else {
            for field in &self.fields {
                write!(f, "{field}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ArticleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.article_id.trim();
        let title = self.title.trim();
        write!(
            f,
            "{} {}",
            if id.is_empty() { "(no id)" } else { id },
            if title.is_empty() { "(untitled)" } else { title }
        )
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Session: {}", self.workflow)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Step: {}/{} (`{}`)",
            self.current_index + 1,
            self.total_steps,
            self.current_step
        )?;
        writeln!(f, "- Article: {}", self.article)?;
        if let Some(packet) = &self.packet {
            let state = if self.packet_is_default {
                "template"
            } else {
                "edited"
            };
            writeln!(f, "- Packet: {state}, {} characters", packet.chars().count())?;
        }

        let filled: Vec<_> = self
            .fields
            .iter()
            .filter(|field| !field.value.trim().is_empty())
            .collect();

        writeln!(f, "\n## Fields")?;
        writeln!(f)?;
        if filled.is_empty() {
            writeln!(f, "No fields filled in yet.")?;
        } else {
            for field in filled {
                writeln!(
                    f,
                    "- `{}.{}`: {}",
                    field.step,
                    field.field,
                    preview(&field.value, PREVIEW_WIDTH)
                )?;
            }
        }
        Ok(())
    }
}
