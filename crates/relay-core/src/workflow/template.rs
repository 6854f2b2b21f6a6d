//! Template compilation and slot substitution.
//!
//! Skeletons are minijinja templates. `{{ goal }}` refers to a field of the
//! rendering step, `{{ outline.title }}` to a field of another step, and
//! `{{ packet }}`, `{{ article_id }}`, `{{ article_title }}` to shared session
//! state.
//!
//! Skeletons are compiled once, when the workflow loads, so a malformed
//! skeleton is a configuration error rather than a rendering failure. The
//! slot set of each template comes from its undeclared variables. Rendering
//! is a single pass: inserted values are never re-scanned for slots, and no
//! escaping is applied to them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

/// Slot name to already-resolved text.
pub type SlotValues = BTreeMap<String, String>;

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

fn template_error(id: &str, source: minijinja::Error) -> RelayError {
    RelayError::Template {
        id: id.to_string(),
        source,
    }
}

/// A compiled template skeleton.
#[derive(Debug, Clone)]
pub struct Template {
    id: String,
    slots: BTreeSet<String>,
    env: Arc<Environment<'static>>,
}

impl Template {
    /// Compiles a standalone skeleton.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Template` for a syntax error and
    /// `RelayError::Configuration` for a slot that is neither `name` nor
    /// `step.name`.
    pub fn parse(id: impl Into<String>, skeleton: &str) -> Result<Self> {
        let id = id.into();
        let mut env = environment();
        env.add_template_owned(id.clone(), skeleton.to_string())
            .map_err(|e| template_error(&id, e))?;
        Self::compiled(Arc::new(env), id)
    }

    fn compiled(env: Arc<Environment<'static>>, id: String) -> Result<Self> {
        let slots: BTreeSet<String> = env
            .get_template(&id)
            .map_err(|e| template_error(&id, e))?
            .undeclared_variables(true)
            .into_iter()
            .collect();
        check_slots(&id, &slots)?;
        Ok(Self { id, slots, env })
    }

    /// Template id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Distinct slot names, sorted.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    /// Whether the template declares the given slot.
    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains(name)
    }

    /// Substitutes every slot with its value.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownSlot` when `values` has no entry for a
    /// slot the template declares. Extra entries are ignored.
    pub fn render(&self, values: &SlotValues) -> Result<String> {
        let mut context = Map::new();
        for slot in &self.slots {
            let value = values.get(slot).ok_or_else(|| RelayError::UnknownSlot {
                template: self.id.clone(),
                slot: slot.clone(),
            })?;
            let value = Value::String(value.clone());
            match slot.split_once('.') {
                Some((step, field)) => {
                    if let Value::Object(fields) = context
                        .entry(step.to_string())
                        .or_insert_with(|| Value::Object(Map::new()))
                    {
                        fields.insert(field.to_string(), value);
                    }
                }
                None => {
                    context.insert(slot.clone(), value);
                }
            }
        }

        self.env
            .get_template(&self.id)
            .and_then(|template| template.render(&context))
            .map_err(|e| template_error(&self.id, e))
    }
}

/// Slots are `name` or `step.name`, and a name is never both a value and a
/// step.
fn check_slots(id: &str, slots: &BTreeSet<String>) -> Result<()> {
    for slot in slots {
        let Some((step, field)) = slot.split_once('.') else {
            continue;
        };
        if field.contains('.') {
            return Err(RelayError::configuration(format!(
                "template '{id}': slot '{slot}' must be 'name' or 'step.name'"
            )));
        }
        if slots.contains(step) {
            return Err(RelayError::configuration(format!(
                "template '{id}': '{step}' is used both as a slot and as a step"
            )));
        }
    }
    Ok(())
}

/// All templates of a workflow, keyed by id.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: BTreeMap<String, Template>,
}

impl TemplateSet {
    /// Compiles every `(id, skeleton)` pair into one shared environment.
    ///
    /// # Errors
    ///
    /// Returns the first compile error encountered.
    pub fn compile<'a, I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut env = environment();
        let mut ids = Vec::new();
        for (id, skeleton) in sources {
            env.add_template_owned(id.to_string(), skeleton.to_string())
                .map_err(|e| template_error(id, e))?;
            ids.push(id.to_string());
        }

        let env = Arc::new(env);
        let templates = ids
            .into_iter()
            .map(|id| Ok((id.clone(), Template::compiled(Arc::clone(&env), id)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { templates })
    }

    /// Looks up a template.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    /// Template ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the set holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Renders the named template.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownTemplate` for an undeclared id and
    /// `RelayError::UnknownSlot` for a missing slot value.
    pub fn render(&self, id: &str, values: &SlotValues) -> Result<String> {
        self.get(id)
            .ok_or_else(|| RelayError::UnknownTemplate { id: id.to_string() })?
            .render(values)
    }
}
