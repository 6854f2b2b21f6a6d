//! The form session aggregate.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};

use super::WizardNavigator;
use crate::{
    error::{RelayError, Result},
    models::{ArticleCard, FieldBinding, FieldSnapshot, FieldSpec, SessionSnapshot, Step},
    packet::PacketStore,
    placeholder,
    workflow::{SlotRef, SlotValues, StepRegistry, Workflow},
};

/// Everything one user's wizard run holds: the current step, every field
/// value, the packet and the article card.
///
/// The session owns its packet store and passes it explicitly into prompt
/// building; nothing is process-global. Values live only as long as the
/// session.
#[derive(Debug, Clone)]
pub struct WizardSession {
    workflow: Arc<Workflow>,
    navigator: WizardNavigator,
    fields: BTreeMap<String, BTreeMap<String, String>>,
    packet: Option<PacketStore>,
    article: ArticleCard,
}

impl WizardSession {
    /// Starts a session on the first step with every field at its default.
    pub fn new(workflow: Arc<Workflow>) -> Self {
        let navigator = WizardNavigator::new(workflow.registry().len());
        let fields = initial_fields(workflow.registry());
        let packet = workflow.packet().map(PacketStore::new);
        let article = workflow.article().initial_card();

        Self {
            workflow,
            navigator,
            fields,
            packet,
            article,
        }
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Shared handle to the workflow, for starting sibling sessions.
    pub fn workflow_handle(&self) -> Arc<Workflow> {
        Arc::clone(&self.workflow)
    }

    pub fn registry(&self) -> &StepRegistry {
        self.workflow.registry()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    /// The step the wizard is on.
    pub fn current_step(&self) -> &Step {
        // The navigator is bounded by the registry length and workflows
        // always declare at least one step.
        &self.registry().steps_in_order()[self.navigator.current()]
    }

    pub fn navigator(&self) -> &WizardNavigator {
        &self.navigator
    }

    /// Moves to the next step; a no-op on the last step.
    pub fn advance(&mut self) -> bool {
        self.navigator.advance()
    }

    /// Moves to the previous step; a no-op on the first step.
    pub fn retreat(&mut self) -> bool {
        self.navigator.retreat()
    }

    /// Moves to the step at `index`; out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.navigator.jump_to(index)
    }

    /// Resolves a step id or 1-based step number.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` when neither matches.
    pub fn resolve_step(&self, reference: &str) -> Result<&Step> {
        self.registry()
            .lookup(reference)
            .ok_or_else(|| RelayError::unknown_step(reference))
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    /// Raw value of a field; bound fields read the shared value.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` / `RelayError::UnknownField` for ids
    /// the workflow does not declare.
    pub fn get_field(&self, step: &str, field: &str) -> Result<String> {
        let spec = self.field_spec(step, field)?;
        let value = match spec.bind {
            FieldBinding::Local => self
                .fields
                .get(step)
                .and_then(|values| values.get(field))
                .cloned()
                .unwrap_or_default(),
            FieldBinding::ArticleId => self.article.article_id.clone(),
            FieldBinding::ArticleTitle => self.article.title.clone(),
            FieldBinding::Packet => self
                .packet
                .as_ref()
                .map(|packet| packet.content().to_string())
                .unwrap_or_default(),
        };
        Ok(value)
    }

    /// Stores raw input for a field. Bound fields write through to the
    /// article card or replace the packet.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` / `RelayError::UnknownField` for ids
    /// the workflow does not declare.
    pub fn set_field(&mut self, step: &str, field: &str, value: impl Into<String>) -> Result<()> {
        let bind = self.field_spec(step, field)?.bind;
        let value = value.into();
        debug!(
            "set_field {step}.{field} ({}, {} bytes)",
            bind.as_str(),
            value.len()
        );

        match bind {
            FieldBinding::Local => {
                self.fields
                    .entry(step.to_string())
                    .or_default()
                    .insert(field.to_string(), value);
            }
            FieldBinding::ArticleId => self.article.article_id = value,
            FieldBinding::ArticleTitle => self.article.title = value,
            FieldBinding::Packet => self.packet_mut()?.set_content(value),
        }
        Ok(())
    }

    /// Whether every field of the step is blank.
    ///
    /// Presentation layers use this to decide whether to show a prompt yet;
    /// prompt building itself never depends on it.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` for an undeclared step.
    pub fn is_blank(&self, step: &str) -> Result<bool> {
        let spec = self
            .registry()
            .get(step)
            .ok_or_else(|| RelayError::unknown_step(step))?;
        for field in &spec.fields {
            if !self.get_field(step, &field.name)?.trim().is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Packet and article card
    // ------------------------------------------------------------------

    /// The packet store, when the workflow carries a packet.
    pub fn packet(&self) -> Option<&PacketStore> {
        self.packet.as_ref()
    }

    /// Replaces the packet content.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Configuration` when the workflow has no packet.
    pub fn set_packet(&mut self, text: impl Into<String>) -> Result<()> {
        self.packet_mut()?.set_content(text);
        Ok(())
    }

    pub fn article(&self) -> &ArticleCard {
        &self.article
    }

    pub fn set_article_id(&mut self, article_id: impl Into<String>) {
        self.article.article_id = article_id.into();
    }

    pub fn set_article_title(&mut self, title: impl Into<String>) {
        self.article.title = title.into();
    }

    // ------------------------------------------------------------------
    // Prompt building
    // ------------------------------------------------------------------

    /// Renders the prompt of a step from the current state.
    ///
    /// Every slot of the step's template is filled with a resolved value:
    /// the step's own fields, fields of other steps (`{{ step.field }}`), the
    /// packet and the article card. Blank values become `[fallback]`. The
    /// result depends only on the session state, so repeated calls without
    /// intervening edits return identical text.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` for an undeclared step. Slot and
    /// template errors cannot occur for a validated workflow.
    pub fn build_prompt_for(&self, step_id: &str) -> Result<String> {
        let step = self
            .registry()
            .get(step_id)
            .ok_or_else(|| RelayError::unknown_step(step_id))?;
        let template = self.workflow.template_for(step)?;

        let mut values = SlotValues::new();
        for slot in template.slots() {
            values.insert(slot.to_string(), self.resolve_slot(step, slot)?);
        }
        template.render(&values)
    }

    /// Renders the prompt of the current step.
    ///
    /// # Errors
    ///
    /// See [`WizardSession::build_prompt_for`].
    pub fn render_current(&self) -> Result<String> {
        self.build_prompt_for(&self.current_step().id)
    }

    // ------------------------------------------------------------------
    // Whole-session operations
    // ------------------------------------------------------------------

    /// Clears all progress: fields back to their defaults, packet back to
    /// its template, article card back to its defaults, first step.
    pub fn reset_all(&mut self) {
        self.fields = initial_fields(self.workflow.registry());
        if let Some(packet) = self.packet.as_mut() {
            packet.reset();
        }
        self.article = self.workflow.article().initial_card();
        self.navigator.reset();
        info!("Session reset for workflow '{}'", self.workflow.name());
    }

    /// Copies the session state into a serializable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        let fields = self
            .registry()
            .steps_in_order()
            .iter()
            .flat_map(|step| {
                step.fields
                    .iter()
                    .filter(|field| field.bind == FieldBinding::Local)
                    .map(move |field| (step, field))
            })
            .map(|(step, field)| FieldSnapshot {
                step: step.id.clone(),
                field: field.name.clone(),
                value: self
                    .fields
                    .get(&step.id)
                    .and_then(|values| values.get(&field.name))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        SessionSnapshot {
            workflow: self.workflow.name().to_string(),
            current_index: self.current_index(),
            current_step: self.current_step().id.clone(),
            total_steps: self.registry().len(),
            fields,
            packet: self.packet.as_ref().map(|p| p.content().to_string()),
            packet_is_default: self.packet.as_ref().map_or(true, PacketStore::is_default),
            article: self.article.clone(),
        }
    }

    fn field_spec(&self, step: &str, field: &str) -> Result<&FieldSpec> {
        self.registry()
            .get(step)
            .ok_or_else(|| RelayError::unknown_step(step))?
            .field(field)
            .ok_or_else(|| RelayError::unknown_field(step, field))
    }

    fn packet_mut(&mut self) -> Result<&mut PacketStore> {
        let name = self.workflow.name().to_string();
        self.packet.as_mut().ok_or_else(|| {
            RelayError::configuration(format!("workflow '{name}' does not carry a packet"))
        })
    }

    fn resolve_slot(&self, step: &Step, slot: &str) -> Result<String> {
        let article = self.workflow.article();
        match SlotRef::classify(&step.id, slot) {
            SlotRef::Packet => self
                .packet
                .as_ref()
                .map(PacketStore::resolved_or_placeholder)
                .ok_or_else(|| RelayError::UnknownSlot {
                    template: step.template.clone(),
                    slot: slot.to_string(),
                }),
            SlotRef::ArticleId => Ok(placeholder::resolve(
                Some(&self.article.article_id),
                &article.id_fallback,
            )),
            SlotRef::ArticleTitle => Ok(placeholder::resolve(
                Some(&self.article.title),
                &article.title_fallback,
            )),
            SlotRef::Field { step: owner, field } => {
                let spec = self.field_spec(owner, field)?;
                let raw = self.get_field(owner, field)?;
                Ok(placeholder::resolve(Some(&raw), spec.fallback_label()))
            }
        }
    }
}

fn initial_fields(registry: &StepRegistry) -> BTreeMap<String, BTreeMap<String, String>> {
    registry
        .steps_in_order()
        .iter()
        .map(|step| {
            let values = step
                .fields
                .iter()
                .filter(|field| field.bind == FieldBinding::Local)
                .map(|field| (field.name.clone(), field.default.clone()))
                .collect();
            (step.id.clone(), values)
        })
        .collect()
}
