//! Parameter-driven session operations shared by the shell and MCP server.

use crate::{
    display::{NavigationResult, PromptView},
    error::Result,
    models::Step,
    params::{GetField, JumpTarget, JumpTo, SetArticle, SetField, SetPacket, StepRef},
};

use super::WizardSession;

impl WizardSession {
    /// The referenced step, or the current step when `reference` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` for an unknown reference.
    pub fn target_step(&self, reference: Option<&str>) -> Result<&Step> {
        match reference {
            Some(reference) => self.resolve_step(reference),
            None => Ok(self.current_step()),
        }
    }

    /// Handle storing a field value.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank field name, otherwise
    /// the errors of [`WizardSession::set_field`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use relay_core::{params::SetField, SessionBuilder};
    ///
    /// let mut session = SessionBuilder::new().with_builtin(Some("seo-8-step")).build()?;
    /// session.update_field(&SetField {
    ///     step: None,
    ///     field: "content".to_string(),
    ///     value: "Acme Corp sells SaaS invoicing.".to_string(),
    /// })?;
    /// assert_eq!(
    ///     session.get_field("product_brief", "content")?,
    ///     "Acme Corp sells SaaS invoicing."
    /// );
    /// # Ok::<(), relay_core::RelayError>(())
    /// ```
    pub fn update_field(&mut self, params: &SetField) -> Result<()> {
        params.validate()?;
        let step_id = self.target_step(params.step.as_deref())?.id.clone();
        self.set_field(&step_id, params.field.trim(), params.value.clone())
    }

    /// Handle reading a field's raw value.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank field name, otherwise
    /// the errors of [`WizardSession::get_field`].
    pub fn read_field(&self, params: &GetField) -> Result<String> {
        params.validate()?;
        let step = self.target_step(params.step.as_deref())?;
        self.get_field(&step.id, params.field.trim())
    }

    /// Handle moving to a step by id or 1-based number.
    ///
    /// Numbers outside the workflow are ignored and report no movement.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` for a blank reference and
    /// `RelayError::UnknownStep` for an unknown id.
    pub fn jump(&mut self, params: &JumpTo) -> Result<bool> {
        match params.target()? {
            JumpTarget::Number(number) => {
                let index = usize::try_from(number)
                    .ok()
                    .and_then(|number| number.checked_sub(1));
                Ok(index.is_some_and(|index| self.jump_to(index)))
            }
            JumpTarget::Id(id) => {
                let index = self.resolve_step(id)?.index;
                Ok(self.jump_to(index))
            }
        }
    }

    /// Describes the current position after a navigation call.
    pub fn navigation_result(&self, moved: bool) -> NavigationResult<'_> {
        NavigationResult {
            moved,
            step: self.current_step(),
            total: self.registry().len(),
        }
    }

    /// Handle rendering a step's prompt with a heading.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::UnknownStep` for an unknown reference.
    pub fn prompt_view(&self, params: &StepRef) -> Result<PromptView<'_>> {
        let step = self.target_step(params.step.as_deref())?;
        let prompt = self.build_prompt_for(&step.id)?;
        Ok(PromptView::new(step, self.registry().len(), prompt))
    }

    /// Handle replacing the packet.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Configuration` when the workflow has no packet.
    pub fn update_packet(&mut self, params: &SetPacket) -> Result<()> {
        self.set_packet(params.text.clone())
    }

    /// Handle updating the article card; omitted values are kept.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidInput` when neither value is given.
    pub fn update_article(&mut self, params: &SetArticle) -> Result<()> {
        params.validate()?;
        if let Some(article_id) = &params.article_id {
            self.set_article_id(article_id.clone());
        }
        if let Some(title) = &params.title {
            self.set_article_title(title.clone());
        }
        Ok(())
    }
}
