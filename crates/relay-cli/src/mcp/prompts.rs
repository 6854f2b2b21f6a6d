//! MCP prompts generated from the workflow's steps
//!
//! Each step becomes a prompt named after the step id. Its local fields are
//! the prompt arguments; bound fields (article card, packet) come from the
//! live session.

use relay_core::{FieldBinding, Step, WizardSession};
use rmcp::{
    model::{
        GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    ErrorData as McpError,
};

use super::errors::to_mcp_error;

fn prompt_description(step: &Step, total: usize) -> String {
    match &step.description {
        Some(description) => format!(
            "Step {}/{total}: {} - {description}",
            step.number(),
            step.label
        ),
        None => format!("Step {}/{total}: {}", step.number(), step.label),
    }
}

/// One prompt per step, in step order
pub fn step_prompts(session: &WizardSession) -> Vec<Prompt> {
    let steps = session.registry().steps_in_order();
    steps
        .iter()
        .map(|step| {
            let arguments = step
                .fields
                .iter()
                .filter(|field| field.bind == FieldBinding::Local)
                .map(|field| PromptArgument {
                    name: field.name.clone(),
                    title: None,
                    description: Some(field.label.clone()),
                    required: Some(false),
                })
                .collect();
            Prompt::new(
                &step.id,
                Some(&prompt_description(step, steps.len())),
                Some(arguments),
            )
        })
        .collect()
}

/// Renders a step against a scratch copy of the session.
///
/// Arguments override the step's local fields for this render only; the
/// live session is left untouched.
pub fn render_step_prompt(
    session: &WizardSession,
    name: &str,
    arguments: Option<&JsonObject>,
) -> Result<GetPromptResult, McpError> {
    let step = session
        .registry()
        .get(name)
        .ok_or_else(|| McpError::invalid_params(format!("Prompt '{name}' not found"), None))?;

    let mut scratch = session.clone();
    for (key, value) in arguments.into_iter().flatten() {
        let local = step
            .field(key)
            .is_some_and(|field| field.bind == FieldBinding::Local);
        if !local {
            return Err(McpError::invalid_params(
                format!("Prompt '{name}' has no argument '{key}'"),
                None,
            ));
        }
        let text = value.as_str().ok_or_else(|| {
            McpError::invalid_params(format!("Argument '{key}' must be a string"), None)
        })?;
        scratch
            .set_field(&step.id, key, text)
            .map_err(|e| to_mcp_error("Failed to apply argument", &e))?;
    }

    let prompt_text = scratch
        .build_prompt_for(&step.id)
        .map_err(|e| to_mcp_error("Failed to render prompt", &e))?;

    Ok(GetPromptResult {
        description: Some(prompt_description(step, session.registry().len())),
        messages: vec![PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::text(prompt_text),
        }],
    })
}

#[cfg(test)]
mod tests {
    use relay_core::SessionBuilder;
    use serde_json::json;

    use super::*;

    fn session(builtin: &str) -> WizardSession {
        SessionBuilder::new()
            .with_builtin(Some(builtin))
            .build()
            .unwrap()
    }

    fn message_text(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("Expected text content, got {other:?}"),
        }
    }

    fn arguments(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn test_one_prompt_per_step() {
        let session = session("seo-packet");
        let prompts = step_prompts(&session);

        assert_eq!(prompts.len(), 7);
        assert_eq!(prompts[0].name, "project_log");

        // Bound fields are not prompt arguments
        for prompt in &prompts {
            for argument in prompt.arguments.iter().flatten() {
                assert_ne!(argument.name, "article_id");
            }
        }
    }

    #[test]
    fn test_render_leaves_live_session_untouched() {
        let session = session("seo-8-step");
        let args = arguments(json!({ "goal": "grow trial signups" }));

        let result = render_step_prompt(&session, "topic_ideation", Some(&args)).unwrap();
        assert!(message_text(&result).contains("grow trial signups"));
        assert_eq!(session.get_field("topic_ideation", "goal").unwrap(), "");
    }

    #[test]
    fn test_render_without_arguments_uses_placeholders() {
        let session = session("seo-8-step");
        let result = render_step_prompt(&session, "topic_ideation", None).unwrap();
        assert!(message_text(&result).contains("[任務目標]"));
        assert!(result.description.unwrap().starts_with("Step 2/8"));
    }

    #[test]
    fn test_render_rejects_bad_arguments() {
        let session = session("seo-8-step");

        let err = render_step_prompt(&session, "nowhere", None).unwrap_err();
        assert!(err.message.contains("not found"));

        let args = arguments(json!({ "tone": "dry" }));
        let err = render_step_prompt(&session, "topic_ideation", Some(&args)).unwrap_err();
        assert!(err.message.contains("no argument 'tone'"));

        let args = arguments(json!({ "goal": 3 }));
        let err = render_step_prompt(&session, "topic_ideation", Some(&args)).unwrap_err();
        assert!(err.message.contains("must be a string"));
    }
}
