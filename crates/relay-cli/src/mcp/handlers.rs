//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use relay_core::{params as core, OperationStatus, StepList, WizardSession};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types stay free of MCP concerns. The transparent wrapper
// passes (de)serialization and the schema straight through to the wrapped
// type.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type StepRef = McpParams<core::StepRef>;
pub type SetField = McpParams<core::SetField>;
pub type GetField = McpParams<core::GetField>;
pub type JumpTo = McpParams<core::JumpTo>;
pub type SetPacket = McpParams<core::SetPacket>;
pub type SetArticle = McpParams<core::SetArticle>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    session: Arc<Mutex<WizardSession>>,
}

impl McpHandlers {
    pub fn new(session: Arc<Mutex<WizardSession>>) -> Self {
        Self { session }
    }

    pub async fn list_steps(&self) -> McpResult {
        debug!("list_steps");

        let session = self.session.lock().await;
        let workflow = session.workflow();
        let mut output = format!("# {}\n\n", workflow.title());
        if let Some(description) = workflow.description() {
            output.push_str(description);
            output.push_str("\n\n");
        }
        output.push_str(
            &StepList::new(workflow.registry().steps_in_order())
                .with_current(Some(session.current_index()))
                .to_string(),
        );
        text_result(output)
    }

    /// Markdown overview plus the JSON snapshot as a second content item.
    pub async fn session_status(&self) -> McpResult {
        debug!("session_status");

        let snapshot = self.session.lock().await.snapshot();
        let json = snapshot
            .to_json()
            .map_err(|e| to_mcp_error("Failed to serialize session", &e))?;

        Ok(CallToolResult::success(vec![
            Content::text(snapshot.to_string()),
            Content::text(json),
        ]))
    }

    pub async fn next_step(&self) -> McpResult {
        debug!("next_step");

        let mut session = self.session.lock().await;
        let moved = session.advance();
        text_result(session.navigation_result(moved).to_string())
    }

    pub async fn previous_step(&self) -> McpResult {
        debug!("previous_step");

        let mut session = self.session.lock().await;
        let moved = session.retreat();
        text_result(session.navigation_result(moved).to_string())
    }

    pub async fn jump_to_step(&self, Parameters(params): Parameters<JumpTo>) -> McpResult {
        debug!("jump_to_step: {:?}", params);

        let mut session = self.session.lock().await;
        let moved = session
            .jump(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to jump", &e))?;
        text_result(session.navigation_result(moved).to_string())
    }

    pub async fn set_field(&self, Parameters(params): Parameters<SetField>) -> McpResult {
        let params = params.as_ref();
        debug!(
            "set_field: {:?}.{} ({} bytes)",
            params.step,
            params.field,
            params.value.len()
        );

        let mut session = self.session.lock().await;
        session
            .update_field(params)
            .map_err(|e| to_mcp_error("Failed to set field", &e))?;
        let step = session
            .target_step(params.step.as_deref())
            .map_err(|e| to_mcp_error("Failed to set field", &e))?;

        let result = OperationStatus::field_stored(&step.id, params.field.trim(), &params.value);
        text_result(result.to_string())
    }

    pub async fn get_field(&self, Parameters(params): Parameters<GetField>) -> McpResult {
        debug!("get_field: {:?}", params);

        let value = self
            .session
            .lock()
            .await
            .read_field(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to get field", &e))?;
        text_result(value)
    }

    pub async fn set_packet(&self, Parameters(params): Parameters<SetPacket>) -> McpResult {
        let params = params.as_ref();
        debug!("set_packet: {} bytes", params.text.len());

        self.session
            .lock()
            .await
            .update_packet(params)
            .map_err(|e| to_mcp_error("Failed to set packet", &e))?;

        text_result(OperationStatus::packet_replaced(&params.text).to_string())
    }

    pub async fn get_packet(&self) -> McpResult {
        debug!("get_packet");

        let session = self.session.lock().await;
        let packet = session.packet().ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Workflow '{}' does not carry a packet",
                    session.workflow().name()
                ),
                None,
            )
        })?;
        text_result(packet.content())
    }

    pub async fn set_article(&self, Parameters(params): Parameters<SetArticle>) -> McpResult {
        debug!("set_article: {:?}", params);

        let mut session = self.session.lock().await;
        session
            .update_article(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to set article card", &e))?;
        let result = OperationStatus::success(format!("Article card: {}", session.article()));
        text_result(result.to_string())
    }

    pub async fn render_prompt(&self, Parameters(params): Parameters<StepRef>) -> McpResult {
        debug!("render_prompt: {:?}", params);

        let session = self.session.lock().await;
        let view = session
            .prompt_view(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to render prompt", &e))?;
        text_result(view.to_string())
    }

    pub async fn reset_session(&self) -> McpResult {
        debug!("reset_session");

        let mut session = self.session.lock().await;
        session.reset_all();
        text_result(OperationStatus::session_reset(session.current_step()).to_string())
    }

    /// List one prompt per workflow step
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let session = self.session.lock().await;
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: prompts::step_prompts(&session),
        })
    }

    /// Render a step's prompt with the given field arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let session = self.session.lock().await;
        prompts::render_step_prompt(&session, &request.name, request.arguments.as_ref())
    }
}
