//! MCP server implementation for Relay
//!
//! Exposes one wizard session over the Model Context Protocol so an AI
//! assistant can walk the steps, fill fields and fetch rendered prompts.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use relay_core::WizardSession;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{GetField, JumpTo, McpResult, SetArticle, SetField, SetPacket, StepRef};

/// MCP server holding a single wizard session
#[derive(Clone)]
pub struct RelayMcpServer {
    session: Arc<Mutex<WizardSession>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RelayMcpServer {
    pub fn new(session: WizardSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.session.clone())
    }

    #[tool(
        name = "list_steps",
        description = "List the workflow's steps in order with their ids. The current step is marked with ◀. Use the ids or 1-based numbers with the other tools."
    )]
    async fn list_steps(&self) -> McpResult {
        self.handlers().list_steps().await
    }

    #[tool(
        name = "session_status",
        description = "Show the session state: current step, every stored field value, the article card and whether the packet was replaced. Returns a markdown overview followed by the same state as JSON."
    )]
    async fn session_status(&self) -> McpResult {
        self.handlers().session_status().await
    }

    #[tool(
        name = "next_step",
        description = "Move to the next step. On the last step nothing changes and the result says 'Still on'."
    )]
    async fn next_step(&self) -> McpResult {
        self.handlers().next_step().await
    }

    #[tool(
        name = "previous_step",
        description = "Move to the previous step. On the first step nothing changes and the result says 'Still on'."
    )]
    async fn previous_step(&self) -> McpResult {
        self.handlers().previous_step().await
    }

    #[tool(
        name = "jump_to_step",
        description = "Move to a step by id (e.g. 'outline') or 1-based number (e.g. '7'). Numbers outside the workflow leave the position unchanged."
    )]
    async fn jump_to_step(&self, params: Parameters<JumpTo>) -> McpResult {
        self.handlers().jump_to_step(params).await
    }

    #[tool(
        name = "set_field",
        description = "Store a field value. `step` defaults to the current step; `field` is the field name shown by list_steps or render_prompt. Values are kept exactly as given, including whitespace and newlines. Paste the AI chat's answer from an earlier step here to feed the next prompt."
    )]
    async fn set_field(&self, params: Parameters<SetField>) -> McpResult {
        self.handlers().set_field(params).await
    }

    #[tool(
        name = "get_field",
        description = "Read a field's stored value exactly as stored. `step` defaults to the current step."
    )]
    async fn get_field(&self, params: Parameters<GetField>) -> McpResult {
        self.handlers().get_field(params).await
    }

    #[tool(
        name = "set_packet",
        description = "Replace the project packet with the latest version returned by the AI chat. The text is stored verbatim; an empty text makes prompts show the packet placeholder. Only available when the workflow carries a packet."
    )]
    async fn set_packet(&self, params: Parameters<SetPacket>) -> McpResult {
        self.handlers().set_packet(params).await
    }

    #[tool(
        name = "get_packet",
        description = "Return the current project packet text, or its template when it was never replaced."
    )]
    async fn get_packet(&self) -> McpResult {
        self.handlers().get_packet().await
    }

    #[tool(
        name = "set_article",
        description = "Set the article card later steps refer to: `article_id` (e.g. 'A07') and/or `title`. Omitted values are kept."
    )]
    async fn set_article(&self, params: Parameters<SetArticle>) -> McpResult {
        self.handlers().set_article(params).await
    }

    #[tool(
        name = "render_prompt",
        description = "Render a step's prompt from the current session state, ready to paste into an AI chat. `step` defaults to the current step. Empty values appear as [placeholder] markers."
    )]
    async fn render_prompt(&self, params: Parameters<StepRef>) -> McpResult {
        self.handlers().render_prompt(params).await
    }

    #[tool(
        name = "reset_session",
        description = "Clear all field values, restore the packet template and article card defaults, and return to step 1. Cannot be undone."
    )]
    async fn reset_session(&self) -> McpResult {
        self.handlers().reset_session().await
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RelayMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(r#"Relay is a step-by-step prompt wizard. A workflow is a fixed sequence of steps; each step collects a few text fields and renders a prompt meant for an AI chat. The chat's answer is pasted into a field of a later step.

## Core Concepts
- **Steps**: ordered, addressed by id or 1-based number
- **Fields**: raw text per step; empty fields render as [placeholder]
- **Packet**: optional project log carried between chat sessions; replace it with the chat's latest version after each step
- **Article card**: the id and title of the article later steps work on

## Typical Flow
1. `list_steps` to see the workflow
2. `set_field` for the current step, then `render_prompt`
3. Send the prompt to the chat; store its answer with `set_field` on the next step (and `set_packet` when the chat returns an updated packet)
4. `next_step` and repeat; `session_status` shows everything stored so far

Each step is also available as an MCP prompt whose arguments are the step's fields; rendering it does not change the session."#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: RelayMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Relay MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
