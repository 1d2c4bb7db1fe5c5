use std::future::Future;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::app::ChefApp;
use crate::view::{render_generation, render_recent, render_recipe};

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GenerateRecipeParams {
    /// Dish name, e.g. "kimchi fried rice"
    pub title: String,
}

#[derive(Clone)]
pub struct ChefMcpServer {
    app: ChefApp,
    tool_router: ToolRouter<ChefMcpServer>,
}

#[tool_router]
impl ChefMcpServer {
    pub fn new(app: ChefApp) -> Self {
        Self {
            app,
            tool_router: Self::tool_router(),
        }
    }

    pub fn app(&self) -> &ChefApp {
        &self.app
    }

    /// Submit: one generation request, answered with the result panel or a notice.
    pub async fn submit(&self, title: &str) -> CallToolResult {
        match self.app.generate(title).await {
            Ok(result) => CallToolResult::success(vec![Content::text(render_recipe(&result))]),
            Err(e) => CallToolResult::error(vec![Content::text(e.notice())]),
        }
    }

    /// Mounts the recent panel and renders its terminal state.
    pub async fn show_recent(&self) -> CallToolResult {
        let state = self.app.recent().await;
        let text = render_recent(&state, &self.app.display(), &chrono::Local);
        if state.error().is_some() {
            CallToolResult::error(vec![Content::text(text)])
        } else {
            CallToolResult::success(vec![Content::text(text)])
        }
    }

    #[tool(description = "Generate a recipe (text and image) for a dish name")]
    async fn generate_recipe(
        &self,
        Parameters(params): Parameters<GenerateRecipeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: generate_recipe");
        Ok(self.submit(&params.title).await)
    }

    #[tool(description = "Show the most recently generated recipe, or its progress")]
    async fn current_recipe(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: current_recipe");
        let text = render_generation(&self.app.current());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List the ten most recently generated recipes, newest first")]
    async fn recent_recipes(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: recent_recipes");
        Ok(self.show_recent().await)
    }
}

#[tool_handler]
impl ServerHandler for ChefMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server generates recipes with an AI chef. Use generate_recipe with a dish \
                 name to create a recipe and image, current_recipe to see the latest result, \
                 and recent_recipes to browse the ten most recently generated recipes."
                    .to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
