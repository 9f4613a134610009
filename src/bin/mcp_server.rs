//! constellation_composer MCP Server
//!
//! Model Context Protocol server exposing constellation search, listing and
//! composition mapping to AI assistants.
//!
//! Build: cargo build --features mcp --bin constellation_mcp
//! Run:   ./target/debug/constellation_mcp

#![cfg_attr(tarpaulin, ignore)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use constellation_composer::core::{ComposerError, Config, ConstellationService};
use constellation_composer::server::tools::{
    dispatch, CompositionArgs, ListArgs, SearchArgs, COMPOSE_DESCRIPTION, COMPOSE_TOOL,
    LIST_DESCRIPTION, LIST_TOOL, SEARCH_DESCRIPTION, SEARCH_TOOL,
};
use rmcp::{
    handler::server::tool::{schema_for_type, ToolCallContext, ToolRoute, ToolRouter},
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        ServerCapabilities, ServerInfo, Tool, ToolsCapability,
    },
    service::{RequestContext, RoleServer},
    ServerHandler, ServiceExt,
};
use serde_json::Value;
use tokio::io::{stdin, stdout};

/// MCP Server for the constellation composer
#[derive(Clone)]
struct ConstellationMcpServer {
    tool_router: ToolRouter<Self>,
    service: Arc<ConstellationService>,
}

/// Turn a library result into a tool result. Request problems are reported to
/// the client as tool errors; anything else is an internal error.
fn to_tool_result(outcome: constellation_composer::Result<String>) -> Result<CallToolResult, rmcp::ErrorData> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_client_error() => {
            Ok(CallToolResult::error(vec![Content::text(format!("Error: {}", e))]))
        }
        Err(e) => Err(rmcp::ErrorData::internal_error(e.to_string(), None)),
    }
}

/// Same path as the stdio server: argument decoding failures are input errors.
fn run_tool(service: &ConstellationService, tool: &str, arguments: Value) -> constellation_composer::Result<String> {
    dispatch(service, tool, arguments)
        .unwrap_or_else(|| Err(ComposerError::invalid_input("name", format!("unknown tool '{}'", tool))))
}

/// Run blocking library work (the optional geometry fetch uses blocking HTTP)
/// off the async executor.
async fn blocking<F>(work: F) -> Result<CallToolResult, rmcp::ErrorData>
where
    F: FnOnce() -> constellation_composer::Result<String> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| rmcp::ErrorData::internal_error(format!("worker failed: {}", e), None))?;
    to_tool_result(outcome)
}

impl ConstellationMcpServer {
    fn new(service: ConstellationService) -> Self {
        let tool_router = ToolRouter::new()
            .with_route(Self::search_route())
            .with_route(Self::compose_route())
            .with_route(Self::list_route());

        Self {
            tool_router,
            service: Arc::new(service),
        }
    }

    fn search_route() -> ToolRoute<Self> {
        let tool = Tool::new(SEARCH_TOOL, SEARCH_DESCRIPTION, schema_for_type::<SearchArgs>());
        ToolRoute::new_dyn(tool, |ctx: ToolCallContext<'_, Self>| Self::call(ctx, SEARCH_TOOL))
    }

    fn compose_route() -> ToolRoute<Self> {
        let tool = Tool::new(COMPOSE_TOOL, COMPOSE_DESCRIPTION, schema_for_type::<CompositionArgs>());
        ToolRoute::new_dyn(tool, |ctx: ToolCallContext<'_, Self>| Self::call(ctx, COMPOSE_TOOL))
    }

    fn list_route() -> ToolRoute<Self> {
        let tool = Tool::new(LIST_TOOL, LIST_DESCRIPTION, schema_for_type::<ListArgs>());
        ToolRoute::new_dyn(tool, |ctx: ToolCallContext<'_, Self>| Self::call(ctx, LIST_TOOL))
    }

    fn call<'a>(
        ctx: ToolCallContext<'a, Self>,
        tool: &'static str,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + 'a>> {
        let service = Arc::clone(&ctx.service.service);
        let arguments = Value::Object(ctx.arguments.unwrap_or_default());
        Box::pin(async move { blocking(move || run_tool(&service, tool, arguments)).await })
    }
}

impl ServerHandler for ConstellationMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "constellation_composer".into(),
                version: constellation_composer::version().into(),
                title: Some("Constellation Composition Mapper".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Use search_constellations or list_all_constellations to pick a constellation. \
                 Use generate_constellation_composition to get focal points, flow, balance and \
                 suggested elements for an image composition."
                    .into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_
    {
        async move {
            Ok(ListToolsResult {
                tools: self.tool_router.list_all(),
                next_cursor: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_
    {
        async move {
            let tool_context = ToolCallContext::new(self, request, context);
            self.tool_router.call(tool_context).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout is clean for MCP protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config_path = std::env::var_os("CONSTELLATION_CONFIG").map(std::path::PathBuf::from);
    let config = Config::discover(config_path.as_deref())?;
    let server = ConstellationMcpServer::new(ConstellationService::with_config(config));

    log::info!("constellation_composer MCP Server v{} starting", constellation_composer::version());

    let transport = (stdin(), stdout());
    let service = server.serve(transport).await?;

    // Wait for the client to disconnect
    let _quit_reason = service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> ConstellationMcpServer {
        ConstellationMcpServer::new(ConstellationService::default())
    }

    #[test]
    fn test_router_lists_three_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, [COMPOSE_TOOL, LIST_TOOL, SEARCH_TOOL]);
    }

    #[test]
    fn test_bad_arguments_are_tool_errors() {
        let service = ConstellationService::default();

        let missing = to_tool_result(run_tool(&service, COMPOSE_TOOL, json!({}))).unwrap();
        assert_eq!(missing.is_error, Some(true));

        let unknown_field =
            run_tool(&service, COMPOSE_TOOL, json!({"constellation_name": "Orion", "seed": 7}));
        assert_eq!(to_tool_result(unknown_field).unwrap().is_error, Some(true));

        let not_found = run_tool(&service, COMPOSE_TOOL, json!({"constellation_name": "Pegasuz"}));
        assert_eq!(to_tool_result(not_found).unwrap().is_error, Some(true));
    }

    #[test]
    fn test_valid_call_succeeds() {
        let service = ConstellationService::default();
        let result = to_tool_result(run_tool(&service, LIST_TOOL, json!({}))).unwrap();
        assert_eq!(result.is_error, Some(false));
    }
}
