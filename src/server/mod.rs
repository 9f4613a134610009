//! Minimal MCP (Model Context Protocol) Server
//!
//! A lightweight, synchronous JSON-RPC 2.0 implementation for MCP.
//! No async runtime required - uses blocking stdin/stdout.
//!
//! # Protocol
//! - JSON-RPC 2.0 over stdio (line-delimited JSON)
//! - MCP initialize handshake
//! - Tools: search_constellations, generate_constellation_composition,
//!   list_all_constellations
//!
//! # Usage
//! ```bash
//! constellation --server
//! ```

pub mod tools;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::core::ConstellationService;
use tools::{COMPOSE_DESCRIPTION, COMPOSE_TOOL, LIST_DESCRIPTION, LIST_TOOL, SEARCH_DESCRIPTION, SEARCH_TOOL};

// ============================================================================
// JSON-RPC 2.0 Types
// ============================================================================

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

// ============================================================================
// MCP Tool Response Helpers
// ============================================================================

/// Create a successful MCP tool response with isError: false
fn tool_success(id: Value, text: String) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": false
    }))
}

/// Create an error MCP tool response with isError: true
fn tool_error(id: Value, message: String) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({
        "content": [{
            "type": "text",
            "text": message
        }],
        "isError": true
    }))
}

fn format_schema(default: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["json", "markdown"],
        "default": default,
        "description": "Output format"
    })
}

// ============================================================================
// MCP Server
// ============================================================================

/// MCP Server state
pub struct McpServer {
    initialized: bool,
    service: ConstellationService,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(service: ConstellationService) -> Self {
        Self {
            initialized: false,
            service,
        }
    }

    /// Run the server loop (blocking)
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            // Notifications yield no response
            if let Some(response) = self.handle_request(&line) {
                let response_str = match serde_json::to_string(&response) {
                    Ok(s) => s,
                    Err(e) => {
                        log::error!("failed to serialize response: {}", e);
                        format!(
                            r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":{},"message":"Serialization error"}}}}"#,
                            INTERNAL_ERROR
                        )
                    }
                };

                writeln!(stdout, "{}", response_str)?;
                stdout.flush()?;
            }
        }

        log::info!("MCP server shutting down");
        Ok(())
    }

    /// Handle a JSON-RPC request. Returns None for notifications (no id).
    fn handle_request(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "Invalid JSON-RPC version".to_string(),
            ));
        }

        let is_notification = request.id.is_none();
        let id = request.id.clone().unwrap_or(Value::Null);
        log::debug!("<- {}", request.method);

        let response = match request.method.as_str() {
            // MCP lifecycle
            "initialize" => self.handle_initialize(id),
            "initialized" | "notifications/initialized" => return None,
            "shutdown" => {
                self.initialized = false;
                JsonRpcResponse::success(id, json!({}))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),

            // MCP discovery
            "tools/list" => self.handle_tools_list(id),

            // MCP tool calls
            "tools/call" => self.handle_tools_call(id, request.params),

            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            ),
        };

        if is_notification {
            None
        } else {
            Some(response)
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        self.initialized = true;
        log::info!("MCP client initialized");

        JsonRpcResponse::success(id, json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "constellation_composer",
                "version": crate::version()
            }
        }))
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let bounds = &self.service.config().canvas;
        let dimension = |default: u32, axis: &str| {
            json!({
                "type": "integer",
                "minimum": bounds.min_dimension,
                "maximum": bounds.max_dimension,
                "default": default,
                "description": format!("Canvas {} in pixels", axis)
            })
        };

        let tools = json!({
            "tools": [
                {
                    "name": SEARCH_TOOL,
                    "description": SEARCH_DESCRIPTION,
                    "annotations": {"readOnlyHint": true, "idempotentHint": true, "openWorldHint": false},
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "query": {
                                "type": "string",
                                "description": "Text matched against name, story, theme and visual character (e.g. 'twins', 'hunting')"
                            },
                            "shape_type": {
                                "type": "string",
                                "description": "Shape filter: linear, curved, triangular, square, cross, dipper, dispersed, compact, symmetric"
                            },
                            "brightness": {
                                "type": "string",
                                "description": "Brightness filter: faint, moderate, bright, very_bright, extremely_bright"
                            },
                            "response_format": format_schema("markdown")
                        }
                    }
                },
                {
                    "name": COMPOSE_TOOL,
                    "description": COMPOSE_DESCRIPTION,
                    "annotations": {"readOnlyHint": true, "idempotentHint": true, "openWorldHint": false},
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "constellation_name": {
                                "type": "string",
                                "minLength": 3,
                                "maxLength": 50,
                                "description": "Name or abbreviation (e.g. 'Orion', 'Cassiopeia', 'UMa')"
                            },
                            "canvas_width": dimension(bounds.default_width, "width"),
                            "canvas_height": dimension(bounds.default_height, "height"),
                            "include_mythology": {
                                "type": "boolean",
                                "default": true,
                                "description": "Include mythological themes"
                            },
                            "response_format": format_schema("json")
                        },
                        "required": ["constellation_name"],
                        "additionalProperties": false
                    }
                },
                {
                    "name": LIST_TOOL,
                    "description": LIST_DESCRIPTION,
                    "annotations": {"readOnlyHint": true, "idempotentHint": true, "openWorldHint": false},
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "response_format": format_schema("markdown")
                        }
                    }
                }
            ]
        });

        JsonRpcResponse::success(id, tools)
    }

    fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params".to_string());
            }
        };

        let tool_name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match tools::dispatch(&self.service, tool_name, arguments) {
            None => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown tool: {}", tool_name),
            ),
            Some(Ok(text)) => tool_success(id, text),
            Some(Err(e)) if e.is_client_error() => {
                log::debug!("{} rejected: {}", tool_name, e);
                tool_error(id, format!("Error: {}", e))
            }
            Some(Err(e)) => {
                log::error!("{} failed: {}", tool_name, e);
                JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(ConstellationService::default())
    }

    fn call(server: &mut McpServer, tool: &str, arguments: Value) -> JsonRpcResponse {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": tool, "arguments": arguments}
        });
        server.handle_request(&request.to_string()).unwrap()
    }

    fn text(resp: &JsonRpcResponse) -> &str {
        resp.result.as_ref().unwrap()["content"][0]["text"].as_str().unwrap()
    }

    fn is_error(resp: &JsonRpcResponse) -> bool {
        resp.result.as_ref().unwrap()["isError"].as_bool().unwrap()
    }

    #[test]
    fn test_json_rpc_response_success() {
        let resp = JsonRpcResponse::success(json!(1), json!({"result": "ok"}));
        assert!(resp.error.is_none());
        assert!(resp.result.is_some());
    }

    #[test]
    fn test_json_rpc_response_error() {
        let resp = JsonRpcResponse::error(json!(1), -32600, "Invalid request".to_string());
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32600);
    }

    #[test]
    fn test_parse_request() {
        let json = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, Some(json!(1)));
    }

    #[test]
    fn test_handle_initialize() {
        let mut server = server();
        let resp = server.handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#).unwrap();

        assert!(resp.error.is_none());
        assert!(server.initialized);

        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "constellation_composer");
    }

    #[test]
    fn test_handle_tools_list() {
        let mut server = server();
        let resp = server.handle_request(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).unwrap();

        let result = resp.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, [SEARCH_TOOL, COMPOSE_TOOL, LIST_TOOL]);

        let compose = &tools[1]["inputSchema"];
        assert_eq!(compose["properties"]["canvas_width"]["minimum"], 512);
        assert_eq!(compose["properties"]["canvas_width"]["maximum"], 4096);
        assert_eq!(compose["required"][0], "constellation_name");
    }

    #[test]
    fn test_handle_invalid_json() {
        let resp = server().handle_request("not json").unwrap();
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[test]
    fn test_handle_invalid_version() {
        let resp = server()
            .handle_request(r#"{"jsonrpc":"1.0","id":1,"method":"test"}"#)
            .unwrap();
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn test_handle_unknown_method() {
        let resp = server()
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"unknown/method"}"#)
            .unwrap();
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_handle_shutdown() {
        let mut server = server();
        server.handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);
        assert!(server.initialized);

        let resp = server.handle_request(r#"{"jsonrpc":"2.0","id":2,"method":"shutdown"}"#).unwrap();
        assert!(resp.error.is_none());
        assert!(!server.initialized);
    }

    #[test]
    fn test_handle_initialized_notification() {
        let mut server = server();
        server.handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);

        let resp = server.handle_request(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#);
        assert!(resp.is_none(), "Notifications should not get a response");
    }

    #[test]
    fn test_tools_call_missing_params() {
        let resp = server()
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"tools/call"}"#)
            .unwrap();
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_tool() {
        let resp = call(&mut server(), "zoom", json!({}));
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_tool_compose_json() {
        let resp = call(&mut server(), COMPOSE_TOOL, json!({"constellation_name": "gemini"}));
        assert!(!is_error(&resp));
        let value: Value = serde_json::from_str(text(&resp)).unwrap();
        assert_eq!(value["constellation"], "Gemini");
        assert_eq!(value["composition"]["focal_points"][0]["x"], 0.35);
        assert_eq!(value["composition"]["balance"]["balance_type"], "centered");
    }

    #[test]
    fn test_tool_compose_not_found_is_tool_error() {
        let resp = call(&mut server(), COMPOSE_TOOL, json!({"constellation_name": "Pegasuz"}));
        assert!(resp.error.is_none());
        assert!(is_error(&resp));
        assert!(text(&resp).starts_with("Error: Constellation 'Pegasuz' not found. Available constellations: Andromeda, "));
    }

    #[test]
    fn test_tool_compose_canvas_out_of_range() {
        let resp = call(
            &mut server(),
            COMPOSE_TOOL,
            json!({"constellation_name": "Orion", "canvas_width": 100}),
        );
        assert!(is_error(&resp));
        assert!(text(&resp).contains("canvas_width"));
    }

    #[test]
    fn test_tool_compose_missing_name() {
        let resp = call(&mut server(), COMPOSE_TOOL, json!({}));
        assert!(is_error(&resp));
        assert!(text(&resp).contains("constellation_name"));
    }

    #[test]
    fn test_tool_search() {
        let resp = call(&mut server(), SEARCH_TOOL, json!({"shape_type": "dipper"}));
        assert!(!is_error(&resp));
        assert!(text(&resp).starts_with("# Found 2 Constellation(s)"));

        let resp = call(&mut server(), SEARCH_TOOL, json!({"query": "dragon"}));
        assert!(!is_error(&resp));
        assert!(text(&resp).starts_with("No constellations found"));
    }

    #[test]
    fn test_tool_list() {
        let resp = call(&mut server(), LIST_TOOL, json!({}));
        assert!(text(&resp).starts_with("# Available Constellations (22)"));
    }
}
