// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server implementation
//!
//! Requests are handled one at a time, in arrival order.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::protocol::*;
use super::transport::{Frame, LineTransport, StdioTransport};
use crate::config::{SERVER_NAME, SERVER_VERSION};
use crate::error::Result;
use crate::prompts::{self, CODE_REVIEW_ARGUMENT, CODE_REVIEW_DESCRIPTION, CODE_REVIEW_PROMPT};
use crate::resources::{self, FILE_RESOURCE_MIME_TYPE, FILE_RESOURCE_NAME, FILE_URI_TEMPLATE};
use crate::tools::ToolRegistry;

type MethodResult = std::result::Result<Value, JsonRpcError>;

/// MCP server state
pub struct McpServer {
    /// Tools, fixed at construction
    registry: Arc<ToolRegistry>,
    /// Set once the client sends `initialized`
    initialized: AtomicBool,
}

impl McpServer {
    /// Create a new MCP server over a prebuilt registry
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Whether the client completed the handshake
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Run the MCP server on stdio until stdin closes
    pub async fn run(&self) -> Result<()> {
        self.serve(&StdioTransport::stdio()).await
    }

    /// Serve requests from `transport` until end of input
    pub async fn serve<R: BufRead, W: Write>(&self, transport: &LineTransport<R, W>) -> Result<()> {
        tracing::info!("[MCP] Starting Model Context Protocol server");

        loop {
            let frame = match transport.read_message().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!("[MCP] Input closed, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("[MCP] Failed to read request: {}", e);
                    return Err(e);
                }
            };

            let response = match frame {
                Frame::Text(line) => self.handle_message(&line),
                Frame::InvalidUtf8 => {
                    tracing::error!("[MCP] Received a line that is not valid UTF-8");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                if let Err(e) = transport.write_response(&response).await {
                    tracing::error!("[MCP] Failed to write response: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("[MCP] Failed to parse JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("[MCP] Invalid JSON-RPC request: {}", e);
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::failure(id, JsonRpcError::invalid_request()));
            }
        };

        tracing::debug!("[MCP] Received request: {}", request.method);

        let outcome = self.handle_request(&request);
        if request.is_notification() {
            if let Err(e) = outcome {
                tracing::debug!("[MCP] Notification {} failed: {}", request.method, e.message);
            }
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    /// Dispatch a decoded request to its method handler
    pub fn handle_request(&self, request: &JsonRpcRequest) -> MethodResult {
        let params = request.params.as_ref();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(params),
            "initialized" | "notifications/initialized" => self.handle_initialized(),
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(params),
            "resources/list" => to_result(&ResourcesListResult { resources: vec![] }),
            "resources/templates/list" => self.handle_resource_templates_list(),
            "resources/read" => self.handle_resources_read(params),
            "prompts/list" => self.handle_prompts_list(),
            "prompts/get" => self.handle_prompts_get(params),
            _ => Err(JsonRpcError::method_not_found()),
        }
    }

    fn handle_initialize(&self, params: Option<&Value>) -> MethodResult {
        let params: InitializeParams = decode_params(params)?;

        tracing::info!(
            "[MCP] Initialize from client: {} v{} (protocol {})",
            params.client_info.name,
            params.client_info.version,
            params.protocol_version
        );

        to_result(&InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChangedCapability {
                    list_changed: Some(false),
                }),
                prompts: Some(ListChangedCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        })
    }

    fn handle_initialized(&self) -> MethodResult {
        self.initialized.store(true, Ordering::SeqCst);
        tracing::info!("[MCP] Server initialized");
        Ok(Value::Null)
    }

    fn handle_tools_list(&self) -> MethodResult {
        to_result(&ToolsListResult {
            tools: self.registry.definitions(),
        })
    }

    fn handle_tools_call(&self, params: Option<&Value>) -> MethodResult {
        let params: CallToolParams = decode_params(params)?;

        tracing::info!("[MCP] Calling tool: {}", params.name);

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::tool_not_found(&params.name))?;

        let result = tool
            .call(params.arguments.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError::invalid_params().with_message(e.to_string()))?;

        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| JsonRpcError::internal_error().with_message(e.to_string()))?;

        to_result(&CallToolResult {
            content: vec![ToolContent::Text { text }],
            structured_content: Some(result.to_value()),
            is_error: None,
        })
    }

    fn handle_resource_templates_list(&self) -> MethodResult {
        to_result(&ResourceTemplatesListResult {
            resource_templates: vec![ResourceTemplate {
                uri_template: FILE_URI_TEMPLATE.to_string(),
                name: FILE_RESOURCE_NAME.to_string(),
                description: Some("Text content of a project file".to_string()),
                mime_type: Some(FILE_RESOURCE_MIME_TYPE.to_string()),
            }],
        })
    }

    fn handle_resources_read(&self, params: Option<&Value>) -> MethodResult {
        let params: ReadResourceParams = decode_params(params)?;

        let path = resources::path_from_uri(&params.uri).ok_or_else(|| {
            JsonRpcError::invalid_params().with_message(format!("Unsupported resource URI: {}", params.uri))
        })?;

        to_result(&ReadResourceResult {
            contents: vec![ResourceContent {
                uri: params.uri.clone(),
                mime_type: Some(FILE_RESOURCE_MIME_TYPE.to_string()),
                text: resources::get_resource(path),
            }],
        })
    }

    fn handle_prompts_list(&self) -> MethodResult {
        to_result(&PromptsListResult {
            prompts: vec![Prompt {
                name: CODE_REVIEW_PROMPT.to_string(),
                description: Some(CODE_REVIEW_DESCRIPTION.to_string()),
                arguments: vec![PromptArgument {
                    name: CODE_REVIEW_ARGUMENT.to_string(),
                    description: Some("Path of the file to review".to_string()),
                    required: true,
                }],
            }],
        })
    }

    fn handle_prompts_get(&self, params: Option<&Value>) -> MethodResult {
        let params: GetPromptParams = decode_params(params)?;

        if params.name != CODE_REVIEW_PROMPT {
            return Err(JsonRpcError::invalid_params()
                .with_message(format!("Prompt not found: {}", params.name)));
        }

        let file_path = params
            .arguments
            .get(CODE_REVIEW_ARGUMENT)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                JsonRpcError::invalid_params()
                    .with_message(format!("Missing required argument: {}", CODE_REVIEW_ARGUMENT))
            })?;

        to_result(&GetPromptResult {
            description: Some(CODE_REVIEW_DESCRIPTION.to_string()),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: ToolContent::Text {
                    text: prompts::review_prompt(file_path),
                },
            }],
        })
    }
}

fn decode_params<T: DeserializeOwned>(params: Option<&Value>) -> std::result::Result<T, JsonRpcError> {
    let params = params.ok_or_else(JsonRpcError::invalid_params)?;
    serde_json::from_value(params.clone())
        .map_err(|e| JsonRpcError::invalid_params().with_message(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: &T) -> MethodResult {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error().with_message(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn server() -> McpServer {
        McpServer::new(Arc::new(ToolRegistry::with_builtins()))
    }

    fn call(server: &McpServer, request: Value) -> JsonRpcResponse {
        server
            .handle_message(&request.to_string())
            .expect("expected a response")
    }

    #[test]
    fn test_server_starts_uninitialized() {
        let server = server();
        assert!(!server.is_initialized());
        assert_eq!(server.registry().len(), 4);
    }

    #[test]
    fn test_initialize() {
        let server = server();
        let response = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test", "version": "0.0.1"}
                }
            }),
        );

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["prompts"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[test]
    fn test_initialize_without_params_is_invalid() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}));
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_initialized_notification_has_no_response() {
        let server = server();
        let response = server.handle_message(
            &json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        );
        assert!(response.is_none());
        assert!(server.is_initialized());
    }

    #[test]
    fn test_null_id_is_a_request() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": null, "method": "ping"}));
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.result, Some(json!({})));
    }

    #[test]
    fn test_ping() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}));
        assert_eq!(response.id, json!("p"));
        assert_eq!(response.result, Some(json!({})));
    }

    #[test]
    fn test_parse_error() {
        let response = server().handle_message("{not json").unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[test]
    fn test_invalid_request_keeps_id() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 9}));
        assert_eq!(response.id, json!(9));
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[test]
    fn test_unknown_method() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "sampling/create"}));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_tools_list() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}));
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["file_search", "file_read", "json_parse", "health_check"]);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[test]
    fn test_tools_call_health_check() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "health_check"}
            }),
        );

        let result = response.result.unwrap();
        assert_eq!(result["structuredContent"]["status"], "healthy");
        assert_eq!(result["content"][0]["type"], "text");
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["tool"], "health_check");
    }

    #[test]
    fn test_tools_call_error_stays_in_payload() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "json_parse", "arguments": {"input": "not json"}}
            }),
        );

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["structuredContent"]["valid"], false);
        assert!(result["structuredContent"]["error"].is_string());
    }

    #[test]
    fn test_tools_call_unknown_tool() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "shell"}
            }),
        );

        let error = response.error.unwrap();
        assert_eq!(error.code, -32000);
        assert!(error.message.contains("shell"));
    }

    #[test]
    fn test_tools_call_bad_arguments() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "file_read", "arguments": {}}
            }),
        );

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("path"));
    }

    #[test]
    fn test_resource_templates_list() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/templates/list"}),
        );
        let result = response.result.unwrap();
        assert_eq!(result["resourceTemplates"][0]["uriTemplate"], "file://{path}");
    }

    #[test]
    fn test_resources_list_is_empty() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}));
        assert_eq!(response.result.unwrap()["resources"], json!([]));
    }

    #[test]
    fn test_resources_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("readme.txt");
        std::fs::write(&path, "hello").unwrap();
        let uri = format!("file://{}", path.display());

        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": {"uri": uri}}),
        );

        let result = response.result.unwrap();
        assert_eq!(result["contents"][0]["text"], "hello");
        assert_eq!(result["contents"][0]["uri"], uri);
    }

    #[test]
    fn test_resources_read_missing_file_returns_error_text() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "resources/read",
                "params": {"uri": "file:///definitely/not/here.txt"}
            }),
        );

        let text = response.result.unwrap()["contents"][0]["text"].clone();
        assert!(text.as_str().unwrap().starts_with("Error: "));
    }

    #[test]
    fn test_resources_read_rejects_other_schemes() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "resources/read",
                "params": {"uri": "https://example.com"}
            }),
        );
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_prompts_list() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "prompts/list"}));
        let result = response.result.unwrap();
        assert_eq!(result["prompts"][0]["name"], CODE_REVIEW_PROMPT);
        assert_eq!(result["prompts"][0]["arguments"][0]["name"], "file_path");
        assert_eq!(result["prompts"][0]["arguments"][0]["required"], true);
    }

    #[test]
    fn test_prompts_get() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "prompts/get",
                "params": {"name": "code_review_template", "arguments": {"file_path": "foo.py"}}
            }),
        );

        let result = response.result.unwrap();
        assert_eq!(result["messages"][0]["role"], "user");
        assert!(result["messages"][0]["content"]["text"]
            .as_str()
            .unwrap()
            .contains("foo.py"));
    }

    #[test]
    fn test_prompts_get_missing_argument() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "prompts/get",
                "params": {"name": "code_review_template"}
            }),
        );
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_prompts_get_unknown_prompt() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "prompts/get",
                "params": {"name": "haiku", "arguments": {}}
            }),
        );
        let error = response.error.unwrap();
        assert!(error.message.contains("haiku"));
    }
}
