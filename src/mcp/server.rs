//! MCP Server
//!
//! Main server loop handling JSON-RPC messages over stdio. stdout
//! carries protocol frames only; diagnostics go to stderr via tracing.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::handlers::ToolHandlers;
use super::protocol::*;
use super::tools::get_tools;

/// MCP server for the Screen Time tool catalog.
pub struct McpServer {
    handlers: ToolHandlers,
}

impl McpServer {
    /// Create a server backed by the real osascript interpreter.
    pub fn new() -> Self {
        Self {
            handlers: ToolHandlers::new(),
        }
    }

    /// Create a server over an explicit handler set.
    pub fn with_handlers(handlers: ToolHandlers) -> Self {
        Self { handlers }
    }

    /// Run the server, reading requests from stdin and answering on
    /// stdout until the transport closes.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        info!("server started, waiting for messages");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            debug!(message = %preview(&line), "<-");

            let response = self.handle(&line).await;
            let out = serde_json::to_string(&response)?;
            debug!(message = %preview(&out), "->");

            writeln!(stdout, "{}", out)?;
            stdout.flush()?;
        }

        info!("server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message.
    async fn handle(&self, msg: &str) -> JsonRpcResponse {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return JsonRpcResponse::error(None, PARSE_ERROR, e.to_string()),
        };

        let id = req.id.clone();

        match req.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: "2024-11-05".into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: "screen-time-mcp".into(),
                        version: env!("CARGO_PKG_VERSION").into(),
                    },
                };
                success_json(id, result)
            }

            "notifications/initialized" => JsonRpcResponse::success(id, Value::Null),

            "tools/list" => success_json(id, ToolsListResult { tools: get_tools() }),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
                };

                debug!(tool = %params.name, "calling tool");
                let result = self.handlers.handle(&params.name, params.arguments).await;
                success_json(id, result)
            }

            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a result payload into a success response, degrading to an
/// internal error rather than dropping the request.
fn success_json<T: Serialize>(id: Option<Value>, result: T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

/// Truncate a protocol frame for logging.
fn preview(msg: &str) -> String {
    const LIMIT: usize = 100;
    if msg.len() <= LIMIT {
        return msg.to_string();
    }
    let mut end = LIMIT;
    while !msg.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &msg[..end])
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::error::ScriptFailure;
    use crate::osascript::ScriptRunner;

    use super::*;

    /// Runner that records scripts and always succeeds with empty
    /// output, like osascript does for the reveal/activate scripts.
    #[derive(Default)]
    struct NullRunner {
        scripts: Mutex<Vec<String>>,
    }

    impl ScriptRunner for NullRunner {
        fn run(&self, script: &str) -> Result<String, ScriptFailure> {
            self.scripts.lock().unwrap().push(script.to_string());
            Ok(String::new())
        }
    }

    fn test_server() -> McpServer {
        McpServer::with_handlers(ToolHandlers::with_runner(Arc::new(NullRunner::default())))
    }

    async fn roundtrip(server: &McpServer, msg: &str) -> Value {
        serde_json::to_value(server.handle(msg).await).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        )
        .await;

        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(resp["result"]["serverInfo"]["name"], "screen-time-mcp");
        assert_eq!(resp["id"], 1);
    }

    #[tokio::test]
    async fn test_tools_list_reports_the_full_catalog() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        )
        .await;

        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "screentime_open");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
        assert_eq!(tools[0]["inputSchema"]["required"], json!([]));
    }

    #[tokio::test]
    async fn test_tools_call_success_envelope() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"screentime_open","arguments":{}}}"#,
        )
        .await;

        let result = &resp["result"];
        assert_eq!(result["content"][0]["text"], "Screen Time settings opened");
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_not_a_protocol_fault() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        )
        .await;

        assert!(resp.get("error").is_none());
        assert_eq!(resp["result"]["isError"], true);
        assert_eq!(resp["result"]["content"][0]["text"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_tools_call_with_bad_params() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await;

        assert_eq!(resp["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_malformed_line_is_a_parse_error() {
        let server = test_server();
        let resp = roundtrip(&server, "not json at all").await;
        assert_eq!(resp["error"]["code"], PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let resp = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#,
        )
        .await;

        assert_eq!(resp["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let msg = format!("{}é", "x".repeat(99));
        assert_eq!(preview(&msg), format!("{}...", "x".repeat(99)));
        assert_eq!(preview("short"), "short");
    }
}
