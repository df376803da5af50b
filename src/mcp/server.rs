//! MCP server setup and lifecycle.
//!
//! Implements line-delimited JSON-RPC over stdio. Requests are handled one at a
//! time; each runs in its own request context.

use super::dispatch::McpMethod;
use crate::observability::{RequestContext, scope_request_context};
use crate::tools::{ToolDefinition, ToolRegistry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{Instrument, info_span};

/// Default maximum requests per rate limit window.
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: usize = 1000;

/// Default rate limit window duration (1 minute).
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Maximum request size (1MB).
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name.
const SERVER_NAME: &str = "workfacts";

/// MCP rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: usize,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        }
    }
}

impl RateLimitConfig {
    /// Creates config from environment variables.
    ///
    /// Reads `WORKFACTS_MCP_RATE_LIMIT_MAX_REQUESTS` and
    /// `WORKFACTS_MCP_RATE_LIMIT_WINDOW_SECS` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let max_requests = std::env::var("WORKFACTS_MCP_RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS);

        let window_secs = std::env::var("WORKFACTS_MCP_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS);

        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Sets maximum requests per window.
    #[must_use]
    pub const fn with_max_requests(mut self, max: usize) -> Self {
        self.max_requests = max;
        self
    }

    /// Sets window duration in seconds.
    #[must_use]
    pub const fn with_window_secs(mut self, secs: u64) -> Self {
        self.window = Duration::from_secs(secs);
        self
    }
}

/// MCP server for workfacts.
pub struct McpServer {
    /// Tool registry.
    tools: ToolRegistry,
    /// Persona whose tool subset `tools/list` advertises; all tools when unset.
    persona: Option<String>,
    /// Rate limit configuration.
    rate_limit: RateLimitConfig,
}

impl McpServer {
    /// Creates a new MCP server.
    #[must_use]
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            persona: None,
            rate_limit: RateLimitConfig::from_env(),
        }
    }

    /// Restricts `tools/list` to a persona's subset.
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Sets the rate limit configuration.
    #[must_use]
    pub const fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Runs the server over stdio until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written.
    pub async fn run_stdio(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serves line-delimited JSON-RPC from `reader` to `writer` with rate
    /// limiting.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        let mut request_count: usize = 0;
        let mut window_start = Instant::now();

        tracing::info!(persona = ?self.persona, "MCP server listening on stdio");

        while let Some(line) = lines.next_line().await.map_err(|e| io_error("read_stdin", &e))? {
            if line.trim().is_empty() {
                continue;
            }

            if window_start.elapsed() > self.rate_limit.window {
                request_count = 0;
                window_start = Instant::now();
            }

            let response = if request_count >= self.rate_limit.max_requests {
                let max_requests = self.rate_limit.max_requests;
                let window = self.rate_limit.window;
                tracing::warn!("Rate limit exceeded: {request_count} requests in {window:?}");
                metrics::counter!("mcp_rate_limit_exceeded_total").increment(1);
                Some(format_error(
                    None,
                    -32000,
                    &format!("Rate limit exceeded: max {max_requests} requests per {window:?}"),
                ))
            } else {
                request_count += 1;
                self.handle_request(&line).await
            };

            if let Some(response) = response {
                writer
                    .write_all(response.as_bytes())
                    .await
                    .map_err(|e| io_error("write_stdout", &e))?;
                writer
                    .write_all(b"\n")
                    .await
                    .map_err(|e| io_error("write_stdout", &e))?;
                writer.flush().await.map_err(|e| io_error("flush_stdout", &e))?;
            }
        }

        tracing::info!("MCP input closed, shutting down");
        Ok(())
    }

    /// Handles one JSON-RPC message. Notifications (no `id`) get no response.
    pub async fn handle_request(&self, request: &str) -> Option<String> {
        if request.len() > MAX_REQUEST_BODY_SIZE {
            tracing::warn!(
                request_size = request.len(),
                max_size = MAX_REQUEST_BODY_SIZE,
                "Request exceeds maximum size limit"
            );
            return Some(format_error(
                None,
                -32600,
                &format!(
                    "Request too large: {} bytes (max: {MAX_REQUEST_BODY_SIZE} bytes)",
                    request.len()
                ),
            ));
        }

        let context = RequestContext::new();
        let span = info_span!(
            "mcp.request",
            request_id = %context.request_id(),
            rpc.method = tracing::field::Empty,
            status = tracing::field::Empty
        );
        let start = Instant::now();

        let parsed: std::result::Result<JsonRpcRequest, _> = serde_json::from_str(request);
        let (method_label, status_label, response) = match parsed {
            Ok(req) => {
                span.record("rpc.method", req.method.as_str());
                let method = req.method.clone();
                let is_notification = req.id.is_none();

                let result = scope_request_context(
                    context,
                    self.dispatch_method(&req.method, req.params)
                        .instrument(span.clone()),
                )
                .await;
                let status = if result.is_ok() { "success" } else { "error" };
                span.record("status", status);

                let response = if is_notification {
                    None
                } else {
                    Some(format_response(req.id, result))
                };
                (method, status, response)
            },
            Err(e) => {
                span.record("status", "parse_error");
                (
                    "parse_error".to_string(),
                    "error",
                    Some(format_error(None, -32700, &format!("Parse error: {e}"))),
                )
            },
        };

        metrics::counter!(
            "mcp_requests_total",
            "method" => method_label.clone(),
            "status" => status_label
        )
        .increment(1);
        metrics::histogram!("mcp_request_duration_ms", "method" => method_label)
            .record(start.elapsed().as_secs_f64() * 1000.0);

        response
    }

    async fn dispatch_method(&self, method: &str, params: Option<Value>) -> DispatchResult {
        let method = McpMethod::from(method);
        tracing::debug!(method = %method, "Processing MCP request");

        match method {
            McpMethod::Initialize => Ok(Self::handle_initialize()),
            McpMethod::ListTools => Ok(self.handle_list_tools()),
            McpMethod::CallTool => self.handle_call_tool(params).await,
            McpMethod::Ping | McpMethod::Notification(_) => Ok(json!({})),
            McpMethod::Unknown(name) => Err((-32601, format!("Method not found: {name}"))),
        }
    }

    fn handle_initialize() -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn advertised_tools(&self) -> Vec<&ToolDefinition> {
        match &self.persona {
            Some(persona) => self.tools.get_tools_for_agent(persona),
            None => self.tools.definitions().iter().collect(),
        }
    }

    fn handle_list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .advertised_tools()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        json!({ "tools": tools })
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((-32602, "Missing tool name".to_string()))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let text = self.tools.execute(name, &arguments).await;
        let is_error = text.starts_with("Unknown tool:") || text.starts_with("Invalid input:");

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error
        }))
    }
}

fn io_error(operation: &str, e: &std::io::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// Formats a response.
fn format_response(id: Option<Value>, result: DispatchResult) -> String {
    match result {
        Ok(value) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            };
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        },
        Err((code, message)) => format_error(id, code, &message),
    }
}

/// Formats an error response.
fn format_error(id: Option<Value>, code: i32, message: &str) -> String {
    let response = JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Result type for method dispatch.
type DispatchResult = std::result::Result<Value, (i32, String)>;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version (required by protocol but not used in code).
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}
