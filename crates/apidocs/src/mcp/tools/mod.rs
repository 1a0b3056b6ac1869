mod api;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    pub instructions: String,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn cookies_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "additionalProperties": {"type": "string"},
        "description": "Cookies required for authentication (e.g., {\"_oauth2_proxy\": \"value\"}), forwarded verbatim to every outbound request"
    })
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "apidocs".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: "Provide an API documentation URL (Swagger/OpenAPI JSON or a Swagger UI \
                       page) and optional auth cookies; the tools analyze the API and recommend \
                       how to build frontend pages against it."
            .to_string(),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "analyze_api_docs".to_string(),
            description: "Analyze API documentation at a URL and recommend per-page endpoint groups for frontend implementation. Tries well-known Swagger/OpenAPI document paths first, then falls back to discovering the document URL inside an HTML Swagger UI page. Returns a formatted summary with the API title, version, endpoint count, and grouped recommendations.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "get_api_endpoints".to_string(),
            description: "List every documented endpoint, grouped by tag. An endpoint appears once under each of its tags; untagged endpoints are not listed.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "health_check_api".to_string(),
            description: "Probe the documented GET endpoints with live requests and report reachability, HTTP status classification, and latency per endpoint. Probes at most max_endpoints endpoints (default: 10), in documentation order.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "cookies": cookies_schema(),
                    "max_endpoints": {
                        "type": "number",
                        "description": "Maximum number of endpoints to probe (default: 10)"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "generate_code_examples".to_string(),
            description: "Generate a JavaScript fetch snippet and a Python requests snippet for one documented endpoint. The endpoint_path must match a documented path verbatim, e.g. \"/pet/{petId}\".".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "endpoint_path": {
                        "type": "string",
                        "description": "Documented endpoint path to generate examples for"
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url", "endpoint_path"]
            }),
        },
        Tool {
            name: "search_endpoints".to_string(),
            description: "Search documented endpoints with a case-insensitive substring match over paths, summaries, descriptions, and tags. Returns the matches with a count, or an explicit empty-result message.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "search_term": {
                        "type": "string",
                        "description": "Term to search for"
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url", "search_term"]
            }),
        },
        Tool {
            name: "get_api_info".to_string(),
            description: "Show the API title, version, base URL, and description, plus endpoint statistics: counts per HTTP method and counts per tag sorted by endpoint count.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "export_api_docs".to_string(),
            description: "Export the analyzed documentation. JSON exports include the info block, every endpoint, and the page recommendations; Markdown exports emit one heading block per endpoint. Unsupported formats are rejected with a message.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the API documentation (Swagger/OpenAPI JSON or HTML page)"
                    },
                    "format": {
                        "type": "string",
                        "description": "Export format (default: json)",
                        "enum": ["json", "markdown"]
                    },
                    "cookies": cookies_schema()
                },
                "required": ["url"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "analyze_api_docs" => api::handle_analyze_api_docs(params.arguments, global).await,
        "get_api_endpoints" => api::handle_get_api_endpoints(params.arguments, global).await,
        "health_check_api" => api::handle_health_check_api(params.arguments, global).await,
        "generate_code_examples" => {
            api::handle_generate_code_examples(params.arguments, global).await
        }
        "search_endpoints" => api::handle_search_endpoints(params.arguments, global).await,
        "get_api_info" => api::handle_get_api_info(params.arguments, global).await,
        "export_api_docs" => api::handle_export_api_docs(params.arguments, global).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
