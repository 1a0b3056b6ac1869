use crate::prelude::{eprintln, *};
use serde::Deserialize;
use std::collections::HashMap;

use super::{CallToolResult, Content, JsonRpcError};

fn invalid_arguments(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    }
}

/// Wrap rendered text in an MCP tool result.
fn text_result(text: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

fn cookie_pairs(cookies: Option<HashMap<String, String>>) -> Vec<(String, String)> {
    cookies.map(|map| map.into_iter().collect()).unwrap_or_default()
}

/// Every tool call resolves to text, even on failure: unexpected errors are
/// logged in full and surfaced to the caller as a generic failure message.
fn failure_text(tool: &str, e: color_eyre::eyre::Report) -> String {
    log::error!("{tool} failed: {e:?}");
    format!("An error occurred while analyzing the API documentation: {e}")
}

pub async fn handle_analyze_api_docs(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct AnalyzeArgs {
        url: String,
        cookies: Option<HashMap<String, String>>,
    }

    let args: AnalyzeArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!(
            "Calling analyze_api_docs: url={}, cookies={}",
            args.url,
            if args.cookies.is_some() { "yes" } else { "no" }
        );
    }

    let text = crate::api::analyze_data(&args.url, &cookie_pairs(args.cookies))
        .await
        .unwrap_or_else(|e| failure_text("analyze_api_docs", e));

    text_result(text)
}

pub async fn handle_get_api_endpoints(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct EndpointsArgs {
        url: String,
        cookies: Option<HashMap<String, String>>,
    }

    let args: EndpointsArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!("Calling get_api_endpoints: url={}", args.url);
    }

    let text = crate::api::endpoints_data(&args.url, &cookie_pairs(args.cookies))
        .await
        .unwrap_or_else(|e| failure_text("get_api_endpoints", e));

    text_result(text)
}

pub async fn handle_health_check_api(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct HealthArgs {
        url: String,
        cookies: Option<HashMap<String, String>>,
        max_endpoints: Option<usize>,
    }

    let args: HealthArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!(
            "Calling health_check_api: url={}, max_endpoints={:?}",
            args.url, args.max_endpoints
        );
    }

    let text = crate::api::health_check_data(
        &args.url,
        &cookie_pairs(args.cookies),
        args.max_endpoints.unwrap_or(10),
    )
    .await
    .unwrap_or_else(|e| failure_text("health_check_api", e));

    text_result(text)
}

pub async fn handle_generate_code_examples(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ExamplesArgs {
        url: String,
        endpoint_path: String,
        cookies: Option<HashMap<String, String>>,
    }

    let args: ExamplesArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!(
            "Calling generate_code_examples: url={}, endpoint_path={}",
            args.url, args.endpoint_path
        );
    }

    let text = crate::api::examples_data(
        &args.url,
        &args.endpoint_path,
        &cookie_pairs(args.cookies),
    )
    .await
    .unwrap_or_else(|e| failure_text("generate_code_examples", e));

    text_result(text)
}

pub async fn handle_search_endpoints(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        url: String,
        search_term: String,
        cookies: Option<HashMap<String, String>>,
    }

    let args: SearchArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!(
            "Calling search_endpoints: url={}, search_term={}",
            args.url, args.search_term
        );
    }

    let text = crate::api::search_data(&args.url, &args.search_term, &cookie_pairs(args.cookies))
        .await
        .unwrap_or_else(|e| failure_text("search_endpoints", e));

    text_result(text)
}

pub async fn handle_get_api_info(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct InfoArgs {
        url: String,
        cookies: Option<HashMap<String, String>>,
    }

    let args: InfoArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!("Calling get_api_info: url={}", args.url);
    }

    let text = crate::api::info_data(&args.url, &cookie_pairs(args.cookies))
        .await
        .unwrap_or_else(|e| failure_text("get_api_info", e));

    text_result(text)
}

pub async fn handle_export_api_docs(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ExportArgs {
        url: String,
        format: Option<String>,
        cookies: Option<HashMap<String, String>>,
    }

    let args: ExportArgs = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(invalid_arguments)?;

    if global.verbose {
        eprintln!(
            "Calling export_api_docs: url={}, format={:?}",
            args.url, args.format
        );
    }

    let text = crate::api::export_data(
        &args.url,
        args.format.as_deref().unwrap_or("json"),
        &cookie_pairs(args.cookies),
    )
    .await
    .unwrap_or_else(|e| failure_text("export_api_docs", e));

    text_result(text)
}
