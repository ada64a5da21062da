//! JSON-RPC method dispatch and tool execution.
//!
//! Responsibilities:
//! - Answer `initialize`, `ping`, `tools/list` and `tools/call`.
//! - Validate tool arguments and translate them into client calls.
//! - Wrap every tool outcome in the `{status, ...}` envelope.
//!
//! Does NOT handle:
//! - Reading or writing the transport (see `server`).
//! - Tracking in-flight calls for `notifications/cancelled` (see `server`).
//!
//! Invariants:
//! - Client errors never escape as JSON-RPC errors; they become
//!   `{status: "error", error}` envelopes with `isError: true`.
//! - JSON-RPC errors are reserved for malformed calls (bad params, unknown tool).

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value, json};
use splunk_client::{CancellationToken, ClientError, SearchRequest, SplunkClient, redact_query};
use splunk_config::constants::{
    DEFAULT_EARLIEST_TIME, DEFAULT_LATEST_TIME, DEFAULT_MAX_COUNT, DEFAULT_SEARCH_TIMEOUT_SECS,
    MAX_MAX_COUNT, MAX_SEARCH_TIMEOUT_SECS,
};
use tracing::{debug, info, warn};

use crate::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND, PROTOCOL_VERSION, Request, Response};
use crate::tools::{
    GET_SERVER_INFO_TOOL, LIST_APPS_TOOL, LIST_INDEXES_TOOL, LIST_SAVED_SEARCHES_TOOL,
    SEARCH_SPLUNK_TOOL, TOOL_NAMES, list_tools,
};

pub const SERVER_NAME: &str = "splunk-mcp";

/// Envelope produced by one tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub envelope: Value,
    pub is_error: bool,
}

impl ToolOutcome {
    fn success(fields: Value) -> Self {
        let mut envelope = Map::new();
        envelope.insert("status".to_string(), json!("success"));
        if let Value::Object(fields) = fields {
            envelope.extend(fields);
        }
        Self {
            envelope: Value::Object(envelope),
            is_error: false,
        }
    }

    fn failure(error: impl Into<String>, query: Option<&str>) -> Self {
        let mut envelope = json!({
            "status": "error",
            "error": error.into(),
        });
        if let Some(query) = query {
            envelope["query"] = json!(query);
        }
        Self {
            envelope,
            is_error: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchArgs {
    query: Option<String>,
    earliest_time: Option<String>,
    latest_time: Option<String>,
    max_count: Option<i64>,
    timeout: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IndexArgs {
    pattern: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SavedSearchArgs {
    search_name: Option<String>,
    owner: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppArgs {
    visible_only: Option<bool>,
}

/// Validated `search_splunk` arguments.
fn search_request(args: SearchArgs) -> Result<SearchRequest, String> {
    let query = args.query.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err("Query cannot be empty".to_string());
    }

    let max_count = args.max_count.unwrap_or(DEFAULT_MAX_COUNT as i64);
    if !(1..=MAX_MAX_COUNT as i64).contains(&max_count) {
        return Err(format!(
            "max_count must be between 1 and {} (got {})",
            MAX_MAX_COUNT, max_count
        ));
    }

    let timeout = args.timeout.unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS as i64);
    if !(1..=MAX_SEARCH_TIMEOUT_SECS as i64).contains(&timeout) {
        return Err(format!(
            "timeout must be between 1 and {} seconds (got {})",
            MAX_SEARCH_TIMEOUT_SECS, timeout
        ));
    }

    Ok(SearchRequest::new(query)
        .earliest_time(
            args.earliest_time
                .unwrap_or_else(|| DEFAULT_EARLIEST_TIME.to_string()),
        )
        .latest_time(
            args.latest_time
                .unwrap_or_else(|| DEFAULT_LATEST_TIME.to_string()),
        )
        .max_count(max_count as u64)
        .timeout(Duration::from_secs(timeout as u64)))
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: &Map<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| format!("Invalid arguments: {}", e))
}

/// Run a listing future unless `cancel` fires first.
async fn cancellable<T>(
    cancel: &CancellationToken,
    operation: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = operation => result,
    }
}

/// Execute tool `name` and return its envelope.
///
/// Unknown names produce an error envelope; [`handle_tools_call`] rejects them
/// before reaching this point.
pub async fn call_tool(
    client: &SplunkClient,
    name: &str,
    arguments: &Map<String, Value>,
    cancel: &CancellationToken,
) -> ToolOutcome {
    match name {
        SEARCH_SPLUNK_TOOL => search_splunk(client, arguments, cancel).await,
        LIST_INDEXES_TOOL => list_indexes(client, arguments, cancel).await,
        LIST_SAVED_SEARCHES_TOOL => list_saved_searches(client, arguments, cancel).await,
        LIST_APPS_TOOL => list_apps(client, arguments, cancel).await,
        GET_SERVER_INFO_TOOL => get_server_info(client, cancel).await,
        other => ToolOutcome::failure(format!("Unknown tool: {}", other), None),
    }
}

async fn search_splunk(
    client: &SplunkClient,
    arguments: &Map<String, Value>,
    cancel: &CancellationToken,
) -> ToolOutcome {
    let args: SearchArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return ToolOutcome::failure(message, None),
    };
    let raw_query = args.query.clone();
    let request = match search_request(args) {
        Ok(request) => request,
        Err(message) => return ToolOutcome::failure(message, raw_query.as_deref()),
    };

    info!(query = %redact_query(&request.query), "Executing Splunk search");
    match client.search_with_cancel(&request, cancel).await {
        Ok(outcome) => ToolOutcome::success(json!({
            "query": request.query,
            "result_count": outcome.result_count(),
            "results": outcome.results,
            "messages": outcome.messages,
            "search_time": outcome.search_time,
            "earliest_time": request.earliest_time,
            "latest_time": request.latest_time,
        })),
        Err(e) => {
            warn!(error = %e, "Search failed");
            ToolOutcome::failure(e.to_string(), Some(&request.query))
        }
    }
}

async fn list_indexes(
    client: &SplunkClient,
    arguments: &Map<String, Value>,
    cancel: &CancellationToken,
) -> ToolOutcome {
    let args: IndexArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return ToolOutcome::failure(message, None),
    };

    info!("Listing Splunk indexes");
    match cancellable(cancel, client.list_indexes(args.pattern.as_deref())).await {
        Ok(indexes) => ToolOutcome::success(json!({
            "count": indexes.len(),
            "indexes": indexes,
            "pattern": args.pattern,
        })),
        Err(e) => {
            warn!(error = %e, "Failed to list indexes");
            ToolOutcome::failure(e.to_string(), None)
        }
    }
}

async fn list_saved_searches(
    client: &SplunkClient,
    arguments: &Map<String, Value>,
    cancel: &CancellationToken,
) -> ToolOutcome {
    let args: SavedSearchArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return ToolOutcome::failure(message, None),
    };

    info!("Listing saved searches");
    let listing = client.list_saved_searches(args.search_name.as_deref(), args.owner.as_deref());
    match cancellable(cancel, listing).await {
        Ok(searches) => ToolOutcome::success(json!({
            "count": searches.len(),
            "saved_searches": searches,
        })),
        Err(e) => {
            warn!(error = %e, "Failed to list saved searches");
            ToolOutcome::failure(e.to_string(), None)
        }
    }
}

async fn list_apps(
    client: &SplunkClient,
    arguments: &Map<String, Value>,
    cancel: &CancellationToken,
) -> ToolOutcome {
    let args: AppArgs = match parse_args(arguments) {
        Ok(args) => args,
        Err(message) => return ToolOutcome::failure(message, None),
    };

    info!("Listing Splunk applications");
    let visible_only = args.visible_only.unwrap_or(true);
    match cancellable(cancel, client.list_apps(visible_only)).await {
        Ok(apps) => ToolOutcome::success(json!({
            "count": apps.len(),
            "applications": apps,
        })),
        Err(e) => {
            warn!(error = %e, "Failed to list applications");
            ToolOutcome::failure(e.to_string(), None)
        }
    }
}

async fn get_server_info(client: &SplunkClient, cancel: &CancellationToken) -> ToolOutcome {
    info!("Getting Splunk server information");
    match cancellable(cancel, client.get_server_info()).await {
        Ok(info) => {
            let server_info = match info {
                Some(info) => json!(info),
                None => json!({}),
            };
            ToolOutcome::success(json!({ "server_info": server_info }))
        }
        Err(e) => {
            warn!(error = %e, "Failed to get server info");
            ToolOutcome::failure(e.to_string(), None)
        }
    }
}

/// Route one request. Notifications return `None`.
pub async fn handle_request(
    request: Request,
    client: &SplunkClient,
    cancel: &CancellationToken,
) -> Option<Response> {
    let Some(id) = request.id else {
        debug!(method = %request.method, "Received notification");
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => {
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|p| p.get("protocolVersion"))
                .and_then(Value::as_str)
                .unwrap_or(PROTOCOL_VERSION)
                .to_string();
            Response::ok(
                id,
                json!({
                    "protocolVersion": protocol_version,
                    "capabilities": { "tools": { "listChanged": false } },
                    "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
                }),
            )
        }
        "ping" => Response::ok(id, json!({})),
        "tools/list" => Response::ok(id, list_tools()),
        "tools/call" => handle_tools_call(id, request.params, client, cancel).await,
        other => Response::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    };
    Some(response)
}

/// Validate `tools/call` params, run the tool, and wrap the envelope as MCP content.
pub async fn handle_tools_call(
    id: Value,
    params: Option<Value>,
    client: &SplunkClient,
    cancel: &CancellationToken,
) -> Response {
    let Some(params) = params else {
        return Response::error(id, INVALID_PARAMS, "Missing params");
    };
    let Some(params) = params.as_object() else {
        return Response::error(id, INVALID_PARAMS, "params must be an object");
    };
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Response::error(id, INVALID_PARAMS, "Missing tool name");
    };
    if !TOOL_NAMES.contains(&name) {
        return Response::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name));
    }

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => unwrap_request_object(arguments),
        Some(_) => return Response::error(id, INVALID_PARAMS, "arguments must be an object"),
    };

    let outcome = call_tool(client, name, &arguments, cancel).await;
    tool_result(id, outcome)
}

/// Accept `{"request": {...}}` as well as flat arguments.
fn unwrap_request_object(arguments: &Map<String, Value>) -> Map<String, Value> {
    match arguments.get("request") {
        Some(Value::Object(inner)) if arguments.len() == 1 => inner.clone(),
        _ => arguments.clone(),
    }
}

fn tool_result(id: Value, outcome: ToolOutcome) -> Response {
    Response::ok(
        id,
        json!({
            "content": [{ "type": "text", "text": outcome.envelope.to_string() }],
            "structuredContent": outcome.envelope,
            "isError": outcome.is_error
        }),
    )
}
