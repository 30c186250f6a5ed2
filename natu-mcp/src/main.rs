//! Natu MCP Server
//!
//! Newline-delimited JSON-RPC 2.0 over stdin/stdout.
//!
//! Tools:
//! - evaluate: Evaluate an expression to a value times a power of GeV
//! - convert: Express a value in a target unit
//! - list_units: List the unit table
//! - list_functions: List available scalar functions

use natu::{format_quantity, Natu, BASE_UNIT};
use natu_core::{NatuError, DEFAULT_PRECISION};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::env;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "natu";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
struct Config {
    precision: usize,
}

impl Config {
    fn from_env() -> Self {
        Self::from_precision_var(env::var("NATU_PRECISION").ok().as_deref())
    }

    fn from_precision_var(value: Option<&str>) -> Self {
        let precision = match value.map(str::trim) {
            None | Some("") => DEFAULT_PRECISION,
            Some(text) => match text.parse::<usize>() {
                Ok(p) => p.clamp(1, natu::MAX_PRECISION),
                Err(_) => {
                    tracing::warn!(value = text, "ignoring invalid NATU_PRECISION");
                    DEFAULT_PRECISION
                }
            },
        };
        Self { precision }
    }
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

impl McpResponse {
    fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env();
    let natu = Natu::with_standard_library().with_precision(config.precision);

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "natu MCP server started");
    tracing::info!(
        precision = natu.precision(),
        units = natu.units().len(),
        functions = natu.functions().len(),
        "engine ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&natu, stdin.lock(), stdout.lock()) {
        tracing::error!(error = %e, "I/O failure");
    }

    tracing::info!("server shutting down");
}

/// Read requests line by line until EOF, writing one response line per
/// request that carries an id
fn serve<R: BufRead, W: Write>(natu: &Natu, mut reader: R, mut writer: W) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            tracing::info!("client disconnected (EOF)");
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        tracing::debug!(bytes = line.len(), "received");
        if let Some(response) = handle_line(natu, line) {
            let text = serde_json::to_string(&response)?;
            writeln!(writer, "{}", text)?;
            writer.flush()?;
        }
    }
}

fn handle_line(natu: &Natu, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "malformed request");
            return Some(McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e))));
        }
    };

    tracing::debug!(method = %request.method, "processing");
    let response = handle_request(natu, &request);

    // Notifications (no id) should NOT receive a response
    if request.id.is_none() {
        tracing::debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response)
}

fn handle_request(natu: &Natu, request: &McpRequest) -> McpResponse {
    if request.jsonrpc != "2.0" {
        return McpResponse::failure(
            request.id.clone(),
            McpError::new(INVALID_REQUEST, format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
        );
    }

    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(tools_list()),
        "tools/call" => handle_tool_call(natu, &request.params),

        _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
    };

    match result {
        Ok(r) => McpResponse::success(request.id.clone(), r),
        Err(e) => McpResponse::failure(request.id.clone(), e),
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version when given
    let protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client, protocol, "client connected");

    Ok(json!({
        "protocolVersion": protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Natural-units calculator: every quantity is a number times a power of GeV"
        },
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "instructions": "Use 'evaluate' to compute expressions such as '2 GeV + 3 MeV' and 'convert' to express a value in another unit, e.g. value '1 GeV', unit 'MeV'. 'list_units' and 'list_functions' show what names are available."
    }))
}

fn tools_list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "evaluate",
                "description": "Evaluate an expression. The result is a number times a rational power of GeV.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "expression": {
                            "type": "string",
                            "description": "Expression such as '1.5 kg / (2 cm)^3'"
                        }
                    },
                    "required": ["expression"]
                }
            },
            {
                "name": "convert",
                "description": "Evaluate a value and express it as a power of a target unit expression.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "string",
                            "description": "Value expression, e.g. '1 GeV'"
                        },
                        "unit": {
                            "type": "string",
                            "description": "Target unit expression, e.g. 'MeV' or 'GeV*s'"
                        }
                    },
                    "required": ["value", "unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List the known units with their value in powers of GeV.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_functions",
                "description": "List available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter: math, trig, complex",
                            "enum": ["math", "trig", "complex"]
                        }
                    }
                }
            }
        ]
    })
}

fn handle_tool_call(natu: &Natu, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "evaluate" => tool_evaluate(natu, &args),
        "convert" => tool_convert(natu, &args),
        "list_units" => tool_list_units(natu),
        "list_functions" => tool_list_functions(natu, &args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn string_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::new(INTERNAL_ERROR, e.to_string()))
}

/// Engine failures are tool results, not protocol errors
fn tool_error(error: &NatuError) -> Result<JsonValue, McpError> {
    Ok(json!({
        "content": [{ "type": "text", "text": format!("Error: {}", error.message) }],
        "error": to_json(error)?,
        "isError": true
    }))
}

fn tool_evaluate(natu: &Natu, args: &JsonValue) -> Result<JsonValue, McpError> {
    let expression = string_arg(args, "expression")?;

    match natu.evaluate_expression(expression) {
        Ok(quantity) => Ok(json!({
            "content": [{ "type": "text", "text": format_quantity(&quantity, BASE_UNIT, natu.precision()) }],
            "quantity": to_json(&quantity)?,
            "isError": false
        })),
        Err(e) => tool_error(&e),
    }
}

fn tool_convert(natu: &Natu, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = string_arg(args, "value")?;
    let unit = string_arg(args, "unit")?;

    match natu.convert(value, unit) {
        Ok(conversion) => Ok(json!({
            "content": [{ "type": "text", "text": conversion.formatted }],
            "data": to_json(&conversion)?,
            "isError": false
        })),
        Err(e) => tool_error(&e),
    }
}

fn tool_list_units(natu: &Natu) -> Result<JsonValue, McpError> {
    let names = natu.unit_names();
    let entries: Vec<_> = names.iter()
        .filter_map(|name| natu.units().entry(name))
        .collect();

    Ok(json!({
        "content": [{ "type": "text", "text": names.join(", ") }],
        "data": to_json(&entries)?
    }))
}

fn tool_list_functions(natu: &Natu, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());
    let functions = natu.list_functions(category);

    let text = functions.iter()
        .map(|f| format!("{}: {}", f.usage, f.description))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": to_json(&functions)?
    }))
}
