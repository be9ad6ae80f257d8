use serde_json::{json, Value};

use granola::{FileSink, NotesService, NotesSource};

use crate::jsonrpc::{
  json_rpc_error, json_rpc_response, JsonRpcRequest, INVALID_PARAMS, INVALID_REQUEST,
  METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::{call_tool, tool_definitions};

pub const SERVER_NAME: &str = "granola";
pub const MCP_VERSION: &str = "2024-11-05";

/// Answers MCP requests against a [`NotesService`].
pub struct McpServer<S, W> {
  service: NotesService<S, W>,
}

impl<S: NotesSource, W: FileSink> McpServer<S, W> {
  pub fn new(service: NotesService<S, W>) -> Self {
    Self { service }
  }

  /// Handle one line of input. `None` means nothing should be written back.
  pub async fn handle_line(&self, line: &str) -> Option<Value> {
    let line = line.trim();
    if line.is_empty() {
      return None;
    }

    let message = match serde_json::from_str::<Value>(line) {
      Ok(message) => message,
      Err(e) => {
        tracing::warn!(error = %e, "unparseable request");
        return Some(json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {e}")));
      }
    };

    let id = message.get("id").cloned();
    match serde_json::from_value::<JsonRpcRequest>(message) {
      Ok(request) => self.handle(request).await,
      Err(e) => {
        tracing::warn!(error = %e, "invalid request");
        Some(json_rpc_error(id, INVALID_REQUEST, &format!("Invalid Request: {e}")))
      }
    }
  }

  pub async fn handle(&self, request: JsonRpcRequest) -> Option<Value> {
    let expects_response = request.expects_response();
    tracing::debug!(method = %request.method, "request");

    match request.method.as_str() {
      _ if !expects_response => None,
      "initialize" => {
        let protocol_version = request
          .params
          .as_ref()
          .and_then(|params| params.get("protocolVersion"))
          .and_then(Value::as_str)
          .unwrap_or(MCP_VERSION);

        Some(json_rpc_response(
          request.id,
          json!({
            "protocolVersion": protocol_version,
            "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
            "capabilities": { "tools": {} }
          }),
        ))
      }
      "ping" => Some(json_rpc_response(request.id, json!({}))),
      "tools/list" => Some(json_rpc_response(request.id, json!({ "tools": tool_definitions() }))),
      "tools/call" => {
        let Some(params) = request.params.as_ref().and_then(Value::as_object) else {
          return Some(json_rpc_error(request.id, INVALID_PARAMS, "params must be an object"));
        };

        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        let args = match params.get("arguments") {
          None | Some(Value::Null) => json!({}),
          Some(args) => args.clone(),
        };

        let outcome = call_tool(&self.service, name, args).await;
        Some(json_rpc_response(request.id, outcome.into_result()))
      }
      _ => Some(json_rpc_error(request.id, METHOD_NOT_FOUND, "Method not found")),
    }
  }
}
