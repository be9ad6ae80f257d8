use serde::Deserialize;
use serde_json::{json, Value};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
  #[serde(default, rename = "jsonrpc")]
  pub _jsonrpc: Option<String>,
  pub method: String,
  #[serde(default)]
  pub id: Option<Value>,
  #[serde(default)]
  pub params: Option<Value>,
}

impl JsonRpcRequest {
  /// Requests without an id (or with a null one) are notifications
  pub fn expects_response(&self) -> bool {
    !matches!(self.id, None | Some(Value::Null))
  }
}

pub fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
  json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
  json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}
