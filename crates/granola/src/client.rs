//! HTTP client for the Granola API
//!
//! Thin wrapper over `reqwest` implementing [`NotesSource`]. Non-success
//! responses are normalised to `"<operation> failed: <detail>"` and never
//! retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::read_access_token;
use crate::config::GranolaConfig;
use crate::error::{GranolaError, Result};
use crate::model::{Document, PanelContent, PanelsByDocId, PanelsByPanelId, TranscriptSegment};
use crate::source::NotesSource;

const LIST_DOCUMENTS: &str = "Get documents list";
const BATCH_DOCUMENTS: &str = "Get documents batch";
const TRANSCRIPT_SEGMENTS: &str = "Get transcript segments";
const DOCUMENT_PANELS: &str = "Get document panels";

/// Where the bearer token comes from
#[derive(Debug, Clone)]
pub enum TokenSource {
  /// Re-read from the desktop app's session file on every request
  SessionFile(PathBuf),
  Static(String),
}

pub struct GranolaClient {
  http: Client,
  config: GranolaConfig,
  token: TokenSource,
}

impl GranolaClient {
  /// Client authenticating through the configured session file
  pub fn new(config: GranolaConfig) -> Result<Self> {
    let token = TokenSource::SessionFile(config.session_file.clone());
    Self::with_token_source(config, token)
  }

  pub fn with_token_source(config: GranolaConfig, token: TokenSource) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| GranolaError::api("Create HTTP client", e.to_string()))?;

    Ok(Self { http, config, token })
  }

  async fn access_token(&self) -> Result<String> {
    match &self.token {
      TokenSource::SessionFile(path) => read_access_token(path).await,
      TokenSource::Static(token) => Ok(token.clone()),
    }
  }

  /// POST a JSON body with the full desktop-client header set
  async fn post_json(&self, operation: &str, endpoint: &str, body: Value) -> Result<Value> {
    let token = self.access_token().await?;
    let request = self
      .http
      .post(self.config.v1_url(endpoint))
      .bearer_auth(token)
      .header(reqwest::header::USER_AGENT, self.config.user_agent())
      .header("X-Client-Version", &self.config.client_version)
      .json(&body);

    self.send(operation, request).await
  }

  async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Value> {
    tracing::debug!(operation, "calling Granola API");

    let response =
      request.send().await.map_err(|e| GranolaError::api(operation, e.to_string()))?;
    let response = ensure_success(operation, response).await?;

    response
      .json::<Value>()
      .await
      .map_err(|e| GranolaError::api(operation, format!("invalid response body: {e}")))
  }
}

#[async_trait]
impl NotesSource for GranolaClient {
  async fn fetch_document_list(&self) -> Result<Vec<Document>> {
    let token = self.access_token().await?;
    let request = self.http.get(self.config.v2_url("get-documents")).bearer_auth(token);

    let result = self.send(LIST_DOCUMENTS, request).await?;
    Ok(decode_docs(result))
  }

  async fn fetch_document_batch(&self, ids: &[String]) -> Result<Vec<Document>> {
    let result =
      self.post_json(BATCH_DOCUMENTS, "get-documents-batch", json!({ "document_ids": ids })).await?;
    Ok(decode_docs(result))
  }

  async fn fetch_transcript_segments(&self, doc_id: &str) -> Result<Vec<TranscriptSegment>> {
    let result = self
      .post_json(TRANSCRIPT_SEGMENTS, "get-document-transcript", json!({ "document_id": doc_id }))
      .await?;
    Ok(decode_each(result))
  }

  async fn fetch_document_panels(&self, doc_id: &str) -> Result<Option<PanelsByDocId>> {
    let result = self
      .post_json(DOCUMENT_PANELS, "get-document-panels", json!({ "document_id": doc_id }))
      .await?;
    Ok(normalize_panels(doc_id, result))
  }
}

async fn ensure_success(operation: &str, response: Response) -> Result<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().await.unwrap_or_default();
  Err(GranolaError::api(operation, error_detail(status, &body)))
}

/// Best available explanation of a failed response: the body's `error`, then
/// its `message`, then the raw body, then the status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
  let status_text = status.canonical_reason().unwrap_or(status.as_str()).to_string();
  if body.trim().is_empty() {
    return status_text;
  }

  match serde_json::from_str::<Value>(body) {
    Ok(parsed) => ["error", "message"]
      .iter()
      .find_map(|key| match parsed.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Null) | Some(Value::Bool(false)) | None => None,
        Some(other) => Some(other.to_string()),
      })
      .unwrap_or(status_text),
    Err(_) => body.to_string(),
  }
}

fn decode_docs(result: Value) -> Vec<Document> {
  match result {
    Value::Object(mut obj) => obj.remove("docs").map(decode_each).unwrap_or_default(),
    _ => Vec::new(),
  }
}

/// Decode every element of a JSON array, skipping ones that don't fit.
/// Anything that isn't an array decodes to nothing.
fn decode_each<T: DeserializeOwned>(value: Value) -> Vec<T> {
  let Value::Array(items) = value else {
    return Vec::new();
  };

  items
    .into_iter()
    .filter_map(|item| match serde_json::from_value(item) {
      Ok(decoded) => Some(decoded),
      Err(e) => {
        tracing::warn!(error = %e, "skipping malformed item in API response");
        None
      }
    })
    .collect()
}

/// Normalise the several shapes the panels endpoint has been seen to return
/// into panels keyed by `doc_id`.
pub fn normalize_panels(doc_id: &str, result: Value) -> Option<PanelsByDocId> {
  let panels: PanelsByPanelId = match result {
    Value::Array(items) => items
      .into_iter()
      .filter_map(|item| {
        let id = item.get("id")?.as_str()?.to_string();
        let original_content = item
          .get("original_content")
          .and_then(Value::as_str)
          .map(str::to_string)
          .or_else(|| Some(String::new()));
        let content = item.get("content").cloned().and_then(|c| serde_json::from_value(c).ok());
        Some((id, PanelContent { original_content, content }))
      })
      .collect(),
    Value::Object(mut obj) => {
      let nested = ["panels", "document_panels"]
        .into_iter()
        .find(|key| obj.get(*key).is_some_and(Value::is_object));

      match nested.and_then(|key| obj.remove(key)) {
        Some(Value::Object(panels)) => PanelsByPanelId::from_json_map(panels),
        _ if !obj.is_empty() => PanelsByPanelId::from_json_map(obj),
        _ => return None,
      }
    }
    _ => return None,
  };

  Some(PanelsByDocId::single(doc_id, panels))
}
