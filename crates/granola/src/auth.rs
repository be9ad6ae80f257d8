//! Access token lookup from the Granola desktop app's local session file.
//!
//! The desktop app keeps its session in `supabase.json`. Newer versions store
//! WorkOS tokens, older ones Cognito tokens; either container may be a JSON
//! object or a JSON document encoded as a string.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{GranolaError, Result};

const TOKEN_NOT_FOUND: &str = "Access token not found in your local Granola data. \
  Make sure Granola is installed, running, and that you are logged in.";

/// `<config dir>/Granola/supabase.json`
pub fn default_session_file() -> PathBuf {
  dirs::config_dir()
    .or_else(dirs::home_dir)
    .unwrap_or_else(|| PathBuf::from("."))
    .join("Granola")
    .join("supabase.json")
}

/// Read the session file and pull out the current access token.
pub async fn read_access_token(session_file: &Path) -> Result<String> {
  let content = tokio::fs::read_to_string(session_file).await.map_err(|e| {
    GranolaError::auth(format!(
      "Could not read Granola session file {}: {e}",
      session_file.display()
    ))
  })?;

  extract_access_token(&content)
}

pub fn extract_access_token(session_json: &str) -> Result<String> {
  let data: Value = serde_json::from_str(session_json)
    .map_err(|e| GranolaError::auth(format!("Granola session file is not valid JSON: {e}")))?;

  ["workos_tokens", "cognito_tokens"]
    .iter()
    .find_map(|key| data.get(*key).and_then(token_from_container))
    .ok_or_else(|| GranolaError::auth(TOKEN_NOT_FOUND))
}

fn token_from_container(container: &Value) -> Option<String> {
  let parsed;
  let tokens = match container {
    Value::String(raw) => {
      parsed = serde_json::from_str::<Value>(raw).ok()?;
      &parsed
    }
    Value::Object(_) => container,
    _ => return None,
  };

  match tokens.get("access_token") {
    Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_workos_object_tokens() {
    let json = r#"{"workos_tokens": {"access_token": "workos-abc"}}"#;
    assert_eq!(extract_access_token(json).unwrap(), "workos-abc");
  }

  #[test]
  fn test_workos_string_encoded_tokens() {
    let json = r#"{"workos_tokens": "{\"access_token\": \"encoded\"}"}"#;
    assert_eq!(extract_access_token(json).unwrap(), "encoded");
  }

  #[test]
  fn test_workos_wins_over_cognito() {
    let json = r#"{
      "workos_tokens": {"access_token": "first"},
      "cognito_tokens": {"access_token": "second"}
    }"#;
    assert_eq!(extract_access_token(json).unwrap(), "first");
  }

  #[test]
  fn test_falls_back_to_cognito_when_workos_is_garbage() {
    let json = r#"{
      "workos_tokens": "not json at all",
      "cognito_tokens": "{\"access_token\": \"cognito-xyz\"}"
    }"#;
    assert_eq!(extract_access_token(json).unwrap(), "cognito-xyz");
  }

  #[test]
  fn test_missing_token_is_an_auth_error() {
    let err = extract_access_token(r#"{"cognito_tokens": {"refresh_token": "r"}}"#).unwrap_err();
    assert!(matches!(err, GranolaError::Auth { .. }));
    assert!(err.to_string().contains("Access token not found"));
  }

  #[test]
  fn test_invalid_session_json_is_an_auth_error() {
    assert!(matches!(extract_access_token("{"), Err(GranolaError::Auth { .. })));
  }

  #[tokio::test]
  async fn test_reads_token_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("supabase.json");
    std::fs::write(&path, r#"{"workos_tokens": {"access_token": "from-disk"}}"#).unwrap();

    assert_eq!(read_access_token(&path).await.unwrap(), "from-disk");
  }

  #[tokio::test]
  async fn test_missing_file_is_an_auth_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = read_access_token(&dir.path().join("nope.json")).await.unwrap_err();
    assert!(err.to_string().contains("Could not read Granola session file"));
  }
}
