//! Runtime configuration shared by the API client and the notes service.
//!
//! Everything the core needs is carried in [`GranolaConfig`] and passed in
//! explicitly; nothing is read from ambient state after construction.

use std::path::PathBuf;

use crate::auth::default_session_file;

pub const DEFAULT_API_BASE_URL: &str = "https://api.granola.ai";
pub const DEFAULT_CLIENT_VERSION: &str = "6.476.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LIST_LIMIT: usize = 25;

pub const API_URL_VAR: &str = "GRANOLA_API_URL";
pub const CLIENT_VERSION_VAR: &str = "GRANOLA_CLIENT_VERSION";
pub const TIMEOUT_SECS_VAR: &str = "GRANOLA_TIMEOUT_SECS";
pub const DEFAULT_LIMIT_VAR: &str = "GRANOLA_DEFAULT_LIMIT";
pub const SESSION_FILE_VAR: &str = "GRANOLA_SESSION_FILE";

#[derive(Debug, Clone)]
pub struct GranolaConfig {
  /// Base URL of the remote API, without a version segment
  pub api_base_url: String,
  /// Desktop client version reported in request headers
  pub client_version: String,
  /// Per-request timeout in seconds
  pub timeout_secs: u64,
  /// Number of entries returned by listings when the caller gives no limit
  pub default_limit: usize,
  /// Desktop app session file holding the access tokens
  pub session_file: PathBuf,
}

impl Default for GranolaConfig {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_BASE_URL.to_string(),
      client_version: DEFAULT_CLIENT_VERSION.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      default_limit: DEFAULT_LIST_LIMIT,
      session_file: default_session_file(),
    }
  }
}

impl GranolaConfig {
  /// Build a configuration from `GRANOLA_*` environment variables, falling
  /// back to defaults for anything unset or unparseable.
  pub fn from_env() -> Self {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();

    let api_base_url = lookup(API_URL_VAR).unwrap_or(defaults.api_base_url);
    let client_version = lookup(CLIENT_VERSION_VAR).unwrap_or(defaults.client_version);
    let timeout_secs = lookup(TIMEOUT_SECS_VAR)
      .and_then(|v| v.trim().parse().ok())
      .unwrap_or(defaults.timeout_secs);
    let default_limit = lookup(DEFAULT_LIMIT_VAR)
      .and_then(|v| v.trim().parse().ok())
      .unwrap_or(defaults.default_limit);
    let session_file =
      lookup(SESSION_FILE_VAR).map(PathBuf::from).unwrap_or(defaults.session_file);

    Self { api_base_url, client_version, timeout_secs, default_limit, session_file }
  }

  /// Endpoint under the v1 API
  pub fn v1_url(&self, endpoint: &str) -> String {
    format!("{}/v1/{}", self.api_base_url.trim_end_matches('/'), endpoint)
  }

  /// Endpoint under the v2 API
  pub fn v2_url(&self, endpoint: &str) -> String {
    format!("{}/v2/{}", self.api_base_url.trim_end_matches('/'), endpoint)
  }

  pub fn user_agent(&self) -> String {
    format!(
      concat!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 ",
        "(KHTML, like Gecko) Granola/{} Chrome/136.0.7103.115 Electron/36.3.2 Safari/537.36",
      ),
      self.client_version
    )
  }
}
