//! Granola MCP Server
//!
//! Serves Granola meeting notes and transcripts to MCP clients over stdio.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use granola::{FsSink, GranolaClient, GranolaConfig, NotesService};
use granola_mcp::{run_stdio, McpServer};

#[derive(Parser)]
#[command(name = "granola-mcp")]
#[command(about = "MCP server for Granola meeting notes")]
#[command(version)]
struct Args {
  /// Base URL of the Granola API
  #[arg(long)]
  api_url: Option<String>,

  /// Desktop client version sent with each request
  #[arg(long)]
  client_version: Option<String>,

  /// Per-request timeout in seconds
  #[arg(long)]
  timeout_secs: Option<u64>,

  /// Number of notes listed when no limit is given
  #[arg(long)]
  default_limit: Option<usize>,

  /// Granola session file holding the access token
  #[arg(long)]
  session_file: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

impl Args {
  /// `GRANOLA_*` environment variables, overridden by any flags given
  fn config(self) -> GranolaConfig {
    let env = GranolaConfig::from_env();
    GranolaConfig {
      api_base_url: self.api_url.unwrap_or(env.api_base_url),
      client_version: self.client_version.unwrap_or(env.client_version),
      timeout_secs: self.timeout_secs.unwrap_or(env.timeout_secs),
      default_limit: self.default_limit.unwrap_or(env.default_limit),
      session_file: self.session_file.unwrap_or(env.session_file),
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // stdout carries the protocol, so logs go to stderr
  let default_level = if args.verbose { "debug" } else { "info" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();

  let config = args.config();
  tracing::info!(
    version = env!("CARGO_PKG_VERSION"),
    api = %config.api_base_url,
    "starting Granola MCP server"
  );

  let client = GranolaClient::new(config.clone()).context("Failed to create Granola client")?;
  let server = McpServer::new(NotesService::new(client, FsSink, config));

  run_stdio(&server).await
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_flags_override_environment() {
    let args = Args::parse_from([
      "granola-mcp",
      "--api-url",
      "http://localhost:8080",
      "--timeout-secs",
      "3",
      "--default-limit",
      "7",
      "--session-file",
      "/tmp/supabase.json",
    ]);
    let config = args.config();

    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert_eq!(config.timeout_secs, 3);
    assert_eq!(config.default_limit, 7);
    assert_eq!(config.session_file, PathBuf::from("/tmp/supabase.json"));
  }
}
