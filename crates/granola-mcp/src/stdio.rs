use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use granola::{FileSink, NotesSource};

use crate::server::McpServer;

/// Serve newline-delimited JSON-RPC on the process's stdin and stdout.
pub async fn run_stdio<S: NotesSource, W: FileSink>(server: &McpServer<S, W>) -> Result<()> {
  let reader = BufReader::new(tokio::io::stdin());
  let mut writer = tokio::io::stdout();
  serve(server, reader, &mut writer).await
}

/// Read requests line by line until EOF, answering each before the next.
pub async fn serve<S, W, R, O>(server: &McpServer<S, W>, reader: R, writer: &mut O) -> Result<()>
where
  S: NotesSource,
  W: FileSink,
  R: AsyncBufRead + Unpin,
  O: AsyncWrite + Unpin,
{
  let mut lines = reader.lines();
  while let Some(line) = lines.next_line().await.context("Failed to read request")? {
    if let Some(response) = server.handle_line(&line).await {
      write_newline_json(writer, &response).await?;
    }
  }

  tracing::info!("input closed, shutting down");
  Ok(())
}

async fn write_newline_json<O: AsyncWrite + Unpin>(writer: &mut O, response: &Value) -> Result<()> {
  let mut line = serde_json::to_string(response)?;
  line.push('\n');
  writer.write_all(line.as_bytes()).await.context("Failed to write response")?;
  writer.flush().await?;
  Ok(())
}
